//! Authenticated-user state and the login/logout/refresh flows around it.

use tokio::sync::watch;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{TokenPair, User};

/// Snapshot of the controller's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// `true` while a login/register/logout/OAuth transition or the initial
    /// session restore is in progress.
    pub is_loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Outcome of [`AuthController::reset_backend_data`]. Each half is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendReset {
    pub contracts_cleared: bool,
    pub invoices_cleared: bool,
}

/// Owner of "who is logged in".
///
/// One instance per running application, passed by reference to whatever
/// needs it. State changes are published on a watch channel; see
/// [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct AuthController {
    api: ApiClient,
    state: watch::Sender<AuthState>,
}

/// Clears `is_loading` when a transition ends, including by cancellation.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<AuthState>) -> Self {
        state.send_if_modified(|s| !std::mem::replace(&mut s.is_loading, true));
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));
    }
}

impl AuthController {
    /// Starts anonymous and loading; call [`initialize`](Self::initialize) once.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(AuthState {
            user: None,
            is_loading: true,
        });
        Self { api, state }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Restore the session found in storage, if it is still valid.
    ///
    /// Never fails: anything short of a confirmed user leaves the controller
    /// anonymous with the session cleared.
    pub async fn initialize(&self) {
        let _loading = LoadingGuard::begin(&self.state);

        if !self.api.session().validate() {
            tracing::debug!("No valid stored session, starting anonymous");
            self.set_user(None);
            return;
        }

        match self.api.auth().current_user().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.adopt(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session restore failed, clearing session");
                self.clear_application_data();
            }
        }
    }

    /// # Errors
    ///
    /// The login call's error; the controller stays anonymous.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let _loading = LoadingGuard::begin(&self.state);
        self.clear_application_data();

        let response = self.api.auth().login(email, password).await?;
        self.establish(&response.tokens, response.user)
    }

    /// # Errors
    ///
    /// The register call's error; the controller stays anonymous.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, Error> {
        let _loading = LoadingGuard::begin(&self.state);
        self.clear_application_data();

        let response = self.api.auth().register(email, name, password).await?;
        self.establish(&response.tokens, response.user)
    }

    /// End the session locally no matter what the backend says, then navigate
    /// to the root route.
    pub async fn logout(&self) {
        {
            let _loading = LoadingGuard::begin(&self.state);
            if let Err(e) = self.api.auth().logout().await {
                tracing::warn!(error = %e, "Backend logout failed, clearing local session anyway");
            }
            self.clear_application_data();
        }
        tracing::info!("Logged out");
        self.api.navigate_to_root();
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// [`Error::MissingRefreshToken`] without touching the backend when no
    /// refresh token is stored. Any failure of the exchange itself logs the
    /// user out before the error is returned. A 401 has already cleared the
    /// session and navigated, so only the held user is dropped.
    pub async fn refresh_token(&self) -> Result<(), Error> {
        let Some(refresh_token) = self.api.session().refresh_token() else {
            return Err(Error::MissingRefreshToken);
        };

        let result = match self.api.auth().refresh(&refresh_token).await {
            Ok(response) => self
                .api
                .session()
                .set_access_token(&response.access_token)
                .map_err(Error::from),
            Err(e) => Err(e),
        };

        match &result {
            Err(e @ Error::Unauthorized { .. }) => {
                tracing::warn!(error = %e, "Refresh token rejected");
                self.clear_application_data();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, logging out");
                self.logout().await;
            }
            Ok(()) => {}
        }
        result
    }

    /// Finish an OAuth login with the tokens the backend redirected back with.
    ///
    /// Wipes the user's server-side contracts and invoices for a fresh start;
    /// failures there are logged and do not block the login. Does not navigate.
    ///
    /// # Errors
    ///
    /// Storage failure persisting the tokens, or failure fetching the user.
    pub async fn handle_oauth_callback(&self, tokens: TokenPair) -> Result<User, Error> {
        let _loading = LoadingGuard::begin(&self.state);
        self.clear_application_data();

        let result = self.oauth_login(&tokens).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "OAuth callback error");
        }
        result
    }

    async fn oauth_login(&self, tokens: &TokenPair) -> Result<User, Error> {
        self.api.session().set_tokens(tokens)?;
        let user = self.api.auth().current_user().await?;
        self.reset_backend_data().await;
        self.adopt(user.clone());
        tracing::info!(user_id = %user.id, "OAuth login complete");
        Ok(user)
    }

    /// Clear the user's contracts and invoices on the backend.
    ///
    /// The two deletes are independent: one failing does not skip the other,
    /// and neither failure is propagated.
    pub async fn reset_backend_data(&self) -> BackendReset {
        let contracts_cleared = match self.api.contracts().clear_all().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Error clearing contracts");
                false
            }
        };

        let invoices_cleared = match self.api.invoices().clear_all().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Error clearing invoices");
                false
            }
        };

        BackendReset {
            contracts_cleared,
            invoices_cleared,
        }
    }

    fn establish(&self, tokens: &TokenPair, user: User) -> Result<User, Error> {
        self.api.session().set_tokens(tokens)?;
        self.adopt(user.clone());
        tracing::info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    fn adopt(&self, user: User) {
        self.api.session().cache_user(&user);
        self.set_user(Some(user));
    }

    /// Session tokens, application cache and held user, all at once.
    fn clear_application_data(&self) {
        self.api.session().clear();
        self.set_user(None);
    }

    fn set_user(&self, user: Option<User>) {
        self.state.send_if_modified(|s| {
            if s.user == user {
                return false;
            }
            s.user = user;
            true
        });
    }
}
