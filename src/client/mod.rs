//! Typed REST client for the DocMatch backend.
//!
//! [`ApiClient`] owns the HTTP connection pool, the [`SessionStore`] it reads
//! bearer tokens from and the [`Navigator`] it sends to the root route when
//! the backend answers 401. Endpoint groups are borrowed views:
//!
//! ```rust,ignore
//! let client = ApiClient::new(ClientConfig::from_env()?, SessionStore::in_memory(), Arc::new(LogNavigator));
//! let contracts = client.contracts().list().await?;
//! ```

mod auth;
mod contracts;
mod invoices;
mod profile;
mod settings;
mod upload;

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

pub use auth::AuthApi;
pub use contracts::ContractsApi;
pub use invoices::InvoicesApi;
pub use profile::ProfileApi;
pub use settings::SettingsApi;
pub use upload::UploadFile;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::navigator::Navigator;
use crate::session::SessionStore;

/// Fields searched for a human-readable message in JSON error bodies.
const ERROR_FIELDS: &[&str] = &["message", "detail"];
/// Upload endpoints report validation problems under `detail` first.
const UPLOAD_ERROR_FIELDS: &[&str] = &["detail", "message"];

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ClientConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session,
            navigator,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse, timeouts or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub fn contracts(&self) -> ContractsApi<'_> {
        ContractsApi::new(self)
    }

    #[must_use]
    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi::new(self)
    }

    #[must_use]
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    #[must_use]
    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi::new(self)
    }

    /// Full-page navigation to the configured root route.
    pub fn navigate_to_root(&self) {
        self.navigator.navigate(&self.config.root_route);
    }

    /// Unauthenticated request.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header(ACCEPT, "application/json")
    }

    /// Request carrying the bearer token when the session validates.
    ///
    /// An invalid session is cleared by the validation itself and the request
    /// goes out without credentials.
    pub(crate) fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.request(method, path);
        if !self.session.validate() {
            tracing::debug!(path, "Session invalid, sending request without credentials");
            return builder;
        }
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, Error> {
        self.execute(operation, request, ERROR_FIELDS).await
    }

    pub(crate) async fn send_upload(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, Error> {
        self.execute(operation, request, UPLOAD_ERROR_FIELDS).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let response = self.send(operation, request).await?;
        decode(operation, response).await
    }

    /// Send and discard whatever body comes back.
    pub(crate) async fn send_empty(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<(), Error> {
        self.send(operation, request).await.map(drop)
    }

    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        error_fields: &[&str],
    ) -> Result<Response, Error> {
        tracing::debug!(operation, "Sending API request");
        let response = request
            .send()
            .await
            .map_err(|source| {
                tracing::error!(operation, error = %source, "API request failed to send");
                Error::Transport { operation, source }
            })?;
        self.ensure_success(response, operation, error_fields).await
    }

    /// Checks HTTP status; returns the response on success or a normalized error.
    ///
    /// A 401 wipes the session and navigates to the root route before returning.
    async fn ensure_success(
        &self,
        response: Response,
        operation: &'static str,
        error_fields: &[&str],
    ) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = read_error_message(response, error_fields).await;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(operation, message = %message, "401 received, clearing session");
            self.session.clear();
            self.navigate_to_root();
            return Err(Error::Unauthorized { operation, message });
        }

        tracing::error!(operation, status = status.as_u16(), message = %message, "API error");
        Err(Error::Http {
            operation,
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T, Error> {
    response
        .json::<T>()
        .await
        .map_err(|source| Error::InvalidResponse { operation, source })
}

async fn read_error_message(response: Response, fields: &[&str]) -> String {
    let status = response.status();
    let fallback = generic_message(status);
    match response.text().await {
        Ok(body) => extract_error_message(&body, fields).unwrap_or(fallback),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read error response body");
            fallback
        }
    }
}

/// First non-empty string under `fields` in a JSON object body, else the
/// trimmed body text if non-empty.
fn extract_error_message(body: &str, fields: &[&str]) -> Option<String> {
    if let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) {
        let found = fields
            .iter()
            .filter_map(|field| map.get(*field).and_then(JsonValue::as_str))
            .find(|msg| !msg.is_empty());
        if let Some(msg) = found {
            return Some(msg.to_owned());
        }
    }

    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn generic_message(status: StatusCode) -> String {
    format!(
        "HTTP {} - {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

/// Percent-encode an id for use as a single path segment.
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
