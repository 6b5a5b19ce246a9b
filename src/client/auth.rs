use reqwest::Method;

use super::{ApiClient, segment};
use crate::config::OAuthProvider;
use crate::error::Error;
use crate::models::auth::{
    ForgotPasswordRequest, LoginRequest, RefreshRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::models::{MessageResponse, RefreshTokenResponse, TokenResponse, User};

/// `/auth/*` endpoints.
///
/// These calls only talk to the backend; persisting tokens and holding the
/// user is the job of [`AuthController`](crate::controller::AuthController).
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        self.client.send_json("login", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<TokenResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/auth/register")
            .json(&RegisterRequest {
                email,
                name,
                password,
            });
        self.client.send_json("register", request).await
    }

    /// Tell the backend the session is over. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Any transport or HTTP failure. Callers usually log and continue.
    pub async fn logout(&self) -> Result<(), Error> {
        let request = self.client.authorized(Method::POST, "/auth/logout");
        self.client.send_empty("logout", request).await
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/auth/refresh")
            .json(&RefreshRequest { refresh_token });
        self.client.send_json("refresh token", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn current_user(&self) -> Result<User, Error> {
        let request = self.client.authorized(Method::GET, "/auth/me");
        self.client.send_json("get current user", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/auth/forgot-password")
            .json(&ForgotPasswordRequest { email });
        self.client
            .send_json("send password reset email", request)
            .await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure; an unknown or expired token is
    /// reported by the backend as a non-2xx status.
    pub async fn verify_reset_token(&self, token: &str) -> Result<MessageResponse, Error> {
        let path = format!("/auth/verify-reset-token/{}", segment(token));
        let request = self.client.request(Method::GET, &path);
        self.client.send_json("verify reset token", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/auth/reset-password")
            .json(&ResetPasswordRequest {
                token,
                new_password,
            });
        self.client.send_json("reset password", request).await
    }

    /// URL to send the user agent to in order to start an OAuth login.
    #[must_use]
    pub fn oauth_url(&self, provider: OAuthProvider) -> String {
        self.client.config().oauth_url(provider)
    }
}
