use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// OAuth provider the account was created through, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// Access/refresh bearer token pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

/// Response of `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct RefreshTokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Generic `{message, success?}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct MessageResponse {
    pub message: String,
    #[serde(default)]
    pub success: Option<bool>,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_flattens_pair() {
        let json = serde_json::json!({
            "access_token": "a",
            "refresh_token": "r",
            "token_type": "bearer",
            "user": {
                "id": "u1",
                "email": "ada@example.com",
                "name": "Ada",
                "is_active": true,
                "created_at": "2024-05-01T10:00:00"
            }
        });
        let resp: TokenResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.tokens, TokenPair::new("a", "r"));
        assert_eq!(resp.user.provider, None);
        assert_eq!(resp.user.id.to_string(), "u1");
    }

    #[test]
    fn refresh_response_defaults_token_type() {
        let resp: RefreshTokenResponse =
            serde_json::from_str(r#"{"access_token":"new"}"#).unwrap();
        assert_eq!(resp.access_token, "new");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn token_pair_debug_is_redacted() {
        let rendered = format!("{:?}", TokenPair::new("secret-a", "secret-r"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn user_omits_absent_provider() {
        let user = User {
            id: UserId::from("u1".to_string()),
            email: "ada@example.com".into(),
            name: "Ada".into(),
            provider: None,
            is_active: true,
            created_at: "2024-05-01T10:00:00".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("provider").is_none());
    }
}
