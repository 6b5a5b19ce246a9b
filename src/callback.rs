use serde::Deserialize;

use crate::error::Error;
use crate::models::TokenPair;

/// Query parameters the backend appends when redirecting back from an OAuth provider.
#[derive(Debug, Default, Clone, Deserialize)]
#[non_exhaustive]
pub struct CallbackParams {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string (with or without the leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "access_token" => &mut params.access_token,
                "refresh_token" => &mut params.refresh_token,
                "error" => &mut params.error,
                "message" => &mut params.message,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        params
    }

    /// Extract the token pair, or the failure the provider reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OAuth`] if `error` is non-empty (with `message` if given),
    /// or if either token is missing or empty.
    pub fn into_tokens(self) -> Result<TokenPair, Error> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            tracing::warn!(error = %error, "OAuth error from provider");
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "OAuth authentication failed".into());
            return Err(Error::OAuth(message));
        }

        match (
            self.access_token.filter(|t| !t.is_empty()),
            self.refresh_token.filter(|t| !t.is_empty()),
        ) {
            (Some(access), Some(refresh)) => Ok(TokenPair::new(access, refresh)),
            _ => Err(Error::OAuth("Missing authentication tokens".into())),
        }
    }
}
