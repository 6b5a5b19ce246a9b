use url::Url;

use crate::error::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_PREFIX: &str = "/api/v1";
const DEFAULT_ROOT_ROUTE: &str = "/";

/// External identity providers with a redirect-only OAuth entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OAuthProvider {
    Google,
    LinkedIn,
}

impl OAuthProvider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::LinkedIn => "linkedin",
        }
    }
}

/// Backend location and client-side routing conventions.
///
/// The base URL is a constructor parameter; everything else has a default.
///
/// ```rust,ignore
/// use docmatch_client::ClientConfig;
///
/// let config = ClientConfig::new("https://api.example.com".parse()?)
///     .with_api_prefix("/api/v2");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    pub(crate) base_url: Url,
    pub(crate) api_prefix: String,
    pub(crate) root_route: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_prefix: DEFAULT_API_PREFIX.into(),
            root_route: DEFAULT_ROOT_ROUTE.into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Optional env vars
    /// - `DOCMATCH_API_BASE_URL`: backend origin (default `http://localhost:8000`)
    /// - `DOCMATCH_API_PREFIX`: versioned path prefix (default `/api/v1`)
    /// - `DOCMATCH_ROOT_ROUTE`: route navigated to after logout or a 401 (default `/`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL does not parse or is not http(s).
    pub fn from_env() -> Result<Self, Error> {
        let base = std::env::var("DOCMATCH_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url: Url = base
            .parse()
            .map_err(|e| Error::Config(format!("DOCMATCH_API_BASE_URL: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "DOCMATCH_API_BASE_URL: unsupported scheme '{}'",
                base_url.scheme()
            )));
        }

        let mut config = Self::new(base_url);
        if let Ok(prefix) = std::env::var("DOCMATCH_API_PREFIX") {
            config = config.with_api_prefix(prefix);
        }
        if let Ok(route) = std::env::var("DOCMATCH_ROOT_ROUTE") {
            config = config.with_root_route(route);
        }
        Ok(config)
    }

    /// Override the versioned API path prefix (default `/api/v1`).
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Override the route navigated to on logout and on 401 (default `/`).
    #[must_use]
    pub fn with_root_route(mut self, route: impl Into<String>) -> Self {
        self.root_route = route.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    #[must_use]
    pub fn root_route(&self) -> &str {
        &self.root_route
    }

    /// Absolute URL for an API path such as `"/contracts/"`.
    ///
    /// The path is appended verbatim so trailing slashes the backend routes
    /// on are preserved.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}{}/{path}", self.api_prefix)
    }

    /// Redirect-only URL that starts the provider's OAuth flow.
    #[must_use]
    pub fn oauth_url(&self, provider: OAuthProvider) -> String {
        self.endpoint(&format!("/oauth/{}", provider.as_str()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.parse().expect("valid default URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> ClientConfig {
        ClientConfig::new(base.parse().unwrap())
    }

    #[test]
    fn endpoint_joins_prefix_and_path() {
        let cfg = config("https://api.example.com");
        assert_eq!(
            cfg.endpoint("/contracts/"),
            "https://api.example.com/api/v1/contracts/"
        );
        assert_eq!(
            cfg.endpoint("auth/me"),
            "https://api.example.com/api/v1/auth/me"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let cfg = config("https://example.com/backend/");
        assert_eq!(
            cfg.endpoint("/invoices/clear-all"),
            "https://example.com/backend/api/v1/invoices/clear-all"
        );
    }

    #[test]
    fn prefix_override_is_normalized() {
        let cfg = config("http://localhost:8000").with_api_prefix("api/v2/");
        assert_eq!(cfg.api_prefix(), "/api/v2");
        assert_eq!(cfg.endpoint("/auth/me"), "http://localhost:8000/api/v2/auth/me");

        let bare = config("http://localhost:8000").with_api_prefix("/");
        assert_eq!(bare.endpoint("/auth/me"), "http://localhost:8000/auth/me");
    }

    #[test]
    fn oauth_urls() {
        let cfg = config("https://api.example.com");
        assert_eq!(
            cfg.oauth_url(OAuthProvider::Google),
            "https://api.example.com/api/v1/oauth/google"
        );
        assert_eq!(
            cfg.oauth_url(OAuthProvider::LinkedIn),
            "https://api.example.com/api/v1/oauth/linkedin"
        );
    }

    #[test]
    fn defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url().as_str(), "http://localhost:8000/");
        assert_eq!(cfg.root_route(), "/");
        assert_eq!(cfg.api_prefix(), "/api/v1");
    }
}
