//! Token pair and cached-user lifecycle on top of a [`KeyValueStore`].

use std::sync::Arc;

use crate::models::{TokenPair, User};
use crate::storage::{KeyValueStore, StorageError};
use crate::token;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Cached user record. Lives under the `app_` prefix so it is cleared with the cache.
pub const CACHED_USER_KEY: &str = "app_user";

/// Key prefixes treated as application cache.
pub const CACHE_PREFIXES: &[&str] = &["app_", "documents_", "contracts_", "invoices_", "cache_"];

/// Client-local session: the access/refresh tokens plus cached application data.
///
/// Cheap to clone; clones share the same backing store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh [`MemoryStore`](crate::storage::MemoryStore).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::storage::MemoryStore::new()))
    }

    /// The underlying key-value store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Persist both tokens.
    ///
    /// # Errors
    ///
    /// Returns the storage error if either write fails.
    pub fn set_tokens(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
    }

    /// Replace only the access token (after a refresh).
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails.
    pub fn set_access_token(&self, access_token: &str) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, access_token)
    }

    /// Whether `token` should be treated as absent. See [`token::is_expired`].
    #[must_use]
    pub fn is_expired(token: Option<&str>) -> bool {
        token::is_expired(token)
    }

    /// `true` only if both tokens are stored and the access token is unexpired.
    ///
    /// Not a pure predicate: a `false` result clears the whole session first.
    pub fn validate(&self) -> bool {
        self.validate_at(token::unix_now())
    }

    pub(crate) fn validate_at(&self, now: i64) -> bool {
        let access = self.access_token();
        let refresh = self.refresh_token();

        if access.is_none() || refresh.is_none() {
            tracing::debug!("Session incomplete, clearing");
            self.clear();
            return false;
        }

        if token::is_expired_at(access.as_deref(), now) {
            tracing::info!("Access token expired, clearing session");
            self.clear();
            return false;
        }

        true
    }

    /// Remove both tokens and all application cache keys.
    ///
    /// Idempotent. Storage failures are logged, never returned.
    pub fn clear(&self) {
        self.clear_application_cache();
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(error = %e, key, "Error clearing session data");
            }
        }
        tracing::debug!("Session data cleared");
    }

    /// Remove every key under [`CACHE_PREFIXES`], leaving tokens in place.
    pub fn clear_application_cache(&self) {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!(error = %e, "Error clearing application cache");
                return;
            }
        };

        for key in keys.iter().filter(|k| is_cache_key(k)) {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(error = %e, key = %key, "Error clearing application cache");
            }
        }
    }

    /// Cache the user record next to the tokens. Failures are logged.
    pub fn cache_user(&self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(|e| StorageError::Backend(e.to_string()))
            .and_then(|json| self.store.set(CACHED_USER_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to cache user record");
        }
    }

    /// Last cached user record, if any and if it still decodes.
    #[must_use]
    pub fn cached_user(&self) -> Option<User> {
        let json = self.read(CACHED_USER_KEY)?;
        serde_json::from_str(&json)
            .inspect_err(|e| tracing::warn!(error = %e, "Discarding undecodable cached user"))
            .ok()
    }

    /// Empty values count as absent.
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::error!(error = %e, key, "Error reading session storage");
                None
            }
        }
    }
}

fn is_cache_key(key: &str) -> bool {
    CACHE_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}
