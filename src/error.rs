use std::path::PathBuf;

use crate::storage::StorageError;

/// Coarse classification of an [`Error`], for callers that branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    Transport,
    Http,
    Unauthorized,
    InvalidResponse,
    MissingRefreshToken,
    Token,
    OAuth,
    Storage,
    File,
    Config,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[cfg(feature = "client")]
    #[error("Failed to {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response other than 401.
    #[error("Failed to {operation}: {message}")]
    Http {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// 401 from the backend. The local session has already been wiped.
    #[error("Failed to {operation}: unauthorized ({message})")]
    Unauthorized {
        operation: &'static str,
        message: String,
    },

    #[cfg(feature = "client")]
    #[error("Failed to {operation}: invalid response body: {source}")]
    InvalidResponse {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("No refresh token available")]
    MissingRefreshToken,

    /// Access token payload could not be decoded.
    #[error("Token decode error: {0}")]
    Token(String),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "client")]
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            #[cfg(feature = "client")]
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::MissingRefreshToken => ErrorKind::MissingRefreshToken,
            Self::Token(_) => ErrorKind::Token,
            Self::OAuth(_) => ErrorKind::OAuth,
            Self::Storage(_) => ErrorKind::Storage,
            Self::File { .. } => ErrorKind::File,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Name of the backend operation that failed, if the error came from one.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            #[cfg(feature = "client")]
            Self::Transport { operation, .. } | Self::InvalidResponse { operation, .. } => {
                Some(*operation)
            }
            Self::Http { operation, .. } | Self::Unauthorized { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}
