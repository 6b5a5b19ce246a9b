#![doc = include_str!("../README.md")]

pub mod callback;
#[cfg(feature = "client")]
pub mod client;
pub mod config;
#[cfg(feature = "client")]
pub mod controller;
pub mod error;
pub mod models;
pub mod navigator;
pub mod session;
pub mod storage;
pub mod token;
pub mod types;

// Re-exports for convenient access
pub use callback::CallbackParams;
#[cfg(feature = "client")]
pub use client::{
    ApiClient, AuthApi, ContractsApi, InvoicesApi, ProfileApi, SettingsApi, UploadFile,
};
pub use config::{ClientConfig, OAuthProvider};
#[cfg(feature = "client")]
pub use controller::{AuthController, AuthState, BackendReset};
pub use error::{Error, ErrorKind};
pub use models::{
    Contract, ContractCreate, InvoiceData, LineItem, MessageResponse, TokenPair, TokenResponse,
    User, UserSettings, UserSettingsUpdate,
};
pub use navigator::{LogNavigator, Navigator, RouteRecorder};
pub use session::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use token::{is_expired, is_expired_at};
pub use types::{ContractId, InvoiceId, UserId};
