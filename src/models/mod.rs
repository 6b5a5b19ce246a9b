//! Wire types exchanged with the backend.

pub(crate) mod auth;
mod contract;
mod invoice;
mod settings;

pub use auth::{MessageResponse, RefreshTokenResponse, TokenPair, TokenResponse, User};
pub use contract::{Contract, ContractCreate, LineItem};
pub use invoice::{
    ComparisonIssue, ComparisonMatches, ComparisonResult, InvoiceData, InvoiceUpload,
    PriceComparisonDetail,
};
pub use settings::{UserSettings, UserSettingsUpdate};
