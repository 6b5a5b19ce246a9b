use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Backend-assigned user identifier (opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Backend-assigned contract identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct ContractId(pub String);

/// Backend-assigned invoice identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct InvoiceId(pub String);

impl From<&str> for ContractId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<&str> for InvoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl ContractId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl InvoiceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
