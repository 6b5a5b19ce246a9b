use serde::{Deserialize, Serialize};

use crate::types::ContractId;

/// A priced line, shared by contracts and invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl LineItem {
    /// Line with `total = quantity * unit_price`.
    #[must_use]
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
            total_price: None,
        }
    }
}

/// Body of `POST /contracts/` and `PUT /contracts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCreate {
    pub supplier_name: String,
    pub items: Vec<LineItem>,
}

/// Stored contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Contract {
    pub id: ContractId,
    pub supplier_name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Contract {
    /// The client-supplied part of the contract, without server-assigned fields.
    #[must_use]
    pub fn to_create(&self) -> ContractCreate {
        ContractCreate {
            supplier_name: self.supplier_name.clone(),
            items: self.items.clone(),
        }
    }
}
