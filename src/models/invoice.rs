use serde::{Deserialize, Serialize};

use super::contract::LineItem;
use crate::types::{ContractId, InvoiceId};

/// Invoice as extracted and stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct InvoiceData {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub supplier_name: String,
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    pub created_at: String,
}

/// Body of `POST /invoices/process`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUpload {
    /// Standard-alphabet base64 of the raw file, without any `data:` prefix.
    pub file_content: String,
    /// Lowercase text after the last `.` of the file name, e.g. `pdf`.
    pub file_type: String,
}

impl std::fmt::Debug for InvoiceUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceUpload")
            .field("file_content_len", &self.file_content.len())
            .field("file_type", &self.file_type)
            .finish()
    }
}

/// Per-service price comparison between a contract and an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparisonDetail {
    pub service_name: String,
    pub contract_price: Option<f64>,
    pub invoice_price: f64,
    #[serde(rename = "match")]
    pub is_match: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMatches {
    pub prices_match: bool,
    pub all_services_in_contract: bool,
}

/// A discrepancy reported by the comparison. Values may be numbers or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonIssue {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_value: Option<serde_json::Value>,
}

/// Outcome of checking an invoice against a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ComparisonResult {
    pub contract_id: ContractId,
    pub invoice_data: InvoiceData,
    pub matches: ComparisonMatches,
    #[serde(default)]
    pub issues: Vec<ComparisonIssue>,
    pub overall_match: bool,
    #[serde(default)]
    pub price_comparison_details: Vec<PriceComparisonDetail>,
}

impl ComparisonResult {
    /// Details whose prices disagree.
    pub fn mismatches(&self) -> impl Iterator<Item = &PriceComparisonDetail> {
        self.price_comparison_details.iter().filter(|d| !d.is_match)
    }
}
