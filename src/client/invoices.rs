use std::path::Path;

use reqwest::Method;

use super::{ApiClient, UploadFile, segment};
use crate::error::Error;
use crate::models::InvoiceData;
use crate::types::InvoiceId;

/// `/invoices/*` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct InvoicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InvoicesApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn list(&self) -> Result<Vec<InvoiceData>, Error> {
        let request = self.client.authorized(Method::GET, "/invoices/");
        self.client.send_json("fetch invoices", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn get(&self, id: &InvoiceId) -> Result<InvoiceData, Error> {
        let path = format!("/invoices/{}", segment(id.as_str()));
        let request = self.client.authorized(Method::GET, &path);
        self.client.send_json("fetch invoice", request).await
    }

    /// Send an invoice document for extraction.
    ///
    /// The file travels base64-encoded inside a JSON body together with its
    /// lowercase extension; there is no streaming path.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn process(&self, file: &UploadFile) -> Result<InvoiceData, Error> {
        let body = file.to_invoice_upload();
        tracing::debug!(
            file_name = file.file_name(),
            file_type = %body.file_type,
            "Processing invoice"
        );
        let request = self
            .client
            .authorized(Method::POST, "/invoices/process")
            .json(&body);
        self.client.send_json("process invoice", request).await
    }

    /// [`process`](Self::process) a file read from disk.
    ///
    /// # Errors
    ///
    /// [`Error::File`] if the file cannot be read, else as `process`.
    pub async fn process_path(&self, path: impl AsRef<Path>) -> Result<InvoiceData, Error> {
        let file = UploadFile::from_path(path).await?;
        self.process(&file).await
    }

    /// # Errors
    ///
    /// Any transport or HTTP failure.
    pub async fn delete(&self, id: &InvoiceId) -> Result<(), Error> {
        let path = format!("/invoices/{}", segment(id.as_str()));
        let request = self.client.authorized(Method::DELETE, &path);
        self.client.send_empty("delete invoice", request).await
    }

    /// Delete every invoice the current user owns.
    ///
    /// # Errors
    ///
    /// Any transport or HTTP failure.
    pub async fn clear_all(&self) -> Result<(), Error> {
        let request = self.client.authorized(Method::DELETE, "/invoices/clear-all");
        self.client.send_empty("clear all invoices", request).await
    }
}
