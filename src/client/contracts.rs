use reqwest::Method;

use super::{ApiClient, UploadFile, segment};
use crate::error::Error;
use crate::models::{Contract, ContractCreate};
use crate::types::ContractId;

/// Multipart field the backend reads the uploaded document from.
const UPLOAD_FIELD: &str = "file";

/// `/contracts/*` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ContractsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ContractsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn list(&self) -> Result<Vec<Contract>, Error> {
        let request = self.client.authorized(Method::GET, "/contracts/");
        self.client.send_json("fetch contracts", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn get(&self, id: &ContractId) -> Result<Contract, Error> {
        let path = format!("/contracts/{}", segment(id.as_str()));
        let request = self.client.authorized(Method::GET, &path);
        self.client.send_json("fetch contract", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn create(&self, contract: &ContractCreate) -> Result<Contract, Error> {
        let request = self
            .client
            .authorized(Method::POST, "/contracts/")
            .json(contract);
        self.client.send_json("create contract", request).await
    }

    /// Upload a contract document for server-side extraction.
    ///
    /// Error messages keep the backend's `detail` so validation problems
    /// ("unsupported file type") reach the caller.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn upload(&self, file: UploadFile) -> Result<Contract, Error> {
        const OPERATION: &str = "upload contract";

        tracing::debug!(
            file_name = file.file_name(),
            size = file.bytes().len(),
            content_type = %file.content_type(),
            "Uploading contract"
        );
        let form = file
            .into_form(UPLOAD_FIELD)
            .map_err(|source| Error::Transport {
                operation: OPERATION,
                source,
            })?;
        let request = self
            .client
            .authorized(Method::POST, "/contracts/upload")
            .multipart(form);
        let response = self.client.send_upload(OPERATION, request).await?;
        super::decode(OPERATION, response).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn update(&self, id: &ContractId, contract: &ContractCreate) -> Result<Contract, Error> {
        let path = format!("/contracts/{}", segment(id.as_str()));
        let request = self.client.authorized(Method::PUT, &path).json(contract);
        self.client.send_json("update contract", request).await
    }

    /// # Errors
    ///
    /// Any transport or HTTP failure.
    pub async fn delete(&self, id: &ContractId) -> Result<(), Error> {
        let path = format!("/contracts/{}", segment(id.as_str()));
        let request = self.client.authorized(Method::DELETE, &path);
        self.client.send_empty("delete contract", request).await
    }

    /// Delete every contract the current user owns.
    ///
    /// # Errors
    ///
    /// Any transport or HTTP failure.
    pub async fn clear_all(&self) -> Result<(), Error> {
        let request = self.client.authorized(Method::DELETE, "/contracts/clear-all");
        self.client.send_empty("clear all contracts", request).await
    }
}
