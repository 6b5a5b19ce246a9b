use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Error;
use crate::models::InvoiceUpload;

/// A document to send to the backend, held in memory.
#[derive(Clone)]
pub struct UploadFile {
    file_name: String,
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl UploadFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    /// Read a file from disk. The file name is the last path component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::File {
            path: PathBuf::from(path),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    /// Override the MIME type sent with multipart uploads.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase text after the last `.`, or the whole name when it has no dot
    /// (`README` gives `readme`, `.hidden` gives `hidden`).
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Explicit content type, else one guessed from the extension.
    #[must_use]
    pub fn content_type(&self) -> String {
        match &self.content_type {
            Some(ct) => ct.clone(),
            None => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .to_string(),
        }
    }

    /// JSON body for invoice processing: base64 content plus extension.
    #[must_use]
    pub fn to_invoice_upload(&self) -> InvoiceUpload {
        InvoiceUpload {
            file_content: STANDARD.encode(&self.bytes),
            file_type: self.extension(),
        }
    }

    /// Single-part multipart form with the file under `field`.
    pub(crate) fn into_form(
        self,
        field: &'static str,
    ) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let content_type = self.content_type();
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&content_type)?;
        Ok(reqwest::multipart::Form::new().part(field, part))
    }
}
