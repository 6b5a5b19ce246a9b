use reqwest::Method;
use serde_json::Value as JsonValue;

use super::ApiClient;
use crate::error::Error;
use crate::models::auth::{ChangePasswordRequest, ProfileUpdateRequest};
use crate::models::{MessageResponse, User};

/// `/profile/*` account endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Rename the current user. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn update_profile(&self, name: &str) -> Result<User, Error> {
        let request = self
            .client
            .authorized(Method::PUT, "/profile/me")
            .json(&ProfileUpdateRequest { name });
        self.client.send_json("update profile", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, Error> {
        let request = self
            .client
            .authorized(Method::POST, "/profile/change-password")
            .json(&ChangePasswordRequest {
                current_password,
                new_password,
            });
        self.client.send_json("change password", request).await
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn delete_account(&self) -> Result<MessageResponse, Error> {
        let request = self.client.authorized(Method::DELETE, "/profile/me");
        self.client.send_json("delete account", request).await
    }

    /// Everything the backend stores about the user, as free-form JSON.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn export_data(&self) -> Result<JsonValue, Error> {
        let request = self.client.authorized(Method::POST, "/profile/export-data");
        self.client.send_json("export data", request).await
    }
}
