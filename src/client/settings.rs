use reqwest::Method;

use super::ApiClient;
use crate::error::Error;
use crate::models::{UserSettings, UserSettingsUpdate};

/// `/profile/settings` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SettingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SettingsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn get(&self) -> Result<UserSettings, Error> {
        let request = self.client.authorized(Method::GET, "/profile/settings");
        self.client.send_json("get settings", request).await
    }

    /// Apply a partial update. Returns the full settings after the change.
    ///
    /// # Errors
    ///
    /// Any transport, HTTP or decode failure.
    pub async fn update(&self, update: &UserSettingsUpdate) -> Result<UserSettings, Error> {
        let request = self
            .client
            .authorized(Method::PUT, "/profile/settings")
            .json(update);
        self.client.send_json("update settings", request).await
    }
}
