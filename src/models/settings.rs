use serde::{Deserialize, Serialize};

/// Per-user preferences stored by the backend under `/profile/settings`.
///
/// `retry_attempts` and `timeout_seconds` are preferences for server-side
/// processing; the client itself never retries and sets no timeouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct UserSettings {
    // General
    pub theme: String,
    pub language: String,
    pub timezone: String,
    pub sound_enabled: bool,
    pub auto_save: bool,
    pub compact_mode: bool,

    // Processing
    pub ai_model: String,
    pub ocr_accuracy: String,
    pub auto_processing: bool,
    pub batch_size: u32,
    pub retry_attempts: u32,
    pub timeout_seconds: u32,

    // Security
    pub two_factor_auth: bool,
    pub session_timeout: u32,
    pub login_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_whitelist: Option<String>,
    pub data_encryption: bool,
    pub audit_log: bool,

    // Storage
    pub retention_days: u32,
    pub auto_cleanup: bool,
    pub compression_enabled: bool,
    pub backup_frequency: String,

    // Notifications
    pub email_notifications: bool,
    pub processing_alerts: bool,
    pub security_alerts: bool,
    pub weekly_reports: bool,

    pub created_at: String,
    pub updated_at: String,
}

/// Partial settings update for `PUT /profile/settings`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_mode: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_accuracy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_processing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_factor_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_whitelist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_encryption: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_cleanup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_frequency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_alerts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_alerts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_reports: Option<bool>,
}

impl UserSettingsUpdate {
    /// `true` if no field is set; sending it would be a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
