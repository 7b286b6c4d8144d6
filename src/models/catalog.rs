//! Phone number, knowledge-base file and voice models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an imported phone number
pub type PhoneNumberId = i64;

/// Unique identifier for an uploaded file
pub type FileId = i64;

/// Phone number imported from a telephony provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Unique identifier
    pub id: PhoneNumberId,
    /// E.164 number
    pub number: String,
    /// User-facing label
    #[serde(default)]
    pub label: Option<String>,
    /// Provider the number was imported from
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Agent answering calls on this number
    #[serde(default)]
    pub agent_id: Option<i64>,
}

fn default_provider() -> String {
    "twilio".to_string()
}

/// Import form for a Twilio number
#[derive(Debug, Clone, Serialize)]
pub struct PhoneNumberImport {
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: String,
    /// Number to import
    pub phone_number: String,
    /// Optional label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Knowledge-base file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique identifier
    pub id: FileId,
    /// Original file name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size_bytes: u64,
    /// MIME type reported at upload
    #[serde(default)]
    pub content_type: Option<String>,
    /// Upload time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Voice offered by a text-to-speech provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Provider-specific voice id
    pub id: String,
    /// Display name
    pub name: String,
    /// Text-to-speech provider
    pub provider: String,
    /// Language code
    #[serde(default)]
    pub language: Option<String>,
    /// Accent description
    #[serde(default)]
    pub accent: Option<String>,
    /// Gender description
    #[serde(default)]
    pub gender: Option<String>,
    /// Sample audio URL
    #[serde(default)]
    pub preview_url: Option<String>,
}
