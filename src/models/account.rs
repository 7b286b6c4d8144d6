//! Session and user profile models

use serde::{Deserialize, Serialize};

/// User attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Login email
    pub email: String,
}

/// Authenticated session returned by login/signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every request
    pub token: String,
    /// Who the token belongs to
    pub user: SessionUser,
}

/// Login form
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Signup form
#[derive(Debug, Clone, Serialize)]
pub struct Signup {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Password change form
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    /// Current password
    pub current_password: String,
    /// Replacement password
    pub new_password: String,
}

/// Signed-in user's profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Login email
    pub email: String,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Public URL of the avatar image
    pub avatar_url: Option<String>,
    /// Company name
    pub company: Option<String>,
}

/// Profile fields the settings page can change
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New company name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}
