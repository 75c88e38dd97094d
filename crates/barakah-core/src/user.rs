//! User and session domain models.
//!
//! The "pure" identity model the stores operate on, independent of the wire
//! format or the on-device storage layout.

use serde::{Deserialize, Serialize};

/// Identity provider used for social sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Google,
    Apple,
    Facebook,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Apple => "apple",
            AuthProvider::Facebook => "facebook",
        }
    }
}

/// Per-user preference bag, mutated by preference-update actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub prayer_reminders: bool,
    pub stream_notifications: bool,
    pub dark_mode: bool,
    pub locale: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            prayer_reminders: true,
            stream_notifications: true,
            dark_mode: false,
            locale: "en".to_string(),
        }
    }
}

/// An authenticated user.
///
/// Created from a successful login/signup response and destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

/// A successful authentication exchange: the user plus their bearer token.
///
/// The token never enters the general-purpose key-value store; it is handed
/// to the hardened token store and dropped from memory snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Credentials for an email/password login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub display_name: String,
}
