//! Process-wide application settings.

use serde::{Deserialize, Serialize};

/// Application settings, initialized with defaults on first run and mutated
/// by independent toggle actions. Every toggle persists on its own; flipping
/// one flag never touches another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
    pub locale: String,
    pub prayer_notifications: bool,
    pub stream_notifications: bool,
    pub product_alerts: bool,
    pub location_permission: bool,
    pub auto_download: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            locale: "en".to_string(),
            prayer_notifications: true,
            stream_notifications: true,
            product_alerts: true,
            location_permission: false,
            auto_download: false,
        }
    }
}
