//! Devotional content models: duas and inspirational quotes.

use serde::{Deserialize, Serialize};

/// A supplication (dua) managed through the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dua {
    pub id: String,
    pub title: String,
    pub arabic: String,
    #[serde(default)]
    pub transliteration: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload for creating a dua.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDua {
    pub title: String,
    pub arabic: String,
    #[serde(default)]
    pub transliteration: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// An inspirational quote of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}
