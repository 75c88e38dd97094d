//! Chat session domain models.
//!
//! A session is an append-only sequence of messages. Individual messages are
//! never edited or removed; the only destructive operation is a whole-session
//! clear. Delivery is tracked explicitly per message instead of being
//! inferred from the presence of a reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// Delivery state of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    /// Sent and awaiting the assistant's analysis.
    Pending,
    /// The backend acknowledged and replied.
    Sent,
    /// The analysis call failed; no reply will come for this message.
    Failed,
}

/// A single message in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub delivery: DeliveryState,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            delivery: DeliveryState::Pending,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            delivery: DeliveryState::Sent,
        }
    }
}

/// The request the chat store sends for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnalysisRequest {
    pub text: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// The backend's reply to an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnalysisResponse {
    pub session_id: String,
    pub reply: String,
    #[serde(default)]
    pub integrity_hash: Option<String>,
    #[serde(default)]
    pub related_links: Vec<String>,
}
