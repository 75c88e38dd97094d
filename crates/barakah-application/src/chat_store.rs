//! Chat store.
//!
//! The session is append-only. A user message is appended as `Pending`
//! before the analysis call, then marked `Sent` or `Failed` by the outcome;
//! the UI renders a failed message distinctly instead of inferring failure
//! from a missing reply. Only a whole-session clear removes messages.

use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::chat::{
    ChatAnalysisRequest, ChatAnalysisResponse, ChatMessage, DeliveryState, MessageRole,
};
use barakah_core::error::{BarakahError, Result};
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

/// The chat store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct ChatSnapshot {
    pub session_id: Option<String>,
    pub integrity_hash: Option<String>,
    pub related_links: Vec<String>,
    pub messages: Vec<ChatMessage>,
    pub status: ActionStatus,
}

/// Store owning the AI-chat slice. Sessions are not persisted on device; a
/// fresh launch starts empty.
pub struct ChatStore {
    state: Arc<RwLock<ChatSnapshot>>,
    api: Arc<dyn BackendApi>,
}

impl ChatStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ChatSnapshot::default())),
            api,
        }
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        self.state.read().await.clone()
    }

    /// Applies a successful analysis response: latest pending message marked
    /// sent, assistant reply appended, session metadata replaced.
    async fn apply_response(&self, response: ChatAnalysisResponse) {
        let mut state = self.state.write().await;
        if let Some(message) = state
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == MessageRole::User && m.delivery == DeliveryState::Pending)
        {
            message.delivery = DeliveryState::Sent;
        }
        state.messages.push(ChatMessage::assistant(response.reply));
        state.session_id = Some(response.session_id);
        state.integrity_hash = response.integrity_hash;
        state.related_links = response.related_links;
        state.status.succeed();
    }

    /// Marks the latest pending user message failed and records the error.
    async fn apply_failure(&self, err: &BarakahError) {
        let mut state = self.state.write().await;
        if let Some(message) = state
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == MessageRole::User && m.delivery == DeliveryState::Pending)
        {
            message.delivery = DeliveryState::Failed;
        }
        state.status.fail(err);
    }

    /// Sends a text message for analysis.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            let err = BarakahError::validation("message", "must not be empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        let session_id = {
            let mut state = self.state.write().await;
            state.status.begin();
            state.messages.push(ChatMessage::user(text));
            state.session_id.clone()
        };

        let request = ChatAnalysisRequest {
            text: text.to_string(),
            session_id,
        };
        match self.api.analyze_message(&request).await {
            Ok(response) => {
                self.apply_response(response).await;
                Ok(())
            }
            Err(err) => {
                self.apply_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Sends a voice clip for analysis.
    pub async fn send_voice(&self, audio: Vec<u8>, mime_type: &str) -> Result<()> {
        if audio.is_empty() {
            let err = BarakahError::validation("audio", "recording is empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        let session_id = {
            let mut state = self.state.write().await;
            state.status.begin();
            state.messages.push(ChatMessage::user("[voice message]"));
            state.session_id.clone()
        };

        match self
            .api
            .analyze_voice(audio, mime_type, session_id.as_deref())
            .await
        {
            Ok(response) => {
                self.apply_response(response).await;
                Ok(())
            }
            Err(err) => {
                self.apply_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Resets the whole session.
    pub async fn clear_session(&self) {
        *self.state.write().await = ChatSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;

    fn reply(session: &str, text: &str) -> ChatAnalysisResponse {
        ChatAnalysisResponse {
            session_id: session.to_string(),
            reply: text.to_string(),
            integrity_hash: Some("sha256:abc".to_string()),
            related_links: vec!["https://example.com/halal-guide".to_string()],
        }
    }

    fn fixture() -> (Arc<MockBackend>, ChatStore) {
        let api = Arc::new(MockBackend::new());
        let store = ChatStore::new(api.clone());
        (api, store)
    }

    #[tokio::test]
    async fn successful_send_appends_both_messages() {
        let (api, store) = fixture();
        api.push_reply(reply("sess-1", "E-numbers explained..."));

        store.send_message("Is E120 halal?").await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].role, MessageRole::User);
        assert_eq!(snapshot.messages[0].delivery, DeliveryState::Sent);
        assert_eq!(snapshot.messages[1].role, MessageRole::Assistant);
        assert_eq!(snapshot.session_id.as_deref(), Some("sess-1"));
        assert_eq!(snapshot.integrity_hash.as_deref(), Some("sha256:abc"));
        assert_eq!(snapshot.related_links.len(), 1);
    }

    #[tokio::test]
    async fn failed_send_keeps_the_user_message_marked_failed() {
        let (api, store) = fixture();
        api.set_offline(true);

        assert!(store.send_message("Is E120 halal?").await.is_err());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].delivery, DeliveryState::Failed);
        assert!(snapshot.status.error.is_some());
        assert!(!snapshot.status.is_loading);
    }

    #[tokio::test]
    async fn a_later_successful_send_clears_the_error() {
        let (api, store) = fixture();
        api.set_offline(true);
        let _ = store.send_message("first").await;

        api.set_offline(false);
        api.push_reply(reply("sess-1", "answer"));
        store.send_message("second").await.unwrap();

        let snapshot = store.snapshot().await;
        assert!(snapshot.status.error.is_none());
        // first message stays failed; second round-trip appended two more.
        assert_eq!(snapshot.messages.len(), 3);
        assert_eq!(snapshot.messages[0].delivery, DeliveryState::Failed);
        assert_eq!(snapshot.messages[1].delivery, DeliveryState::Sent);
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_appending() {
        let (_api, store) = fixture();
        assert!(store.send_message("   ").await.is_err());
        assert!(store.snapshot().await.messages.is_empty());
    }

    #[tokio::test]
    async fn session_id_is_carried_into_subsequent_requests() {
        let (api, store) = fixture();
        api.push_reply(reply("sess-1", "a"));
        api.push_reply(reply("sess-1", "b"));

        store.send_message("one").await.unwrap();
        store.send_message("two").await.unwrap();

        assert_eq!(store.snapshot().await.session_id.as_deref(), Some("sess-1"));
    }

    #[tokio::test]
    async fn clear_session_resets_everything() {
        let (api, store) = fixture();
        api.push_reply(reply("sess-1", "a"));
        store.send_message("one").await.unwrap();

        store.clear_session().await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.messages.is_empty());
        assert!(snapshot.session_id.is_none());
        assert!(snapshot.integrity_hash.is_none());
    }

    #[tokio::test]
    async fn voice_message_follows_the_same_protocol() {
        let (api, store) = fixture();
        api.push_reply(reply("sess-1", "transcribed answer"));

        store.send_voice(vec![1, 2, 3], "audio/m4a").await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].content, "[voice message]");
    }

    #[tokio::test]
    async fn empty_voice_recording_is_rejected() {
        let (_api, store) = fixture();
        assert!(store.send_voice(vec![], "audio/m4a").await.is_err());
    }
}
