//! Conversation audit recording.
//!
//! Every LLM interaction is appended as one immutable conversation record
//! under a session. Sessions are created lazily: a supplied session id is
//! reused when it resolves, otherwise a fresh session is created titled
//! from the operation and a prefix of the user message.

use crate::models::{Conversation, ConversationSession, ConversationType};
use crate::storage::{FormStore, StorageError};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Maximum user-message prefix carried into a lazily-created session title.
const SESSION_TITLE_PREFIX_LEN: usize = 50;

/// Inputs of one recorded interaction.
pub struct InteractionRecord<'a> {
    pub conversation_type: ConversationType,
    pub form_id: Option<Uuid>,
    pub user_message: &'a str,
    pub llm_response: &'a str,
    pub prompt_used: &'a str,
    pub response_metadata: serde_json::Value,
    pub processing_time_ms: i64,
}

/// Appends interaction records through the store.
pub struct ConversationRecorder {
    store: Arc<dyn FormStore>,
}

impl ConversationRecorder {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Record one interaction, creating or reusing the session.
    ///
    /// Called strictly after the corresponding mutation (or analysis) has
    /// completed, so `form_id` always refers to a form state that exists.
    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        session_id: Option<Uuid>,
        record: InteractionRecord<'_>,
    ) -> Result<ConversationSession, StorageError> {
        let session = self
            .resolve_session(user_id, session_id, record.conversation_type, record.user_message)
            .await?;

        let conversation = Conversation {
            id: Uuid::new_v4(),
            session_id: session.id,
            conversation_type: record.conversation_type,
            form_id: record.form_id,
            user_message: record.user_message.to_string(),
            llm_response: record.llm_response.to_string(),
            prompt_used: record.prompt_used.to_string(),
            response_metadata: record.response_metadata,
            tokens_used: estimate_tokens(record.prompt_used, record.llm_response),
            processing_time_ms: record.processing_time_ms,
            created_at: Utc::now(),
        };
        self.store.create_conversation(conversation).await?;

        Ok(session)
    }

    async fn resolve_session(
        &self,
        user_id: Uuid,
        session_id: Option<Uuid>,
        conversation_type: ConversationType,
        user_message: &str,
    ) -> Result<ConversationSession, StorageError> {
        if let Some(id) = session_id {
            match self.store.get_session(id).await {
                Ok(Some(session)) if session.user_id == user_id => return Ok(session),
                Ok(Some(_)) | Ok(None) => {}
                Err(e) => {
                    // Fall through to a fresh session rather than losing
                    // the audit record.
                    warn!("Session lookup failed for {}: {}", id, e);
                }
            }
        }

        let title = session_title(conversation_type, user_message);
        self.store
            .create_session(ConversationSession::new(user_id, title))
            .await
    }
}

fn session_title(conversation_type: ConversationType, user_message: &str) -> String {
    let prefix: String = user_message
        .chars()
        .take(SESSION_TITLE_PREFIX_LEN)
        .collect();
    format!("{}: {}", conversation_type.label(), prefix.trim_end())
}

/// Constant-factor token estimate: roughly one token per four characters.
/// Approximate by design; never an authoritative model-reported count.
pub fn estimate_tokens(prompt: &str, response: &str) -> i32 {
    ((prompt.len() + response.len()) / 4) as i32
}
