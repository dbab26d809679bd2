use super::enums::ConversationType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logical grouping of related LLM interactions, scoped to one user and
/// (usually) one form-editing thread. Created lazily on the first
/// interaction and reused by id on subsequent calls; never implicitly
/// deleted by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(user_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One immutable audit record of a single LLM interaction.
///
/// Conversations are append-only: they are never updated or partially
/// written after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub session_id: Uuid,
    pub conversation_type: ConversationType,
    /// Absent only when analysis/generation failed before a form existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<Uuid>,
    pub user_message: String,
    pub llm_response: String,
    pub prompt_used: String,
    pub response_metadata: serde_json::Value,
    /// Estimated, not an authoritative LLM-reported count.
    pub tokens_used: i32,
    pub processing_time_ms: i64,
    pub created_at: DateTime<Utc>,
}
