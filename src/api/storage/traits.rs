//! Storage trait definitions for the API storage backends.

use crate::models::{
    Conversation, ConversationSession, Form, FormStep, MarketingConfig, SuccessModalConfig,
};
use uuid::Uuid;

/// Storage backend trait for everything the AI pipeline persists.
///
/// The pipeline issues no transaction spanning the form, step, marketing,
/// and success-modal writes of a single mutation; each call is an
/// independent store operation.
#[async_trait::async_trait]
pub trait FormStore: Send + Sync {
    /// Create a new form, including its steps.
    async fn create_form(&self, form: Form) -> Result<Form, super::StorageError>;

    /// Get a form by id, with steps in order.
    async fn get_form(&self, form_id: Uuid) -> Result<Option<Form>, super::StorageError>;

    /// Update a form's own fields (not steps) with optimistic locking.
    ///
    /// With `expected_version: None` the update is unconditional and the
    /// last writer wins; with a version, a mismatch yields
    /// [`super::StorageError::VersionConflict`].
    async fn update_form(
        &self,
        form: Form,
        expected_version: Option<i32>,
    ) -> Result<Form, super::StorageError>;

    /// Replace a form's full step sequence, preserving the given order.
    async fn replace_steps(
        &self,
        form_id: Uuid,
        steps: Vec<FormStep>,
    ) -> Result<(), super::StorageError>;

    /// Overwrite a form's marketing block.
    async fn update_marketing(
        &self,
        form_id: Uuid,
        marketing: MarketingConfig,
    ) -> Result<(), super::StorageError>;

    /// Overwrite a form's success-modal config.
    async fn update_success_modal(
        &self,
        form_id: Uuid,
        success_modal: SuccessModalConfig,
    ) -> Result<(), super::StorageError>;

    /// Get a conversation session by id.
    async fn get_session(
        &self,
        session_id: Uuid,
    ) -> Result<Option<ConversationSession>, super::StorageError>;

    /// Create a new conversation session.
    async fn create_session(
        &self,
        session: ConversationSession,
    ) -> Result<ConversationSession, super::StorageError>;

    /// Append one immutable conversation record.
    async fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, super::StorageError>;

    /// List a session's conversation records, oldest first.
    async fn list_conversations(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<Conversation>, super::StorageError>;
}
