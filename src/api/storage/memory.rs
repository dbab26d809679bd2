//! In-memory storage backend.
//!
//! Backs the API when no DATABASE_URL is configured and serves as the test
//! double for the pipeline's integration tests. Deliberately mirrors the
//! non-transactional behavior of the PostgreSQL backend: each trait call is
//! an independent read or write, so interleaved read-modify-write sequences
//! can lose updates just as they can against the real store.

use super::{StorageError, traits::FormStore};
use crate::models::{
    Conversation, ConversationSession, Form, FormStep, MarketingConfig, SuccessModalConfig,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryFormStore {
    forms: RwLock<HashMap<Uuid, Form>>,
    sessions: RwLock<HashMap<Uuid, ConversationSession>>,
    conversations: RwLock<Vec<Conversation>>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for MemoryFormStore {
    async fn create_form(&self, form: Form) -> Result<Form, StorageError> {
        let mut forms = self.forms.write().await;
        if forms.values().any(|f| f.slug == form.slug) {
            return Err(StorageError::Other(format!(
                "Slug already in use: {}",
                form.slug
            )));
        }
        forms.insert(form.id, form.clone());
        Ok(form)
    }

    async fn get_form(&self, form_id: Uuid) -> Result<Option<Form>, StorageError> {
        Ok(self.forms.read().await.get(&form_id).cloned())
    }

    async fn update_form(
        &self,
        form: Form,
        expected_version: Option<i32>,
    ) -> Result<Form, StorageError> {
        let mut forms = self.forms.write().await;
        let existing = forms
            .get_mut(&form.id)
            .ok_or_else(|| StorageError::not_found("Form", form.id))?;

        if let Some(expected) = expected_version {
            if existing.version != expected {
                return Err(StorageError::VersionConflict {
                    entity_type: "Form".to_string(),
                    entity_id: form.id.to_string(),
                    expected_version: expected,
                    current_version: existing.version,
                });
            }
        }

        let steps = existing.steps.clone();
        let marketing = existing.marketing.clone();
        let success_modal = existing.success_modal.clone();
        let version = existing.version + 1;
        *existing = Form {
            steps,
            marketing,
            success_modal,
            version,
            updated_at: Utc::now(),
            ..form
        };
        Ok(existing.clone())
    }

    async fn replace_steps(
        &self,
        form_id: Uuid,
        steps: Vec<FormStep>,
    ) -> Result<(), StorageError> {
        let mut forms = self.forms.write().await;
        let form = forms
            .get_mut(&form_id)
            .ok_or_else(|| StorageError::not_found("Form", form_id))?;
        form.steps = steps;
        form.updated_at = Utc::now();
        Ok(())
    }

    async fn update_marketing(
        &self,
        form_id: Uuid,
        marketing: MarketingConfig,
    ) -> Result<(), StorageError> {
        let mut forms = self.forms.write().await;
        let form = forms
            .get_mut(&form_id)
            .ok_or_else(|| StorageError::not_found("Form", form_id))?;
        form.marketing = marketing;
        form.updated_at = Utc::now();
        Ok(())
    }

    async fn update_success_modal(
        &self,
        form_id: Uuid,
        success_modal: SuccessModalConfig,
    ) -> Result<(), StorageError> {
        let mut forms = self.forms.write().await;
        let form = forms
            .get_mut(&form_id)
            .ok_or_else(|| StorageError::not_found("Form", form_id))?;
        form.success_modal = success_modal;
        form.updated_at = Utc::now();
        Ok(())
    }

    async fn get_session(
        &self,
        session_id: Uuid,
    ) -> Result<Option<ConversationSession>, StorageError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn create_session(
        &self,
        session: ConversationSession,
    ) -> Result<ConversationSession, StorageError> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StorageError> {
        self.conversations.write().await.push(conversation.clone());
        Ok(conversation)
    }

    async fn list_conversations(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<Conversation>, StorageError> {
        Ok(self
            .conversations
            .read()
            .await
            .iter()
            .filter(|c| c.session_id == session_id)
            .cloned()
            .collect())
    }
}
