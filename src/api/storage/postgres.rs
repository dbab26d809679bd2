//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the FormStore trait.
//! Step fields and the marketing/success-modal blocks are stored as JSONB;
//! queries are runtime-checked so the crate builds without a live database.

use super::{StorageError, traits::FormStore};
use crate::models::{
    Conversation, ConversationSession, ConversationType, Form, FormField, FormStatus, FormStep,
    FormTheme, MarketingConfig, SuccessModalConfig,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

/// PostgreSQL storage backend implementation.
pub struct PostgresFormStore {
    pool: PgPool,
}

impl PostgresFormStore {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn form_from_row(row: &PgRow) -> Result<Form, StorageError> {
        let theme: String = row.try_get("theme").map_err(db_err)?;
        let status: String = row.try_get("status").map_err(db_err)?;
        let marketing: serde_json::Value = row.try_get("marketing").map_err(db_err)?;
        let success_modal: serde_json::Value = row.try_get("success_modal").map_err(db_err)?;

        Ok(Form {
            id: row.try_get("id").map_err(db_err)?,
            user_id: row.try_get("user_id").map_err(db_err)?,
            title: row.try_get("title").map_err(db_err)?,
            description: row.try_get("description").map_err(db_err)?,
            slug: row.try_get("slug").map_err(db_err)?,
            theme: FormTheme::from_str(&theme).unwrap_or_default(),
            primary_color: row.try_get("primary_color").map_err(db_err)?,
            steps: Vec::new(),
            marketing: serde_json::from_value(marketing)
                .map_err(|e| StorageError::Other(format!("Bad marketing JSON: {}", e)))?,
            success_modal: serde_json::from_value(success_modal)
                .map_err(|e| StorageError::Other(format!("Bad success modal JSON: {}", e)))?,
            status: FormStatus::from_str(&status).unwrap_or(FormStatus::Draft),
            allow_multiple_submissions: row
                .try_get("allow_multiple_submissions")
                .map_err(db_err)?,
            require_auth: row.try_get("require_auth").map_err(db_err)?,
            version: row.try_get("version").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
        })
    }

    async fn load_steps(&self, form_id: Uuid) -> Result<Vec<FormStep>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, fields
            FROM form_steps
            WHERE form_id = $1
            ORDER BY position
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut steps = Vec::with_capacity(rows.len());
        for row in &rows {
            let fields: serde_json::Value = row.try_get("fields").map_err(db_err)?;
            let fields: Vec<FormField> = serde_json::from_value(fields)
                .map_err(|e| StorageError::Other(format!("Bad step fields JSON: {}", e)))?;
            steps.push(FormStep {
                id: row.try_get("id").map_err(db_err)?,
                title: row.try_get("title").map_err(db_err)?,
                fields,
            });
        }
        Ok(steps)
    }
}

fn db_err(e: sqlx::Error) -> StorageError {
    StorageError::ConnectionError(e.to_string())
}

fn json_err(e: serde_json::Error) -> StorageError {
    StorageError::Other(format!("Serialization error: {}", e))
}

#[async_trait]
impl FormStore for PostgresFormStore {
    async fn create_form(&self, form: Form) -> Result<Form, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO forms
                (id, user_id, title, description, slug, theme, primary_color,
                 marketing, success_modal, status, allow_multiple_submissions,
                 require_auth, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(form.id)
        .bind(form.user_id)
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.slug)
        .bind(form.theme.as_str())
        .bind(&form.primary_color)
        .bind(serde_json::to_value(&form.marketing).map_err(json_err)?)
        .bind(serde_json::to_value(&form.success_modal).map_err(json_err)?)
        .bind(form.status.as_str())
        .bind(form.allow_multiple_submissions)
        .bind(form.require_auth)
        .bind(form.version)
        .bind(form.created_at)
        .bind(form.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.replace_steps(form.id, form.steps.clone()).await?;
        Ok(form)
    }

    async fn get_form(&self, form_id: Uuid) -> Result<Option<Form>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, slug, theme, primary_color,
                   marketing, success_modal, status, allow_multiple_submissions,
                   require_auth, version, created_at, updated_at
            FROM forms
            WHERE id = $1
            "#,
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(row) => {
                let mut form = Self::form_from_row(&row)?;
                form.steps = self.load_steps(form_id).await?;
                Ok(Some(form))
            }
            None => Ok(None),
        }
    }

    async fn update_form(
        &self,
        form: Form,
        expected_version: Option<i32>,
    ) -> Result<Form, StorageError> {
        let now = Utc::now();
        let new_version = form.version + 1;

        let result = match expected_version {
            Some(expected) => sqlx::query(
                r#"
                UPDATE forms
                SET title = $1, description = $2, slug = $3, theme = $4,
                    primary_color = $5, status = $6,
                    allow_multiple_submissions = $7, require_auth = $8,
                    version = $9, updated_at = $10
                WHERE id = $11 AND version = $12
                "#,
            )
            .bind(&form.title)
            .bind(&form.description)
            .bind(&form.slug)
            .bind(form.theme.as_str())
            .bind(&form.primary_color)
            .bind(form.status.as_str())
            .bind(form.allow_multiple_submissions)
            .bind(form.require_auth)
            .bind(new_version)
            .bind(now)
            .bind(form.id)
            .bind(expected)
            .execute(&self.pool)
            .await
            .map_err(db_err)?,
            None => sqlx::query(
                r#"
                UPDATE forms
                SET title = $1, description = $2, slug = $3, theme = $4,
                    primary_color = $5, status = $6,
                    allow_multiple_submissions = $7, require_auth = $8,
                    version = version + 1, updated_at = $9
                WHERE id = $10
                "#,
            )
            .bind(&form.title)
            .bind(&form.description)
            .bind(&form.slug)
            .bind(form.theme.as_str())
            .bind(&form.primary_color)
            .bind(form.status.as_str())
            .bind(form.allow_multiple_submissions)
            .bind(form.require_auth)
            .bind(now)
            .bind(form.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?,
        };

        if result.rows_affected() == 0 {
            // Distinguish a missing row from a version mismatch.
            let current = sqlx::query("SELECT version FROM forms WHERE id = $1")
                .bind(form.id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
            return match (current, expected_version) {
                (Some(row), Some(expected)) => Err(StorageError::VersionConflict {
                    entity_type: "Form".to_string(),
                    entity_id: form.id.to_string(),
                    expected_version: expected,
                    current_version: row.try_get("version").map_err(db_err)?,
                }),
                _ => Err(StorageError::not_found("Form", form.id)),
            };
        }

        self.get_form(form.id)
            .await?
            .ok_or_else(|| StorageError::not_found("Form", form.id))
    }

    async fn replace_steps(
        &self,
        form_id: Uuid,
        steps: Vec<FormStep>,
    ) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM form_steps WHERE form_id = $1")
            .bind(form_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        for (position, step) in steps.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO form_steps (id, form_id, position, title, fields)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(step.id)
            .bind(form_id)
            .bind(position as i32)
            .bind(&step.title)
            .bind(serde_json::to_value(&step.fields).map_err(json_err)?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        }
        Ok(())
    }

    async fn update_marketing(
        &self,
        form_id: Uuid,
        marketing: MarketingConfig,
    ) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE forms SET marketing = $1, updated_at = $2 WHERE id = $3")
            .bind(serde_json::to_value(&marketing).map_err(json_err)?)
            .bind(Utc::now())
            .bind(form_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Form", form_id));
        }
        Ok(())
    }

    async fn update_success_modal(
        &self,
        form_id: Uuid,
        success_modal: SuccessModalConfig,
    ) -> Result<(), StorageError> {
        let result =
            sqlx::query("UPDATE forms SET success_modal = $1, updated_at = $2 WHERE id = $3")
                .bind(serde_json::to_value(&success_modal).map_err(json_err)?)
                .bind(Utc::now())
                .bind(form_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Form", form_id));
        }
        Ok(())
    }

    async fn get_session(
        &self,
        session_id: Uuid,
    ) -> Result<Option<ConversationSession>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, is_active, created_at, updated_at
            FROM conversation_sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        match row {
            Some(row) => Ok(Some(ConversationSession {
                id: row.try_get("id").map_err(db_err)?,
                user_id: row.try_get("user_id").map_err(db_err)?,
                title: row.try_get("title").map_err(db_err)?,
                description: row.try_get("description").map_err(db_err)?,
                is_active: row.try_get("is_active").map_err(db_err)?,
                created_at: row.try_get("created_at").map_err(db_err)?,
                updated_at: row.try_get("updated_at").map_err(db_err)?,
            })),
            None => Ok(None),
        }
    }

    async fn create_session(
        &self,
        session: ConversationSession,
    ) -> Result<ConversationSession, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_sessions
                (id, user_id, title, description, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.is_active)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(session)
    }

    async fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO conversations
                (id, session_id, conversation_type, form_id, user_message,
                 llm_response, prompt_used, response_metadata, tokens_used,
                 processing_time_ms, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(conversation.id)
        .bind(conversation.session_id)
        .bind(conversation.conversation_type.as_str())
        .bind(conversation.form_id)
        .bind(&conversation.user_message)
        .bind(&conversation.llm_response)
        .bind(&conversation.prompt_used)
        .bind(&conversation.response_metadata)
        .bind(conversation.tokens_used)
        .bind(conversation.processing_time_ms)
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(conversation)
    }

    async fn list_conversations(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<Conversation>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, conversation_type, form_id, user_message,
                   llm_response, prompt_used, response_metadata, tokens_used,
                   processing_time_ms, created_at
            FROM conversations
            WHERE session_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut conversations = Vec::with_capacity(rows.len());
        for row in &rows {
            let conversation_type: String = row.try_get("conversation_type").map_err(db_err)?;
            let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_err)?;
            conversations.push(Conversation {
                id: row.try_get("id").map_err(db_err)?,
                session_id: row.try_get("session_id").map_err(db_err)?,
                conversation_type: ConversationType::from_str(&conversation_type).ok_or_else(
                    || StorageError::Other(format!("Bad conversation type: {}", conversation_type)),
                )?,
                form_id: row.try_get("form_id").map_err(db_err)?,
                user_message: row.try_get("user_message").map_err(db_err)?,
                llm_response: row.try_get("llm_response").map_err(db_err)?,
                prompt_used: row.try_get("prompt_used").map_err(db_err)?,
                response_metadata: row.try_get("response_metadata").map_err(db_err)?,
                tokens_used: row.try_get("tokens_used").map_err(db_err)?,
                processing_time_ms: row.try_get("processing_time_ms").map_err(db_err)?,
                created_at,
            });
        }
        Ok(conversations)
    }
}
