//! AI form-synthesis orchestrator.
//!
//! Sequences the pipeline per operation: prompt, model call, parse,
//! validate, mutate, record. The failure policy is asymmetric and
//! deliberate: `generate` degrades to the deterministic fallback form on
//! parse/structure/upstream failures, while `modify` and `analyze` surface
//! every error to the caller. Conversation recording runs strictly after a
//! successful mutation and its own failure is logged, never fatal.

use super::conversation_recorder::{ConversationRecorder, InteractionRecord};
use super::error::AiError;
use super::fallback::default_form;
use super::form_mutator::FormMutator;
use super::llm_client::LlmClient;
use super::prompt_builder::{
    GenerationOptions, ModificationOptions, build_analysis_prompt, build_generation_prompt,
    build_modification_prompt,
};
use super::response_parser::{
    AnalysisReply, parse_analysis, parse_generation, parse_modification,
};
use crate::models::{AnalysisType, ConversationType, Form, FormDraft};
use crate::storage::FormStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

/// Title used when the fallback form replaces a failed generation.
const FALLBACK_FORM_TITLE: &str = "Contact Form";

/// Tag for results produced by the genuine model.
const GENERATED_BY_MODEL: &str = "gemini";
/// Tag for results produced by the deterministic fallback.
const GENERATED_BY_FALLBACK: &str = "fallback";

/// Request body of the generate operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFormRequest {
    pub description: String,
    #[serde(default)]
    pub options: Option<GenerationOptions>,
    /// Reuse an existing editing-thread session.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// Regenerate onto an existing form instead of creating a new one.
    #[serde(default)]
    pub form_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFormResponse {
    pub success: bool,
    pub form: Form,
    pub suggestions: Vec<String>,
    pub generated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub is_new_form: bool,
}

/// Request body of the modify operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyFormRequest {
    pub form_id: Uuid,
    pub instructions: String,
    #[serde(default)]
    pub options: Option<ModificationOptions>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyFormResponse {
    pub success: bool,
    pub form: Form,
    pub suggestions: Vec<String>,
    pub changes: Vec<String>,
    pub generated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// Request body of the analyze operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFormRequest {
    pub form_id: Uuid,
    #[serde(default)]
    pub analysis_type: Option<AnalysisType>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFormResponse {
    pub success: bool,
    #[serde(flatten)]
    pub reply: AnalysisReply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// The AI form pipeline service.
pub struct AiFormService {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn FormStore>,
    mutator: FormMutator,
    recorder: ConversationRecorder,
}

impl AiFormService {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<dyn FormStore>) -> Self {
        Self {
            llm,
            mutator: FormMutator::new(store.clone()),
            recorder: ConversationRecorder::new(store.clone()),
            store,
        }
    }

    /// Generate a form from a free-text description.
    ///
    /// Observably total for model-side failures: parse, structure, and
    /// upstream errors degrade to the fallback form tagged
    /// `generatedBy: "fallback"`. Store unavailability stays fatal.
    pub async fn generate_form(
        &self,
        user_id: Uuid,
        request: GenerateFormRequest,
    ) -> Result<GenerateFormResponse, AiError> {
        check_length("description", &request.description, 10, 2000)?;
        let options = request.options.clone().unwrap_or_default();
        let prompt = build_generation_prompt(&request.description, &options);
        let started = Instant::now();

        let mut raw_response = String::new();
        let mut generated_by = GENERATED_BY_MODEL;
        let draft: FormDraft = match self.llm.generate_content(&prompt).await {
            Ok(raw) => {
                raw_response = raw;
                match parse_generation(&raw_response) {
                    Ok(draft) => draft,
                    Err(e) => {
                        warn!("Falling back to default form: {}", e);
                        generated_by = GENERATED_BY_FALLBACK;
                        default_form(FALLBACK_FORM_TITLE)
                    }
                }
            }
            Err(e) => {
                warn!("Falling back to default form: {}", e);
                generated_by = GENERATED_BY_FALLBACK;
                default_form(FALLBACK_FORM_TITLE)
            }
        };

        let form = match self
            .mutator
            .apply_generation(&draft, user_id, request.form_id)
            .await
        {
            Ok(form) => form,
            Err(e) if generated_by == GENERATED_BY_MODEL && e.is_recoverable_for_generate() => {
                // The model draft failed structure validation; nothing was
                // written, so retry once with the fallback draft.
                warn!("Falling back to default form: {}", e);
                generated_by = GENERATED_BY_FALLBACK;
                self.mutator
                    .apply_generation(&default_form(FALLBACK_FORM_TITLE), user_id, request.form_id)
                    .await?
            }
            Err(e) => return Err(e),
        };

        let is_new_form = request.form_id.is_none();
        let suggestions = if generated_by == GENERATED_BY_MODEL {
            draft.suggestions.clone()
        } else {
            Vec::new()
        };

        let session_id = self
            .record(
                user_id,
                request.session_id,
                InteractionRecord {
                    conversation_type: ConversationType::Generate,
                    form_id: Some(form.id),
                    user_message: &request.description,
                    llm_response: &raw_response,
                    prompt_used: &prompt,
                    response_metadata: json!({
                        "generatedBy": generated_by,
                        "isNewForm": is_new_form,
                        "formTitle": form.title,
                    }),
                    processing_time_ms: started.elapsed().as_millis() as i64,
                },
            )
            .await;

        Ok(GenerateFormResponse {
            success: true,
            form,
            suggestions,
            generated_by: generated_by.to_string(),
            session_id,
            is_new_form,
        })
    }

    /// Modify an existing form per free-text edit instructions. No
    /// fallback: every failure surfaces to the caller.
    pub async fn modify_form(
        &self,
        user_id: Uuid,
        request: ModifyFormRequest,
    ) -> Result<ModifyFormResponse, AiError> {
        check_length("instructions", &request.instructions, 10, 1000)?;
        let form = self.owned_form(user_id, request.form_id).await?;
        let options = request.options.clone().unwrap_or_default();
        let prompt = build_modification_prompt(&form, &request.instructions, &options);
        let started = Instant::now();

        let raw_response = self.llm.generate_content(&prompt).await?;
        let reply = parse_modification(&raw_response)?;
        let updated = self
            .mutator
            .apply_modification(&form, &reply.modifications)
            .await?;

        let session_id = self
            .record(
                user_id,
                request.session_id,
                InteractionRecord {
                    conversation_type: ConversationType::Modify,
                    form_id: Some(updated.id),
                    user_message: &request.instructions,
                    llm_response: &raw_response,
                    prompt_used: &prompt,
                    response_metadata: json!({
                        "generatedBy": GENERATED_BY_MODEL,
                        "changes": reply.changes,
                    }),
                    processing_time_ms: started.elapsed().as_millis() as i64,
                },
            )
            .await;

        Ok(ModifyFormResponse {
            success: true,
            form: updated,
            suggestions: reply.suggestions,
            changes: reply.changes,
            generated_by: GENERATED_BY_MODEL.to_string(),
            session_id,
        })
    }

    /// Analyze an existing form. No mutation, no fallback.
    pub async fn analyze_form(
        &self,
        user_id: Uuid,
        request: AnalyzeFormRequest,
    ) -> Result<AnalyzeFormResponse, AiError> {
        let form = self.owned_form(user_id, request.form_id).await?;
        let analysis_type = request.analysis_type.unwrap_or_default();
        let prompt = build_analysis_prompt(&form, analysis_type);
        let started = Instant::now();

        let raw_response = self.llm.generate_content(&prompt).await?;
        let reply = parse_analysis(&raw_response)?;

        let session_id = self
            .record(
                user_id,
                request.session_id,
                InteractionRecord {
                    conversation_type: ConversationType::Analyze,
                    form_id: Some(form.id),
                    user_message: &format!("Analyze form: {}", analysis_type.as_str()),
                    llm_response: &raw_response,
                    prompt_used: &prompt,
                    response_metadata: json!({
                        "analysisType": analysis_type.as_str(),
                        "recommendationCount": reply.recommendations.len(),
                    }),
                    processing_time_ms: started.elapsed().as_millis() as i64,
                },
            )
            .await;

        Ok(AnalyzeFormResponse {
            success: true,
            reply,
            session_id,
        })
    }

    async fn owned_form(&self, user_id: Uuid, form_id: Uuid) -> Result<Form, AiError> {
        let form = self
            .store
            .get_form(form_id)
            .await?
            .ok_or_else(|| AiError::NotFound("Form".to_string()))?;
        if form.user_id != user_id {
            return Err(AiError::Permission(
                "form belongs to another user".to_string(),
            ));
        }
        Ok(form)
    }

    /// Record the interaction; a recorder failure must never roll back an
    /// already-persisted form, so it is logged and swallowed. The response
    /// then carries no session id: nothing was appended, so echoing the
    /// supplied id would imply an audit record that does not exist.
    async fn record(
        &self,
        user_id: Uuid,
        session_id: Option<Uuid>,
        record: InteractionRecord<'_>,
    ) -> Option<Uuid> {
        match self
            .recorder
            .record_interaction(user_id, session_id, record)
            .await
        {
            Ok(session) => Some(session.id),
            Err(e) => {
                warn!("Failed to record conversation: {}", e);
                None
            }
        }
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AiError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AiError::Validation(format!(
            "{} must be between {} and {} characters, got {}",
            field, min, max, len
        )));
    }
    Ok(())
}
