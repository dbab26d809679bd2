//! Integration tests for the analyze pipeline: read-only, no fallback.

use async_trait::async_trait;
use form_builder_api::api::models::{AnalysisType, ConversationType, FieldType, Form, FormField, FormStep};
use form_builder_api::api::services::error::{AiError, LlmError};
use form_builder_api::api::services::{AiFormService, AnalyzeFormRequest, LlmClient};
use form_builder_api::api::storage::{FormStore, MemoryFormStore};
use std::sync::Arc;
use uuid::Uuid;

struct StubLlm {
    reply: String,
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate_content(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.reply.clone())
    }
}

const ANALYSIS_REPLY: &str = r#"Here is my analysis.
{
    "analysis": {
        "accessibility": "All fields carry labels",
        "ux": "Single short step keeps friction low",
        "conversion": "Required email may deter casual visitors",
        "seo": "Title is generic"
    },
    "recommendations": ["Make the email field optional", "Use a more specific title"],
    "suggestedImprovements": [
        {"type": "conversion", "suggestion": "Make email optional", "priority": "medium", "impact": "Higher completion rate"}
    ]
}"#;

async fn seed_form(store: &MemoryFormStore, user: Uuid) -> Form {
    let mut form = Form::new(user, "Contact Form".to_string(), "contact-form".to_string());
    form.steps = vec![FormStep {
        id: Uuid::new_v4(),
        title: "Contact".to_string(),
        fields: vec![FormField {
            id: Uuid::new_v4(),
            field_type: FieldType::Email,
            label: "Email".to_string(),
            placeholder: None,
            required: true,
            validation: None,
            options: Vec::new(),
        }],
    }];
    store.create_form(form.clone()).await.unwrap();
    form
}

fn request(form_id: Uuid) -> AnalyzeFormRequest {
    AnalyzeFormRequest {
        form_id,
        analysis_type: None,
        session_id: None,
    }
}

#[tokio::test]
async fn test_analyze_decodes_all_dimensions() {
    let store = Arc::new(MemoryFormStore::new());
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: ANALYSIS_REPLY.to_string(),
        }),
        store,
    );

    let response = svc.analyze_form(user, request(form.id)).await.unwrap();
    assert!(response.success);
    assert_eq!(response.reply.analysis.accessibility, "All fields carry labels");
    assert_eq!(response.reply.analysis.seo, "Title is generic");
    assert_eq!(response.reply.recommendations.len(), 2);
    assert_eq!(response.reply.suggested_improvements.len(), 1);
    assert_eq!(response.reply.suggested_improvements[0].priority, "medium");
}

#[tokio::test]
async fn test_analyze_leaves_form_untouched() {
    let store = Arc::new(MemoryFormStore::new());
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: ANALYSIS_REPLY.to_string(),
        }),
        store.clone(),
    );
    svc.analyze_form(user, request(form.id)).await.unwrap();

    let stored = store.get_form(form.id).await.unwrap().unwrap();
    assert_eq!(stored, form);
    assert_eq!(stored.version, form.version);
}

#[tokio::test]
async fn test_analyze_records_conversation_with_form_id() {
    let store = Arc::new(MemoryFormStore::new());
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: ANALYSIS_REPLY.to_string(),
        }),
        store.clone(),
    );
    let mut req = request(form.id);
    req.analysis_type = Some(AnalysisType::Accessibility);
    let response = svc.analyze_form(user, req).await.unwrap();

    let session_id = response.session_id.unwrap();
    let session = store.get_session(session_id).await.unwrap().unwrap();
    assert!(session.title.starts_with("Analyze: "));

    let conversations = store.list_conversations(session_id).await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].conversation_type, ConversationType::Analyze);
    assert_eq!(conversations[0].form_id, Some(form.id));
    assert_eq!(
        conversations[0].response_metadata["analysisType"],
        "accessibility"
    );
}

#[tokio::test]
async fn test_analyze_unparseable_reply_surfaces_parse_error() {
    let store = Arc::new(MemoryFormStore::new());
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: "The form looks fine to me.".to_string(),
        }),
        store,
    );

    let err = svc.analyze_form(user, request(form.id)).await.unwrap_err();
    assert!(matches!(err, AiError::Parse(_)));
}

#[tokio::test]
async fn test_analyze_unknown_form_is_not_found() {
    let store = Arc::new(MemoryFormStore::new());
    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: ANALYSIS_REPLY.to_string(),
        }),
        store,
    );

    let err = svc
        .analyze_form(Uuid::new_v4(), request(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::NotFound(_)));
}

#[tokio::test]
async fn test_analyze_foreign_form_is_permission_error() {
    let store = Arc::new(MemoryFormStore::new());
    let owner = Uuid::new_v4();
    let form = seed_form(&store, owner).await;

    let svc = AiFormService::new(
        Arc::new(StubLlm {
            reply: ANALYSIS_REPLY.to_string(),
        }),
        store,
    );

    let err = svc
        .analyze_form(Uuid::new_v4(), request(form.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Permission(_)));
}
