//! HTTP-level integration tests for the AI routes, using a TestServer over
//! the real router with stubbed state.

use async_trait::async_trait;
use axum_test::TestServer;
use form_builder_api::api::models::{FieldType, Form, FormField, FormStep};
use form_builder_api::api::routes::{AppState, create_api_router};
use form_builder_api::api::services::error::LlmError;
use form_builder_api::api::services::LlmClient;
use form_builder_api::api::storage::{FormStore, MemoryFormStore};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};
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

const GENERATION_REPLY: &str = r##"{
    "title": "Contact Form",
    "theme": "default",
    "primaryColor": "#3b82f6",
    "steps": [
        {"title": "Contact", "fields": [
            {"type": "text", "label": "Name", "required": true},
            {"type": "email", "label": "Email", "required": true}
        ]}
    ],
    "suggestions": ["Add a message field"]
}"##;

fn test_server(store: Arc<MemoryFormStore>, reply: &str) -> TestServer {
    let state = AppState::with_parts(
        store,
        Arc::new(StubLlm {
            reply: reply.to_string(),
        }),
    );
    let app = create_api_router().with_state(state);
    TestServer::new(app).expect("test server should start")
}

fn user_header() -> (HeaderName, HeaderValue, Uuid) {
    let user = Uuid::new_v4();
    let value = HeaderValue::from_str(&user.to_string()).expect("uuid is a valid header value");
    (HeaderName::from_static("x-user-id"), value, user)
}

#[tokio::test]
async fn test_generate_route_happy_path() {
    let store = Arc::new(MemoryFormStore::new());
    let server = test_server(store.clone(), GENERATION_REPLY);
    let (name, value, _user) = user_header();

    let response = server
        .post("/ai/generate")
        .add_header(name, value)
        .json(&json!({"description": "A contact form for my landscaping business"}))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["isNewForm"], true);
    assert_eq!(body["generatedBy"], "gemini");
    assert_eq!(body["form"]["title"], "Contact Form");
    assert_eq!(body["form"]["steps"][0]["fields"][0]["type"], "text");
    assert!(body["sessionId"].is_string());

    // The form landed in the store.
    let form_id: Uuid = body["form"]["id"].as_str().unwrap().parse().unwrap();
    assert!(store.get_form(form_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_generate_route_without_user_header_is_unauthorized() {
    let server = test_server(Arc::new(MemoryFormStore::new()), GENERATION_REPLY);

    let response = server
        .post("/ai/generate")
        .json(&json!({"description": "A contact form for my landscaping business"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_generate_route_short_description_is_bad_request() {
    let server = test_server(Arc::new(MemoryFormStore::new()), GENERATION_REPLY);
    let (name, value, _user) = user_header();

    let response = server
        .post("/ai/generate")
        .add_header(name, value)
        .json(&json!({"description": "short"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn test_modify_route_unknown_form_is_not_found() {
    let server = test_server(
        Arc::new(MemoryFormStore::new()),
        r#"{"modifications": {"title": "Renamed"}, "changes": []}"#,
    );
    let (name, value, _user) = user_header();

    let response = server
        .post("/ai/modify")
        .add_header(name, value)
        .json(&json!({
            "formId": Uuid::new_v4(),
            "instructions": "Rename the form please"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_modify_route_applies_delta() {
    let store = Arc::new(MemoryFormStore::new());
    let server = test_server(
        store.clone(),
        r#"{"modifications": {"title": "Renamed Form"}, "changes": ["Renamed the form"]}"#,
    );
    let (name, value, user) = user_header();

    let mut form = Form::new(user, "Original".to_string(), "original".to_string());
    form.steps = vec![FormStep {
        id: Uuid::new_v4(),
        title: "Step".to_string(),
        fields: vec![FormField {
            id: Uuid::new_v4(),
            field_type: FieldType::Text,
            label: "Name".to_string(),
            placeholder: None,
            required: true,
            validation: None,
            options: Vec::new(),
        }],
    }];
    store.create_form(form.clone()).await.unwrap();

    let response = server
        .post("/ai/modify")
        .add_header(name, value)
        .json(&json!({
            "formId": form.id,
            "instructions": "Rename the form please"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["form"]["title"], "Renamed Form");
    assert_eq!(body["changes"][0], "Renamed the form");
}

#[tokio::test]
async fn test_analyze_route_returns_report() {
    let store = Arc::new(MemoryFormStore::new());
    let server = test_server(
        store.clone(),
        r#"{
            "analysis": {"accessibility": "ok", "ux": "ok", "conversion": "ok", "seo": "ok"},
            "recommendations": ["Shorten the title"],
            "suggestedImprovements": []
        }"#,
    );
    let (name, value, user) = user_header();

    let mut form = Form::new(user, "Survey".to_string(), "survey".to_string());
    form.steps = vec![FormStep {
        id: Uuid::new_v4(),
        title: "Step".to_string(),
        fields: vec![FormField {
            id: Uuid::new_v4(),
            field_type: FieldType::Text,
            label: "Name".to_string(),
            placeholder: None,
            required: true,
            validation: None,
            options: Vec::new(),
        }],
    }];
    store.create_form(form.clone()).await.unwrap();

    let response = server
        .post("/ai/analyze")
        .add_header(name, value)
        .json(&json!({"formId": form.id}))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["ux"], "ok");
    assert_eq!(body["recommendations"][0], "Shorten the title");
}
