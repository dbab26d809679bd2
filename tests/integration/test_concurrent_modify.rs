//! Concurrency behavior of the modify pipeline.
//!
//! The pipeline runs read-modify-write without optimistic locking, so two
//! overlapping modifies resolve last-writer-wins: the final form matches
//! exactly one of the two deltas, never a corrupted blend of both.

use async_trait::async_trait;
use form_builder_api::api::models::{FieldType, Form, FormField, FormStep};
use form_builder_api::api::services::error::LlmError;
use form_builder_api::api::services::{AiFormService, LlmClient, ModifyFormRequest};
use form_builder_api::api::storage::{FormStore, MemoryFormStore, StorageError};
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

async fn seed_form(store: &MemoryFormStore, user: Uuid) -> Form {
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
    form
}

fn modify_request(form_id: Uuid, instructions: &str) -> ModifyFormRequest {
    ModifyFormRequest {
        form_id,
        instructions: instructions.to_string(),
        options: None,
        session_id: None,
    }
}

fn delta_reply(title: &str, color: &str) -> String {
    format!(
        r#"{{"modifications": {{"title": "{}", "primaryColor": "{}"}}, "changes": ["Retitled and recolored"]}}"#,
        title, color
    )
}

#[tokio::test]
async fn test_concurrent_modifies_resolve_to_one_complete_delta() {
    let store = Arc::new(MemoryFormStore::new());
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let svc_a = AiFormService::new(
        Arc::new(StubLlm {
            reply: delta_reply("Title A", "#ff0000"),
        }),
        store.clone(),
    );
    let svc_b = AiFormService::new(
        Arc::new(StubLlm {
            reply: delta_reply("Title B", "#00ff00"),
        }),
        store.clone(),
    );

    let (a, b) = tokio::join!(
        svc_a.modify_form(user, modify_request(form.id, "Recolor the form red")),
        svc_b.modify_form(user, modify_request(form.id, "Recolor the form green")),
    );
    a.unwrap();
    b.unwrap();

    let stored = store.get_form(form.id).await.unwrap().unwrap();
    let matches_a = stored.title == "Title A" && stored.primary_color == "#ff0000";
    let matches_b = stored.title == "Title B" && stored.primary_color == "#00ff00";
    assert!(
        matches_a || matches_b,
        "final form must match exactly one delta, got {} / {}",
        stored.title,
        stored.primary_color
    );
    // Both writes landed.
    assert_eq!(stored.version, form.version + 2);
    // Steps were untouched by either delta.
    assert_eq!(stored.steps, form.steps);
}

#[tokio::test]
async fn test_store_rejects_stale_expected_version() {
    let store = MemoryFormStore::new();
    let user = Uuid::new_v4();
    let form = seed_form(&store, user).await;

    let mut first = form.clone();
    first.title = "First writer".to_string();
    store
        .update_form(first, Some(form.version))
        .await
        .unwrap();

    let mut second = form.clone();
    second.title = "Second writer".to_string();
    let err = store
        .update_form(second, Some(form.version))
        .await
        .unwrap_err();
    match err {
        StorageError::VersionConflict {
            expected_version,
            current_version,
            ..
        } => {
            assert_eq!(expected_version, form.version);
            assert_eq!(current_version, form.version + 1);
        }
        other => panic!("expected a version conflict, got {:?}", other),
    }
}
