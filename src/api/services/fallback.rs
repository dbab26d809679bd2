//! Deterministic fallback form.
//!
//! Substituted when the generate pipeline cannot produce a valid result,
//! so the user-facing generate operation never returns a hard failure. The
//! result is schema-valid by construction; results built from it carry
//! `generatedBy: "fallback"` instead of the genuine model tag.

use crate::models::{FieldDraft, FormDraft, MarketingDraft, StepDraft, SuccessModalDraft};
use serde_json::json;

/// Build the hard-coded default form: one step with required name and
/// email fields, marketing disabled, success modal enabled.
pub fn default_form(title: &str) -> FormDraft {
    FormDraft {
        title: title.to_string(),
        description: Some("Please fill in your contact details.".to_string()),
        theme: Some("default".to_string()),
        primary_color: Some("#3b82f6".to_string()),
        steps: vec![StepDraft {
            title: "Contact Information".to_string(),
            fields: vec![
                FieldDraft {
                    field_type: "text".to_string(),
                    label: "Name".to_string(),
                    placeholder: Some("Your full name".to_string()),
                    required: Some(json!(true)),
                    validation: None,
                    options: Vec::new(),
                },
                FieldDraft {
                    field_type: "email".to_string(),
                    label: "Email".to_string(),
                    placeholder: Some("you@example.com".to_string()),
                    required: Some(json!(true)),
                    validation: None,
                    options: Vec::new(),
                },
            ],
        }],
        marketing: Some(MarketingDraft {
            enabled: false,
            headline: None,
            description: None,
        }),
        success_modal: Some(SuccessModalDraft {
            enabled: true,
            title: Some("Thank you!".to_string()),
            message: Some("Your submission has been received.".to_string()),
            redirect_url: None,
        }),
        suggestions: Vec::new(),
    }
}
