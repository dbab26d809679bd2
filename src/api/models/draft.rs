//! Unvalidated form definitions.
//!
//! Drafts are the loosely-typed shape shared by LLM output and
//! user-submitted form edits: field types and themes stay plain strings so
//! a disallowed value survives decoding and is rejected by the structure
//! validator with a named error instead of an opaque decode failure.

use super::form::{FieldOption, ValidationRules};
use serde::{Deserialize, Serialize};

/// One field as described by an untrusted payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Kept as raw JSON so a non-boolean value is a validation error, not a
    /// decode error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldDraft {
    pub fn is_required(&self) -> bool {
        self.required
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// One step as described by an untrusted payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingDraft {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessModalDraft {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A complete form definition as described by an untrusted payload, before
/// structure validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing: Option<MarketingDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_modal: Option<SuccessModalDraft>,
    /// Follow-up hints emitted alongside a generated form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
