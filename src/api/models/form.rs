use super::enums::{FieldType, FormStatus, FormTheme};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable option on a select/radio field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Length/pattern constraints applied to a field's submitted value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One input element within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Mandatory and non-empty for select/radio types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

/// An ordered page within a form. Field order drives the wizard UI and
/// must be preserved across mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    pub id: Uuid,
    pub title: String,
    pub fields: Vec<FormField>,
}

/// Marketing block shown alongside a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Modal shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessModalConfig {
    pub enabled: bool,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl Default for SuccessModalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Thank you!".to_string(),
            message: "Your submission has been received.".to_string(),
            redirect_url: None,
        }
    }
}

/// A persisted multi-step form definition.
///
/// The slug is globally unique and immutable once assigned, except on
/// explicit regeneration. Steps are never empty once a form leaves draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slug: String,
    pub theme: FormTheme,
    pub primary_color: String,
    pub steps: Vec<FormStep>,
    pub marketing: MarketingConfig,
    pub success_modal: SuccessModalConfig,
    pub status: FormStatus,
    pub allow_multiple_submissions: bool,
    pub require_auth: bool,
    /// Optimistic-lock counter, incremented on every persisted update.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    pub fn new(user_id: Uuid, title: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description: None,
            slug,
            theme: FormTheme::default(),
            primary_color: "#3b82f6".to_string(),
            steps: Vec::new(),
            marketing: MarketingConfig::default(),
            success_modal: SuccessModalConfig::default(),
            status: FormStatus::Draft,
            allow_multiple_submissions: false,
            require_auth: false,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
