//! Tolerant extraction and decoding of model replies.
//!
//! Despite JSON-only instructions the model may wrap its reply in prose or
//! code fences, so extraction takes the largest brace-delimited span (first
//! `{` through the last `}`) and decodes that. The three operations share
//! the extraction mechanism and differ only in the expected top-level
//! shape.

use super::error::AiError;
use crate::models::{FormDraft, FormModifications};
use serde::Deserialize;

/// Decoded reply of the modify operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationReply {
    #[serde(default)]
    pub modifications: FormModifications,
    /// LLM-authored descriptions of what was altered; opaque strings, not
    /// machine-verified.
    #[serde(default)]
    pub changes: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// The four assessment dimensions of an analysis reply.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub struct AnalysisScores {
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub ux: String,
    #[serde(default)]
    pub conversion: String,
    #[serde(default)]
    pub seo: String,
}

/// One concrete improvement suggested by an analysis run.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedImprovement {
    #[serde(rename = "type", default)]
    pub improvement_type: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub impact: String,
}

/// Decoded reply of the analyze operation.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReply {
    #[serde(default)]
    pub analysis: AnalysisScores,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub suggested_improvements: Vec<SuggestedImprovement>,
}

/// Extract the largest brace-delimited span from a raw model reply.
pub fn extract_json_object(raw: &str) -> Result<&str, AiError> {
    let start = raw
        .find('{')
        .ok_or_else(|| AiError::Parse("no JSON object found in model response".to_string()))?;
    let end = raw
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| AiError::Parse("no JSON object found in model response".to_string()))?;
    Ok(&raw[start..=end])
}

fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, AiError> {
    let span = extract_json_object(raw)?;
    serde_json::from_str(span).map_err(|e| AiError::Parse(e.to_string()))
}

/// Parse a generate-operation reply into an unvalidated form draft.
pub fn parse_generation(raw: &str) -> Result<FormDraft, AiError> {
    decode(raw)
}

/// Parse a modify-operation reply.
pub fn parse_modification(raw: &str) -> Result<ModificationReply, AiError> {
    decode(raw)
}

/// Parse an analyze-operation reply.
pub fn parse_analysis(raw: &str) -> Result<AnalysisReply, AiError> {
    decode(raw)
}
