//! Prompt construction for the three pipeline operations.
//!
//! Prompts are deterministic for identical inputs: no timestamps, no
//! randomness, and user-supplied text is embedded verbatim and never
//! truncated. Each prompt spells out the exact JSON reply shape and ends
//! with a JSON-only instruction, because the model is not guaranteed to
//! honor it (the response parser tolerates surrounding prose).

use crate::models::{AnalysisType, FieldType, Form, FormTheme};
use serde::Deserialize;

/// Options accepted by the generate operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub include_marketing: bool,
    #[serde(default)]
    pub language: Option<String>,
}

/// Options accepted by the modify operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationOptions {
    #[serde(default)]
    pub preserve_data: bool,
    #[serde(default)]
    pub language: Option<String>,
}

fn field_types_list() -> String {
    FieldType::SUPPORTED.join(", ")
}

fn themes_list() -> String {
    FormTheme::SUPPORTED.join(", ")
}

/// Build the prompt for generating a brand-new form from a description.
pub fn build_generation_prompt(description: &str, options: &GenerationOptions) -> String {
    let theme = options.theme.as_deref().unwrap_or("default");
    let primary_color = options.primary_color.as_deref().unwrap_or("#3b82f6");
    let language = options.language.as_deref().unwrap_or("en");
    let marketing_note = if options.include_marketing {
        "Include a marketing block with a short headline and description promoting the form."
    } else {
        "Set the marketing block to disabled."
    };

    format!(
        r##"You are an expert form designer. Create a multi-step form definition from the following description.

Description:
{description}

Requirements:
- Respond in language: {language}
- Preferred theme: {theme} (supported themes: {themes})
- Preferred primary color: {primary_color} (hex)
- Supported field types: {field_types}
- Fields of type select or radio MUST include a non-empty "options" array.
- Group related fields into steps; every step needs a title and at least one field.
- {marketing_note}

Return your response as JSON with exactly this shape:
{{
    "title": "form title",
    "description": "short form description",
    "theme": "one of: {themes}",
    "primaryColor": "#rrggbb",
    "steps": [
        {{
            "title": "step title",
            "fields": [
                {{
                    "type": "one of: {field_types}",
                    "label": "field label",
                    "placeholder": "optional placeholder",
                    "required": true,
                    "validation": {{ "minLength": 0, "maxLength": 100, "pattern": "optional regex" }},
                    "options": [ {{ "label": "Option label", "value": "option_value" }} ]
                }}
            ]
        }}
    ],
    "marketing": {{ "enabled": false, "headline": "optional", "description": "optional" }},
    "successModal": {{ "enabled": true, "title": "Thank you!", "message": "confirmation message" }},
    "suggestions": [ "follow-up improvement suggestion" ]
}}

Respond with JSON only. Do not include any prose, markdown, or commentary outside the JSON object."##,
        description = description,
        language = language,
        theme = theme,
        themes = themes_list(),
        primary_color = primary_color,
        field_types = field_types_list(),
        marketing_note = marketing_note,
    )
}

/// Build the prompt for modifying an existing form per edit instructions.
pub fn build_modification_prompt(
    form: &Form,
    instructions: &str,
    options: &ModificationOptions,
) -> String {
    let language = options.language.as_deref().unwrap_or("en");
    let preserve_note = if options.preserve_data {
        "Preserve existing fields and their ids wherever the instructions do not require changing them."
    } else {
        "You may restructure the form freely to satisfy the instructions."
    };
    // Canonical serde output keeps the prompt deterministic for a given form.
    let form_json = serde_json::to_string_pretty(form).unwrap_or_else(|_| "{}".to_string());

    format!(
        r##"You are an expert form designer. Apply the following edit instructions to an existing form definition.

Current form:
{form_json}

Instructions:
{instructions}

Requirements:
- Respond in language: {language}
- {preserve_note}
- Supported field types: {field_types}
- Supported themes: {themes}
- Fields of type select or radio MUST include a non-empty "options" array.
- Include in "modifications" ONLY the fields that should change; omit everything else.
- Use null for a field that should be cleared.

Return your response as JSON with exactly this shape:
{{
    "modifications": {{
        "title": "new title (only if changed)",
        "description": "new description, or null to clear",
        "theme": "one of: {themes}",
        "primaryColor": "#rrggbb",
        "steps": [ {{ "title": "step title", "fields": [ ... ] }} ],
        "marketing": {{ "enabled": true, "headline": "...", "description": "..." }},
        "successModal": {{ "enabled": true, "title": "...", "message": "..." }}
    }},
    "changes": [ "human-readable description of each change made" ],
    "suggestions": [ "follow-up improvement suggestion" ]
}}

Respond with JSON only. Do not include any prose, markdown, or commentary outside the JSON object."##,
        form_json = form_json,
        instructions = instructions,
        language = language,
        preserve_note = preserve_note,
        field_types = field_types_list(),
        themes = themes_list(),
    )
}

/// Build the prompt for analyzing an existing form.
pub fn build_analysis_prompt(form: &Form, analysis_type: AnalysisType) -> String {
    let form_json = serde_json::to_string_pretty(form).unwrap_or_else(|_| "{}".to_string());
    let focus = match analysis_type {
        AnalysisType::Comprehensive => {
            "Evaluate all four dimensions: accessibility, ux, conversion, and seo."
        }
        AnalysisType::Accessibility => "Focus primarily on accessibility.",
        AnalysisType::Ux => "Focus primarily on user experience.",
        AnalysisType::Conversion => "Focus primarily on conversion rate.",
        AnalysisType::Seo => "Focus primarily on search engine optimization.",
    };

    format!(
        r##"You are an expert in form usability, accessibility, conversion optimization, and SEO. Analyze the following form definition.

Form:
{form_json}

Analysis type: {analysis_type}
{focus}

Return your response as JSON with exactly this shape:
{{
    "analysis": {{
        "accessibility": "assessment of accessibility",
        "ux": "assessment of user experience",
        "conversion": "assessment of conversion potential",
        "seo": "assessment of SEO"
    }},
    "recommendations": [ "actionable recommendation" ],
    "suggestedImprovements": [
        {{
            "type": "category of the improvement",
            "suggestion": "what to change",
            "priority": "high|medium|low",
            "impact": "expected effect"
        }}
    ]
}}

Respond with JSON only. Do not include any prose, markdown, or commentary outside the JSON object."##,
        form_json = form_json,
        analysis_type = analysis_type.as_str(),
        focus = focus,
    )
}
