//! Unit tests for model-reply extraction and decoding.

#[cfg(test)]
mod tests {
    use form_builder_api::api::models::Patch;
    use form_builder_api::api::services::error::AiError;
    use form_builder_api::api::services::response_parser::{
        extract_json_object, parse_analysis, parse_generation, parse_modification,
    };

    const FORM_JSON: &str = r##"{
        "title": "Contact Form",
        "description": "Get in touch",
        "theme": "default",
        "primaryColor": "#3b82f6",
        "steps": [
            {
                "title": "Contact Information",
                "fields": [
                    {"type": "text", "label": "Name", "required": true},
                    {"type": "email", "label": "Email", "required": true}
                ]
            }
        ],
        "suggestions": ["Add a message field"]
    }"##;

    #[test]
    fn test_extract_exact_object() {
        let extracted = extract_json_object(FORM_JSON).unwrap();
        assert_eq!(extracted, FORM_JSON.trim_end());
    }

    #[test]
    fn test_extract_object_surrounded_by_prose() {
        let raw = format!("Sure! Here is the form you asked for:\n{}", FORM_JSON);
        let extracted = extract_json_object(&raw).unwrap();
        let value: serde_json::Value = serde_json::from_str(extracted).unwrap();
        assert_eq!(value["title"], "Contact Form");
    }

    #[test]
    fn test_extract_object_inside_code_fence() {
        let raw = format!("```json\n{}\n```", FORM_JSON);
        let draft = parse_generation(&raw).unwrap();
        assert_eq!(draft.title, "Contact Form");
    }

    #[test]
    fn test_extract_fails_without_braces() {
        let err = extract_json_object("I could not generate a form, sorry.").unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[test]
    fn test_extract_fails_on_lone_closing_brace() {
        let err = extract_json_object("} nothing here").unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[test]
    fn test_parse_generation_decodes_fields() {
        let raw = format!("Here you go:\n{}", FORM_JSON);
        let draft = parse_generation(&raw).unwrap();
        assert_eq!(draft.title, "Contact Form");
        assert_eq!(draft.theme.as_deref(), Some("default"));
        assert_eq!(draft.primary_color.as_deref(), Some("#3b82f6"));
        assert_eq!(draft.steps.len(), 1);
        assert_eq!(draft.steps[0].fields.len(), 2);
        assert_eq!(draft.steps[0].fields[1].field_type, "email");
        assert!(draft.steps[0].fields[1].is_required());
        assert_eq!(draft.suggestions, vec!["Add a message field"]);
    }

    #[test]
    fn test_parse_generation_fails_on_broken_json() {
        let err = parse_generation("{\"title\": \"Oops\"").unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[test]
    fn test_parse_modification_distinguishes_absent_from_null() {
        let raw = r#"{
            "modifications": {"title": "Renamed", "description": null},
            "changes": ["Renamed the form", "Cleared the description"],
            "suggestions": []
        }"#;
        let reply = parse_modification(raw).unwrap();
        assert_eq!(reply.modifications.title.as_deref(), Some("Renamed"));
        assert_eq!(reply.modifications.description, Patch::Clear);
        // Absent keys stay untouched.
        assert!(reply.modifications.theme.is_none());
        assert!(reply.modifications.steps.is_none());
        assert_eq!(reply.changes.len(), 2);
    }

    #[test]
    fn test_parse_modification_defaults_missing_sections() {
        let reply = parse_modification(r#"{"modifications": {}}"#).unwrap();
        assert!(reply.modifications.is_empty());
        assert!(reply.changes.is_empty());
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn test_parse_analysis_decodes_all_dimensions() {
        let raw = r#"Analysis complete.
        {
            "analysis": {
                "accessibility": "Labels are present",
                "ux": "Short and focused",
                "conversion": "Low friction",
                "seo": "Title could be more descriptive"
            },
            "recommendations": ["Add aria descriptions"],
            "suggestedImprovements": [
                {"type": "accessibility", "suggestion": "Add aria-labels", "priority": "high", "impact": "Screen reader support"}
            ]
        }"#;
        let reply = parse_analysis(raw).unwrap();
        assert_eq!(reply.analysis.accessibility, "Labels are present");
        assert_eq!(reply.analysis.seo, "Title could be more descriptive");
        assert_eq!(reply.recommendations.len(), 1);
        assert_eq!(reply.suggested_improvements.len(), 1);
        assert_eq!(reply.suggested_improvements[0].improvement_type, "accessibility");
        assert_eq!(reply.suggested_improvements[0].priority, "high");
    }
}
