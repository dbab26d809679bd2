//! Unit tests for the deterministic fallback form.

#[cfg(test)]
mod tests {
    use form_builder_api::api::services::fallback::default_form;
    use form_builder_api::api::services::validation::{generate_slug, validate_form_structure};

    #[test]
    fn test_default_form_is_schema_valid() {
        let draft = default_form("Contact Form");
        let report = validate_form_structure(&draft);
        assert!(report.is_valid, "fallback must validate: {:?}", report.errors);
    }

    #[test]
    fn test_default_form_has_one_step_with_name_and_email() {
        let draft = default_form("Contact Form");
        assert_eq!(draft.steps.len(), 1);
        let fields = &draft.steps[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, "text");
        assert_eq!(fields[0].label, "Name");
        assert!(fields[0].is_required());
        assert_eq!(fields[1].field_type, "email");
        assert_eq!(fields[1].label, "Email");
        assert!(fields[1].is_required());
    }

    #[test]
    fn test_default_form_marketing_disabled_and_modal_enabled() {
        let draft = default_form("Contact Form");
        assert!(!draft.marketing.as_ref().unwrap().enabled);
        assert!(draft.success_modal.as_ref().unwrap().enabled);
    }

    #[test]
    fn test_default_form_is_deterministic() {
        let a = serde_json::to_value(default_form("Contact Form")).unwrap();
        let b = serde_json::to_value(default_form("Contact Form")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_form_title_slugs_cleanly() {
        let draft = default_form("Contact Form");
        assert_eq!(generate_slug(&draft.title), "contact-form");
    }
}
