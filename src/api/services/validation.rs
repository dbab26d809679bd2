//! Form structure validation.
//!
//! Pure functions, no I/O. The same rules are applied to LLM-derived form
//! payloads (defense against malformed generation) and to user-submitted
//! form edits (defense against malformed client input). Inputs are never
//! mutated.

use crate::models::{FieldDraft, FieldType, FormDraft, FormModifications, FormTheme, StepDraft};
use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{3,6}$").expect("valid hex color regex"));

/// Result of a structure validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// True when `field_type` names a supported field type.
pub fn is_valid_field_type(field_type: &str) -> bool {
    FieldType::from_str(field_type).is_some()
}

/// True when `theme` names a supported form theme.
pub fn is_valid_theme(theme: &str) -> bool {
    FormTheme::from_str(theme).is_some()
}

/// True when `color` is a hex color string (3 to 6 hex digits).
pub fn is_valid_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// Validate a single field definition.
pub fn validate_field(field: &FieldDraft) -> ValidationReport {
    let mut errors = Vec::new();

    match FieldType::from_str(&field.field_type) {
        None => errors.push(format!("unsupported field type '{}'", field.field_type)),
        Some(field_type) => {
            if field_type.requires_options() && field.options.is_empty() {
                errors.push(format!(
                    "{} field requires at least one option",
                    field.field_type
                ));
            }
        }
    }

    if field.label.trim().is_empty() {
        errors.push("field label must not be empty".to_string());
    }

    if let Some(required) = &field.required {
        if !required.is_boolean() {
            errors.push("required flag must be a boolean".to_string());
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate a single step definition. Per-field errors are labeled by
/// 1-based field index.
pub fn validate_step(step: &StepDraft) -> ValidationReport {
    let mut errors = Vec::new();

    if step.title.trim().is_empty() {
        errors.push("step title must not be empty".to_string());
    }

    for (index, field) in step.fields.iter().enumerate() {
        for error in validate_field(field).errors {
            errors.push(format!("field {}: {}", index + 1, error));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate a complete form definition. Per-step errors are labeled by
/// 1-based step index.
pub fn validate_form_structure(form: &FormDraft) -> ValidationReport {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push("form title must not be empty".to_string());
    }

    if form.steps.is_empty() {
        errors.push("form must have at least one step".to_string());
    }

    for (index, step) in form.steps.iter().enumerate() {
        for error in validate_step(step).errors {
            errors.push(format!("step {}: {}", index + 1, error));
        }
    }

    if let Some(theme) = &form.theme {
        if !is_valid_theme(theme) {
            errors.push(format!("unsupported theme '{}'", theme));
        }
    }

    if let Some(color) = &form.primary_color {
        if !is_valid_color(color) {
            errors.push(format!("invalid primary color '{}'", color));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate a modification delta with the same rules the full-form pass
/// applies, scoped to the fields the delta carries.
pub fn validate_modifications(modifications: &FormModifications) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(title) = &modifications.title {
        if title.trim().is_empty() {
            errors.push("form title must not be empty".to_string());
        }
    }

    if let Some(theme) = &modifications.theme {
        if !is_valid_theme(theme) {
            errors.push(format!("unsupported theme '{}'", theme));
        }
    }

    if let Some(color) = &modifications.primary_color {
        if !is_valid_color(color) {
            errors.push(format!("invalid primary color '{}'", color));
        }
    }

    if let Some(steps) = &modifications.steps {
        if steps.is_empty() {
            errors.push("form must have at least one step".to_string());
        }
        for (index, step) in steps.iter().enumerate() {
            for error in validate_step(step).errors {
                errors.push(format!("step {}: {}", index + 1, error));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, folds Latin diacritics to ASCII, drops other
/// non-alphanumerics, and collapses whitespace/hyphen runs to single
/// hyphens with none leading or trailing. Idempotent:
/// `generate_slug(generate_slug(t)) == generate_slug(t)`.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().map(fold_diacritic) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
        // Everything else is dropped without acting as a separator.
    }

    slug
}

/// Fold a Latin-1/Latin Extended-A diacritic to its ASCII base letter.
fn fold_diacritic(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'č' => 'c',
        'Ç' | 'Ć' | 'Č' => 'C',
        'ď' => 'd',
        'Ď' => 'D',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' => 'I',
        'ľ' | 'ł' => 'l',
        'Ľ' | 'Ł' => 'L',
        'ñ' | 'ń' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ň' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => 'O',
        'ŕ' | 'ř' => 'r',
        'Ŕ' | 'Ř' => 'R',
        'ś' | 'š' => 's',
        'Ś' | 'Š' => 'S',
        'ť' => 't',
        'Ť' => 'T',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        other => other,
    }
}
