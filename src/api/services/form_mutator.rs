//! Applies validated AI payloads to persisted forms.
//!
//! A failed validation aborts before any write. The multi-table write
//! sequence (form, steps, marketing, success modal) is not wrapped in one
//! transaction; a crash mid-sequence can leave a partially-updated form.

use super::error::AiError;
use super::validation::{generate_slug, validate_form_structure, validate_modifications};
use crate::models::{
    FieldDraft, FieldType, Form, FormDraft, FormField, FormStatus, FormStep, FormTheme,
    MarketingConfig, MarketingDraft, StepDraft, SuccessModalConfig, SuccessModalDraft,
};
use crate::storage::FormStore;
use std::sync::Arc;
use uuid::Uuid;

/// Applies generation results and modification deltas through the store.
pub struct FormMutator {
    store: Arc<dyn FormStore>,
}

impl FormMutator {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Apply a generation result: create a new draft form, or partially
    /// overwrite an existing one when a target id is supplied. Returns the
    /// canonical persisted state re-read from the store.
    pub async fn apply_generation(
        &self,
        draft: &FormDraft,
        owner: Uuid,
        target_form_id: Option<Uuid>,
    ) -> Result<Form, AiError> {
        let report = validate_form_structure(draft);
        if !report.is_valid {
            return Err(AiError::Structure(report.errors.join("; ")));
        }

        let form_id = match target_form_id {
            None => {
                let mut form = Form::new(owner, draft.title.clone(), unique_slug(&draft.title));
                form.description = draft.description.clone();
                if let Some(theme) = &draft.theme {
                    form.theme = FormTheme::from_str(theme).unwrap_or_default();
                }
                if let Some(color) = &draft.primary_color {
                    form.primary_color = color.clone();
                }
                form.status = FormStatus::Draft;
                form.steps = steps_from_drafts(&draft.steps);
                if let Some(marketing) = &draft.marketing {
                    form.marketing = marketing_from_draft(marketing);
                }
                if let Some(modal) = &draft.success_modal {
                    form.success_modal = success_modal_from_draft(modal, &form.success_modal);
                }
                self.store.create_form(form.clone()).await?;
                form.id
            }
            Some(id) => {
                let existing = self
                    .store
                    .get_form(id)
                    .await?
                    .ok_or_else(|| AiError::NotFound("Form".to_string()))?;
                if existing.user_id != owner {
                    return Err(AiError::Permission(
                        "form belongs to another user".to_string(),
                    ));
                }

                // Partial overwrite: absent keys leave the stored value
                // untouched; the slug is never regenerated here.
                let mut updated = existing.clone();
                updated.title = draft.title.clone();
                if draft.description.is_some() {
                    updated.description = draft.description.clone();
                }
                if let Some(theme) = &draft.theme {
                    updated.theme = FormTheme::from_str(theme).unwrap_or(existing.theme);
                }
                if let Some(color) = &draft.primary_color {
                    updated.primary_color = color.clone();
                }
                self.store.update_form(updated, None).await?;
                self.store
                    .replace_steps(id, steps_from_drafts(&draft.steps))
                    .await?;
                if let Some(marketing) = &draft.marketing {
                    self.store
                        .update_marketing(id, marketing_from_draft(marketing))
                        .await?;
                }
                if let Some(modal) = &draft.success_modal {
                    self.store
                        .update_success_modal(
                            id,
                            success_modal_from_draft(modal, &existing.success_modal),
                        )
                        .await?;
                }
                id
            }
        };

        self.store
            .get_form(form_id)
            .await?
            .ok_or_else(|| AiError::NotFound("Form".to_string()))
    }

    /// Apply a modification delta onto an existing form. Only fields the
    /// delta carries are written; presence is tagged, not truthiness, so an
    /// explicit null clears a clearable field.
    pub async fn apply_modification(
        &self,
        form: &Form,
        modifications: &crate::models::FormModifications,
    ) -> Result<Form, AiError> {
        let report = validate_modifications(modifications);
        if !report.is_valid {
            return Err(AiError::Structure(report.errors.join("; ")));
        }

        let mut updated = form.clone();
        if let Some(title) = &modifications.title {
            updated.title = title.clone();
        }
        modifications.description.apply_to(&mut updated.description);
        if let Some(theme) = &modifications.theme {
            updated.theme = FormTheme::from_str(theme).unwrap_or(form.theme);
        }
        if let Some(color) = &modifications.primary_color {
            updated.primary_color = color.clone();
        }
        self.store.update_form(updated, None).await?;

        if let Some(steps) = &modifications.steps {
            self.store
                .replace_steps(form.id, steps_from_drafts(steps))
                .await?;
        }
        if let Some(marketing) = &modifications.marketing {
            self.store
                .update_marketing(form.id, marketing_from_draft(marketing))
                .await?;
        }
        if let Some(modal) = &modifications.success_modal {
            self.store
                .update_success_modal(
                    form.id,
                    success_modal_from_draft(modal, &form.success_modal),
                )
                .await?;
        }

        self.store
            .get_form(form.id)
            .await?
            .ok_or_else(|| AiError::NotFound("Form".to_string()))
    }
}

/// Slug for a newly generated form: the title's slug plus a short unique
/// suffix so repeated generations from one title do not collide.
fn unique_slug(title: &str) -> String {
    let base = generate_slug(title);
    let suffix = Uuid::new_v4().simple().to_string();
    if base.is_empty() {
        format!("form-{}", &suffix[..8])
    } else {
        format!("{}-{}", base, &suffix[..8])
    }
}

fn steps_from_drafts(drafts: &[StepDraft]) -> Vec<FormStep> {
    drafts
        .iter()
        .map(|step| FormStep {
            id: Uuid::new_v4(),
            title: step.title.clone(),
            fields: step.fields.iter().map(field_from_draft).collect(),
        })
        .collect()
}

fn field_from_draft(draft: &FieldDraft) -> FormField {
    FormField {
        id: Uuid::new_v4(),
        // Drafts reaching this point passed structure validation.
        field_type: FieldType::from_str(&draft.field_type).unwrap_or(FieldType::Text),
        label: draft.label.clone(),
        placeholder: draft.placeholder.clone(),
        required: draft.is_required(),
        validation: draft.validation.clone(),
        options: draft.options.clone(),
    }
}

fn marketing_from_draft(draft: &MarketingDraft) -> MarketingConfig {
    MarketingConfig {
        enabled: draft.enabled,
        headline: draft.headline.clone(),
        description: draft.description.clone(),
    }
}

fn success_modal_from_draft(
    draft: &SuccessModalDraft,
    current: &SuccessModalConfig,
) -> SuccessModalConfig {
    SuccessModalConfig {
        enabled: draft.enabled,
        title: draft.title.clone().unwrap_or_else(|| current.title.clone()),
        message: draft
            .message
            .clone()
            .unwrap_or_else(|| current.message.clone()),
        redirect_url: draft.redirect_url.clone(),
    }
}
