//! Presence-tagged modification payloads.
//!
//! A modification delta must distinguish "leave this field alone" from
//! "clear this field". Truthiness checks cannot: an absent key and an
//! explicit null look identical. [`Patch`] keeps the three states apart —
//! an absent key deserializes to `Keep` (via `#[serde(default)]`), JSON
//! `null` to `Clear`, and a value to `Set`.

use super::draft::{MarketingDraft, StepDraft, SuccessModalDraft};
use serde::{Deserialize, Deserializer, Serialize};

/// Three-state patch for a clearable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Key absent: leave the target untouched.
    #[default]
    Keep,
    /// Explicit null: clear the target.
    Clear,
    /// Replace the target with the given value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Apply this patch onto an optional target.
    pub fn apply_to(&self, target: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Patch::Keep => {}
            Patch::Clear => *target = None,
            Patch::Set(v) => *target = Some(v.clone()),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present: null means Clear.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            // Keep serializes as null too; round-tripping Keep is not a
            // supported use of this type (it is a request-side payload).
            Patch::Keep | Patch::Clear => serializer.serialize_none(),
            Patch::Set(v) => serializer.serialize_some(v),
        }
    }
}

/// The mutable-field delta of a modify operation. Absent fields are left
/// untouched on the target form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormModifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// When present, replaces the full step sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepDraft>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing: Option<MarketingDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_modal: Option<SuccessModalDraft>,
}

impl FormModifications {
    /// True when the delta carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.theme.is_none()
            && self.primary_color.is_none()
            && self.steps.is_none()
            && self.marketing.is_none()
            && self.success_modal.is_none()
    }
}
