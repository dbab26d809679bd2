// Models module - form, conversation, draft, and modification types

pub mod conversation;
pub mod draft;
pub mod enums;
pub mod form;
pub mod modifications;

pub use conversation::{Conversation, ConversationSession};
pub use draft::{FieldDraft, FormDraft, MarketingDraft, StepDraft, SuccessModalDraft};
pub use enums::{AnalysisType, ConversationType, FieldType, FormStatus, FormTheme};
pub use form::{
    FieldOption, Form, FormField, FormStep, MarketingConfig, SuccessModalConfig, ValidationRules,
};
pub use modifications::{FormModifications, Patch};
