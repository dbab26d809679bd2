//! Services module - the AI form-synthesis pipeline and its parts.

pub mod ai_service;
pub mod conversation_recorder;
pub mod error;
pub mod fallback;
pub mod form_mutator;
pub mod llm_client;
pub mod prompt_builder;
pub mod response_parser;
pub mod validation;

// Re-export for convenience
pub use ai_service::{
    AiFormService, AnalyzeFormRequest, AnalyzeFormResponse, GenerateFormRequest,
    GenerateFormResponse, ModifyFormRequest, ModifyFormResponse,
};
pub use conversation_recorder::ConversationRecorder;
pub use error::{AiError, LlmError};
pub use fallback::default_form;
pub use form_mutator::FormMutator;
pub use llm_client::{GeminiClient, LlmClient};
pub use prompt_builder::{GenerationOptions, ModificationOptions};
pub use validation::{generate_slug, validate_form_structure};
