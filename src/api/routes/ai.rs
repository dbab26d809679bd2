//! AI form pipeline routes.

use axum::{Router, extract::State, response::Json, routing::post};

use super::app_state::AppState;
use super::auth_context::AuthUser;
use super::error::ApiError;
use crate::services::{
    AiFormService, AnalyzeFormRequest, AnalyzeFormResponse, GenerateFormRequest,
    GenerateFormResponse, ModifyFormRequest, ModifyFormResponse,
};

/// Create the AI pipeline router
pub fn ai_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_form))
        .route("/modify", post(modify_form))
        .route("/analyze", post(analyze_form))
}

/// POST /ai/generate - Generate a form from a free-text description
async fn generate_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateFormRequest>,
) -> Result<Json<GenerateFormResponse>, ApiError> {
    let service = AiFormService::new(state.llm.clone(), state.store.clone());
    let response = service.generate_form(user.user_id, request).await?;
    Ok(Json(response))
}

/// POST /ai/modify - Apply edit instructions to an existing form
async fn modify_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ModifyFormRequest>,
) -> Result<Json<ModifyFormResponse>, ApiError> {
    let service = AiFormService::new(state.llm.clone(), state.store.clone());
    let response = service.modify_form(user.user_id, request).await?;
    Ok(Json(response))
}

/// POST /ai/analyze - Analyze an existing form
async fn analyze_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<AnalyzeFormRequest>,
) -> Result<Json<AnalyzeFormResponse>, ApiError> {
    let service = AiFormService::new(state.llm.clone(), state.store.clone());
    let response = service.analyze_form(user.user_id, request).await?;
    Ok(Json(response))
}
