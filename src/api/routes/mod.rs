//! API routes module - organizes all route handlers.

pub mod ai;
pub mod app_state;
pub mod auth_context;
pub mod error;

use axum::Router;
pub use app_state::AppState;

/// Create the main API router combining all route modules
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/ai", ai::ai_router())
    // Note: State is applied by callers who need it (e.g., TestServer)
    // For production use, call .with_state(app_state) after creating the router
}

/// Create the application state (synchronous, for backwards compatibility).
///
/// Note: For PostgreSQL storage, call `init_storage()` on the returned state.
pub fn create_app_state() -> AppState {
    AppState::new()
}

/// Create the application state with storage initialization (async).
///
/// This is the preferred method for production use.
pub async fn create_app_state_with_storage() -> Result<AppState, crate::storage::StorageError> {
    let mut state = AppState::new();
    state.init_storage().await?;
    Ok(state)
}
