//! CORS middleware configuration.

use tower_http::cors::CorsLayer;

/// Create a CORS layer with permissive settings for development.
///
/// This allows all origins, methods, and headers. For production,
/// you should configure more restrictive CORS settings.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
