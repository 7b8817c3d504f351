//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{family_member_routes, memory_routes, sign_s3};
use super::middleware::{error_handler, handle_panic, security_headers};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{FAMILY_MEMBERS_PATH, GREETING, MEMORIES_PATH};
use crate::errors::AppError;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/sign-s3", get(sign_s3))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(FAMILY_MEMBERS_PATH, family_member_routes())
        .nest(MEMORIES_PATH, memory_routes())
        .fallback(not_found)
        // Panics become reported 500s before the error handler sees them
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), error_handler))
        // Global middleware, the last layer added runs first
        .layer(middleware::from_fn(security_headers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    GREETING
}

async fn not_found() -> AppError {
    AppError::not_found("Not found")
}
