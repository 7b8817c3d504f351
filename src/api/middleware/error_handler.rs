//! Terminal error handling: logs server failures and shapes their bodies.

use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::AppState;
use crate::errors::{AppError, ErrorReport};

/// Log every response carrying an [`ErrorReport`]. Outside production the
/// body is replaced with the raw message and detail.
pub async fn error_handler(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    tracing::error!(
        %method,
        %uri,
        error = %report.message,
        detail = %report.detail,
        "Request failed"
    );

    if state.config.environment.is_production() {
        return response;
    }

    let status = response.status();
    let body = json!({
        "message": report.message,
        "error": {
            "message": report.message,
            "detail": report.detail,
        }
    });

    (status, Json(body)).into_response()
}

/// Panic responder for `CatchPanicLayer`, reported like any other 500.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_handle_panic_reports_payload() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "handler panicked: boom");
    }
}
