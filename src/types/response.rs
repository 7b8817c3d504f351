use std::fmt::Display;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Created response helper: 201, `Location` of the new item, item as body
pub struct Created<T: Serialize> {
    location: String,
    body: T,
}

impl<T: Serialize> Created<T> {
    /// `collection_path` is the path the POST was made to.
    pub fn at(collection_path: &str, id: impl Display, body: T) -> Self {
        Self {
            location: format!("{}/{}", collection_path.trim_end_matches('/'), id),
            body,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.body),
        )
            .into_response()
    }
}

/// No content response helper (DELETE and PATCH endpoints)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_location_joins_collection_and_id() {
        assert_eq!(Created::at("/api/memories", 12, ()).location(), "/api/memories/12");
        assert_eq!(Created::at("/api/memories/", 12, ()).location(), "/api/memories/12");
    }

    #[test]
    fn test_created_response_sets_status_and_header() {
        let response = Created::at("/api/family-members", 3, "body").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/family-members/3"
        );
    }

    #[test]
    fn test_no_content() {
        assert_eq!(NoContent.into_response().status(), StatusCode::NO_CONTENT);
    }
}
