//! JSON body extractor with uniform error responses.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON request body.
///
/// A request without a JSON content type, or with an empty body, is read as
/// `{}` so that payload checks report the missing fields. Malformed JSON is
/// rejected with a 400 in the usual error shape.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use family_vault::api::extractors::JsonBody;
///
/// #[derive(Deserialize)]
/// struct Rename {
///     first_name: Option<String>,
/// }
///
/// async fn rename(JsonBody(payload): JsonBody<Rename>) {
///     // payload.first_name is None when the field was not sent
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let raw: &[u8] = if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
            &bytes
        } else {
            b"{}"
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {}", e)))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}
