//! Direct-upload signing handler.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::infra::SignedUpload;

/// Query string of `/sign-s3`
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SignUploadQuery {
    /// Object key to upload to
    pub file_name: Option<String>,
    /// Content type the upload will be sent with
    pub file_type: Option<String>,
}

fn query_param(value: Option<String>, name: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(format!("Missing '{}' in query string", name)))
}

/// Issue a time-limited URL the browser can PUT a file to
#[utoipa::path(
    get,
    path = "/sign-s3",
    tag = "Uploads",
    params(SignUploadQuery),
    responses(
        (status = 200, description = "Signed upload URL", body = SignedUpload),
        (status = 400, description = "Missing fileName or fileType"),
        (status = 500, description = "Storage not configured or signing failed")
    )
)]
pub async fn sign_s3(
    State(state): State<AppState>,
    Query(query): Query<SignUploadQuery>,
) -> AppResult<Json<SignedUpload>> {
    let file_name = query_param(query.file_name, "fileName")?;
    let file_type = query_param(query.file_type, "fileType")?;

    let signed = state.uploads.sign_upload(&file_name, &file_type)?;
    Ok(Json(signed))
}
