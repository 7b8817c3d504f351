//! Item resolution for `/:id` routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::api::AppState;
use crate::errors::{AppError, AppResult};

/// An entity that can be looked up by the `:id` path segment.
#[async_trait]
pub trait Resolvable: Sized + Send {
    /// Message of the 404 returned when no row matches
    const NOT_FOUND: &'static str;

    async fn fetch(state: &AppState, id: i32) -> AppResult<Option<Self>>;
}

/// The entity named by the request path, loaded once before the handler
/// runs. Unknown and non-numeric ids both produce the entity's 404.
pub struct Resolved<T>(pub T);

#[async_trait]
impl<T> FromRequestParts<AppState> for Resolved<T>
where
    T: Resolvable,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NOT_FOUND))?;

        let id: i32 = raw_id
            .parse()
            .map_err(|_| AppError::not_found(T::NOT_FOUND))?;

        T::fetch(state, id)
            .await?
            .map(Resolved)
            .ok_or_else(|| AppError::not_found(T::NOT_FOUND))
    }
}
