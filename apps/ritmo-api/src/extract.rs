//! Request extractors.

use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// `Json<T>` whose rejections become 400 [`ApiError`]s instead of axum's
/// plain-text 415/422 responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
