//! Path parameter extraction with the crate's error shape.

use crate::error::AppError;
use crate::service::IdValidator;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// `Path<T>` whose rejections (undecodable percent escapes, invalid UTF-8)
/// become [`AppError::InvalidFormat`].
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e.body_text(), "path rejected");
                AppError::InvalidFormat
            })?;
        Ok(AppPath(value))
    }
}

/// Single numeric id segment (`:article_id`, `:comment_id`), checked with
/// [`IdValidator::parse`]. Runs before any body extractor, so a malformed id
/// wins over a malformed body.
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AppPath(raw) = AppPath::<String>::from_request_parts(parts, state).await?;
        Ok(IdPath(IdValidator::parse(&raw)?))
    }
}
