//! `/api/comments/:comment_id`.

use crate::error::AppError;
use crate::extractors::{AppJson, IdPath};
use crate::model::VoteUpdate;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

pub async fn update_votes(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath,
    AppJson(update): AppJson<VoteUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state.repo.add_comment_votes(comment_id, update.inc_votes).await?;
    Ok(response::created("comment", comment))
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.repo.delete_comment(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
