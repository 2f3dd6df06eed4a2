use crate::error::AppError;
use crate::extractors::AppJson;
use crate::model::NewTopic;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let topics = state.repo.topics().await?;
    Ok(response::ok("topics", topics))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewTopic>,
) -> Result<impl IntoResponse, AppError> {
    let topic = state.repo.create_topic(body).await?;
    Ok(response::created("topic", topic))
}
