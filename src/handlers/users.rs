use crate::error::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::model::NewUser;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.repo.users().await?;
    Ok(response::ok("users", users))
}

pub async fn read(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.repo.user(&username).await?;
    Ok(response::ok("user", user))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.repo.create_user(body).await?;
    Ok(response::created("user", user))
}
