//! `/api/articles` and `/api/articles/:article_id[/comments]`.

use crate::error::AppError;
use crate::extractors::{AppJson, IdPath};
use crate::model::{NewArticle, NewComment, VoteUpdate};
use crate::query::{ArticleListQuery, Pagination};
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ArticleListQuery::from_params(&params)?;
    let rows = state.repo.articles(&query).await?;
    Ok(response::ok("articles", rows))
}

pub async fn read(
    State(state): State<AppState>,
    IdPath(article_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let article = state.repo.article(article_id).await?;
    Ok(response::ok("article", article))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewArticle>,
) -> Result<impl IntoResponse, AppError> {
    let article = state.repo.create_article(body).await?;
    Ok(response::created("article", article))
}

pub async fn update_votes(
    State(state): State<AppState>,
    IdPath(article_id): IdPath,
    AppJson(update): AppJson<VoteUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let article = state.repo.add_article_votes(article_id, update.inc_votes).await?;
    Ok(response::created("article", article))
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(article_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    state.repo.delete_article(article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(article_id): IdPath,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = Pagination::from_params(&params)?;
    let rows = state.repo.comments(article_id, page).await?;
    Ok(response::ok("comments", rows))
}

pub async fn create_comment(
    State(state): State<AppState>,
    IdPath(article_id): IdPath,
    AppJson(comment): AppJson<NewComment>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state.repo.create_comment(article_id, comment).await?;
    Ok(response::created("comment", comment))
}
