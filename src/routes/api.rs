//! `/api` routes.

use crate::handlers::{api, articles, comments, topics, users};
use crate::state::AppState;
use axum::{
    routing::{get, patch},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api::endpoints))
        .route("/api/topics", get(topics::list).post(topics::create))
        .route("/api/articles", get(articles::list).post(articles::create))
        .route(
            "/api/articles/:article_id",
            get(articles::read)
                .patch(articles::update_votes)
                .delete(articles::delete),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(articles::list_comments).post(articles::create_comment),
        )
        .route(
            "/api/comments/:comment_id",
            patch(comments::update_votes).delete(comments::delete),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:username", get(users::read))
        .with_state(state)
}
