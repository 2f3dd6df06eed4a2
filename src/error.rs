//! Typed errors and HTTP mapping.
//!
//! Every failure in the crate is an [`AppError`]. [`AppError::classify`] is the
//! single place where a failure becomes a status code and a stable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Entity a not-found failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Article,
    Comment,
    Topic,
    User,
}

impl Resource {
    fn not_found_message(self) -> &'static str {
        match self {
            Resource::Article => "article not found",
            Resource::Comment => "comment not found",
            Resource::Topic => "topic not found",
            Resource::User => "user not found",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid format")]
    InvalidFormat,
    #[error("invalid sort_by: {0}")]
    InvalidSortBy(String),
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("{0:?} not found")]
    NotFound(Resource),
    #[error("referenced entity does not exist")]
    PropertiesNotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("no route for path")]
    InvalidPath,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

const INTERNAL_MESSAGE: &str = "internal server error";

impl AppError {
    /// Map the failure to its transport status and stable message.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidFormat => (StatusCode::BAD_REQUEST, "request included invalid format"),
            AppError::InvalidSortBy(_) => (StatusCode::BAD_REQUEST, "invalid sort_by query"),
            AppError::InvalidOrder(_) => (StatusCode::BAD_REQUEST, "invalid order query"),
            AppError::MalformedBody(_) => (StatusCode::BAD_REQUEST, "request body incorrect"),
            AppError::NotFound(resource) => (StatusCode::NOT_FOUND, resource.not_found_message()),
            AppError::PropertiesNotFound => (StatusCode::NOT_FOUND, "1 or more properties not found"),
            AppError::AlreadyExists => (StatusCode::BAD_REQUEST, "key already exists"),
            AppError::InvalidPath => (StatusCode::NOT_FOUND, "invalid path"),
            AppError::Db(e) => match e {
                sqlx::Error::Database(db) => db
                    .code()
                    .and_then(|code| classify_sqlstate(&code))
                    .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE),
            },
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE),
        }
    }
}

/// Postgres SQLSTATE codes that are caused by the client rather than the server.
fn classify_sqlstate(code: &str) -> Option<(StatusCode, &'static str)> {
    match code {
        // foreign_key_violation
        "23503" => Some((StatusCode::NOT_FOUND, "1 or more properties not found")),
        // unique_violation
        "23505" => Some((StatusCode::BAD_REQUEST, "key already exists")),
        // invalid_text_representation
        "22P02" => Some((StatusCode::BAD_REQUEST, "request included invalid format")),
        // numeric_value_out_of_range, e.g. a vote increment overflowing INT
        "22003" => Some((StatusCode::BAD_REQUEST, "request included invalid format")),
        // not_null_violation
        "23502" => Some((StatusCode::BAD_REQUEST, "request body incorrect")),
        _ => None,
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub msg: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self, "unclassified failure");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody { msg })).into_response()
    }
}
