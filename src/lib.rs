//! News API: topics, articles, comments and users over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, Resource};
pub use routes::{api_routes, common_routes};
pub use service::{PgRepository, Repository};
pub use state::AppState;

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router: `/api/*`, health probes, and a JSON 404 for anything else,
/// including a known path requested with a method it does not serve.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .method_not_allowed_fallback(handlers::api::invalid_path)
        .fallback(handlers::api::invalid_path)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
