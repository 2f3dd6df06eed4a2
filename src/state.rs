//! Shared application state for all routes.

use crate::service::Repository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: impl Repository + 'static) -> Self {
        AppState { repo: Arc::new(repo) }
    }
}
