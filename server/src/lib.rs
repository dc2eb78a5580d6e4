//! Job search web front end.
//!
//! One page: a form whose submission is handed to a [`JobSource`], shaped
//! for display and returned as an HTML table plus a CSV download.

use axum::{Router, routing::get};
use common::JobSource;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod page;

pub use config::Config;
pub use error::AppError;

/// Shared application state
pub struct AppState {
    pub source: Arc<dyn JobSource>,
    /// Indeed country used when the form leaves it blank.
    pub default_country: String,
}

impl AppState {
    pub fn new(source: Arc<dyn JobSource>, default_country: impl Into<String>) -> Self {
        Self {
            source,
            default_country: default_country.into(),
        }
    }
}

/// Builds the router: `GET /`, `POST /` and `GET /health`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_page).post(handlers::search))
        .route("/health", get(handlers::health))
        .with_state(Arc::new(state))
}
