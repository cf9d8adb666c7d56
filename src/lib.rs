//! Read-only web browser for a media directory.
//!
//! Renders the directory tree below a fixed root as HTML listings and serves
//! individual files inline or as downloads. It can be used as a standalone
//! binary or embedded in another application through [`app`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod media;
pub mod resolve;
pub mod routes;
pub mod view;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::BrowserError;
pub use resolve::{MediaRoot, ResolvedPath};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Root directory to serve files from
    pub root: Arc<MediaRoot>,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState with the given root directory and default config.
    pub fn new(root: MediaRoot) -> Self {
        Self::with_config(root, Config::default())
    }

    /// Create a new AppState with the given root directory and config.
    pub fn with_config(root: MediaRoot, config: Config) -> Self {
        Self {
            root: Arc::new(root),
            config: Arc::new(config),
        }
    }
}

/// Build the complete router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let mut router = routes::browser_routes();

    if let Some(timeout) = state.config.request_timeout() {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
