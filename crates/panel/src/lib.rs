//! FarmaLink panel library.
//!
//! Server-rendered management panel for a pharmacy: a login screen, a
//! shell with a role-filtered section menu, and the products, purchases,
//! payments, employees and alerts sections backed by the FarmaLink REST API.
//!
//! The binary in `main.rs` only wires configuration, logging and the
//! listener; everything else lives here so it can be tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod views;

use axum::{Router, routing::get};
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};

use api::{ApiClient, ApiError};
use config::{ConfigError, PanelConfig};
use services::AlertLog;
use state::AppState;
use storage::{FileSlots, StorageError};

/// Errors that stop the panel from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    #[error("data directory error: {0}")]
    Storage(#[from] StorageError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the shared state for `config`: API client and the durable alert
/// log under `config.data_dir`.
///
/// # Errors
///
/// Returns an error if the API client cannot be built or the data
/// directory cannot be created.
pub fn build_state(config: PanelConfig) -> Result<AppState, StartupError> {
    let api = ApiClient::new(&config.api_url, config.api_timeout)?;
    let alerts = AlertLog::new(FileSlots::new(&config.data_dir)?);
    Ok(AppState::new(config, api, alerts))
}

/// Build the full application router: panel routes, health check, static
/// files, cookie sessions and request tracing.
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the REST API.
async fn health() -> &'static str {
    "ok"
}
