//! HTTP route handlers.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET  | `/login` | login page |
//! | POST | `/login` | check credentials, start session |
//! | POST | `/logout` | end session |
//! | GET  | `/` | go to the resolved section |
//! | POST | `/inicio` | home button: drop the selection |
//! | GET  | `/sections/{key}` | select and render a section |
//! | POST | `/productos` | create product |
//! | POST | `/compras` | create purchase |
//! | POST | `/compras/{id}/eliminar` | delete purchase |
//! | POST | `/pagos` | register payment |
//! | POST | `/alertas/limpiar` | clear the alert log |
//!
//! Anything else is a plain 404.

pub mod alerts;
pub mod auth;
pub mod employees;
pub mod payments;
pub mod products;
pub mod purchases;
pub mod shell;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::api::ApiError;
use crate::error::AppError;
use crate::state::AppState;

/// Build the panel router (without session or tracing layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/", get(shell::home))
        .route("/inicio", post(shell::reset))
        .route("/sections/{key}", get(shell::section))
        .route("/productos", post(products::create))
        .route("/compras", post(purchases::create))
        .route("/compras/{id}/eliminar", post(purchases::delete))
        .route("/pagos", post(payments::create))
        .route("/alertas/limpiar", post(alerts::clear))
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Record a failed list load and return the inline message for the page.
///
/// `what` completes "No se pudieron cargar ..." (e.g. "los productos").
pub(crate) async fn report_load_failure(state: &AppState, what: &str, err: &ApiError) -> String {
    tracing::warn!(error = %err, "failed to load {what}");
    let message = format!("No se pudieron cargar {what}{}", err.status_suffix());
    state
        .alerts()
        .record(farmalink_core::AlertKind::Error, &message, Some(err.details()))
        .await;
    message
}
