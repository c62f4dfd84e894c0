//! Integration tests for FarmaLink.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p farmalink-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `access_flow` - login, persistence and section gating
//! - `alert_log` - alert log over memory, file and failing slots
//! - `panel_router` - HTTP router driven with `tower::ServiceExt::oneshot`
//!
//! Router tests point the API client at a closed local port, so every
//! REST call fails fast with a network error and no external service is
//! needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use farmalink_core::Role;
use farmalink_panel::config::PanelConfig;
use farmalink_panel::services::Credential;
use farmalink_panel::state::AppState;
use farmalink_panel::storage::{MemorySlots, SlotStore, StorageError};

/// Credential table used by the access scenarios.
pub const TEST_CREDENTIALS: &[Credential] = &[
    Credential {
        email: "admin@x",
        password: "adm123",
        role: Role::Admin,
    },
    Credential {
        email: "emp@x",
        password: "empleado123",
        role: Role::Employee,
    },
];

/// Address nothing listens on.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Panel configuration writing into `data_dir` with an unreachable API.
#[must_use]
pub fn test_config(data_dir: &Path) -> PanelConfig {
    let mut config = PanelConfig::defaults(data_dir);
    config.api_url = UNREACHABLE_API.to_string();
    config.api_timeout = Duration::from_secs(2);
    config
}

/// Build state and router for a test panel.
///
/// # Panics
///
/// Panics if the state cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_app(data_dir: &Path) -> (Router, AppState) {
    let state = farmalink_panel::build_state(test_config(data_dir)).expect("test state");
    (farmalink_panel::build_router(state.clone()), state)
}

/// `name=value` pair of the session cookie set by `response`, if any.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(farmalink_panel::middleware::SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Form POST request.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).expect("request")
}

/// GET request, optionally with a cookie.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

/// Memory slots whose writes can be switched off, standing in for a full
/// or read-only storage backend.
#[derive(Default)]
pub struct FlakySlots {
    inner: MemorySlots,
    fail_writes: AtomicBool,
}

impl FlakySlots {
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Write directly, bypassing the failure switch.
    ///
    /// # Errors
    ///
    /// Never fails for memory slots.
    pub async fn seed(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }
}

impl SlotStore for FlakySlots {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage full".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage full".to_string()));
        }
        self.inner.remove(key).await
    }
}
