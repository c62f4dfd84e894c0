//! Session middleware configuration.
//!
//! Sessions live in process memory: they hold only the identity and the
//! selected section, and a restart simply logs everyone out.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::PanelConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "farmalink_session";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &PanelConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::hours(config.session_hours),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
