//! HTTP middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, CurrentUser, OptionalUser};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
