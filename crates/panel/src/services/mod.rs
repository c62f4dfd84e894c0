//! Core panel services.
//!
//! - [`session`]: who is logged in, backed by the session slot
//! - [`gate`]: which sections a role may open and which one is active
//! - [`alert_log`]: bounded log of panel activity, backed by the durable slot

pub mod alert_log;
pub mod gate;
pub mod session;

pub use alert_log::{AlertLog, AlertLogError, MAX_ALERTS};
pub use gate::{Navigator, allowed_sections, resolve};
pub use session::{Credential, DEFAULT_CREDENTIALS, LoginError, SessionStore};
