//! Key/value slot storage.
//!
//! The panel keeps two kinds of state outside the remote API:
//!
//! - the **session slot**, scoped to one browser (see [`SessionSlots`]), which
//!   holds the logged-in identity and the selected section
//! - the **durable slot**, shared by every browser on this panel instance
//!   (see [`FileSlots`]), which holds the alert log
//!
//! Both are reached through [`SlotStore`], so the services built on top of
//! them can be tested against [`MemorySlots`].

mod file;
mod memory;
mod session;

pub use file::FileSlots;
pub use memory::MemorySlots;
pub use session::SessionSlots;

use std::future::Future;

use thiserror::Error;

/// Reserved slot keys.
pub mod keys {
    /// Session slot holding the serialized identity.
    pub const CURRENT_USER: &str = "farma_user";

    /// Session slot holding the selected section.
    pub const CURRENT_SECTION: &str = "farma_section";

    /// Durable slot holding the alert log.
    pub const ALERT_LOG: &str = "farmalink_alertas_log";
}

/// Errors raised by a slot backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cookie session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Key cannot be mapped onto the backend.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    /// Backend is not usable right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed storage of string values.
///
/// Values are opaque to the store; callers serialize their own data.
/// Implementations must be `Send + Sync` so they can be shared across
/// request handlers.
pub trait SlotStore: Send + Sync {
    /// Read a slot. A missing slot is `Ok(None)`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete a slot. Removing a missing slot succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
