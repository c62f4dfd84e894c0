//! Slot store over the request's cookie session.

use tower_sessions::Session;

use super::{SlotStore, StorageError};

/// Slots kept in the browser's `tower-sessions` session.
///
/// Each slot is stored as a JSON string value under its key, so the
/// session record mirrors what a browser would keep in session storage.
#[derive(Debug, Clone)]
pub struct SessionSlots {
    session: Session,
}

impl SessionSlots {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The wrapped session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl SlotStore for SessionSlots {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.session.remove_value(key).await?;
        Ok(())
    }
}
