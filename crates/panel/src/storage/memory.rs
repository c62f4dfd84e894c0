//! In-memory slot store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{SlotStore, StorageError};

/// Slots held in a process-local map.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> R,
    ) -> Result<R, StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory slots poisoned".to_string()))?;
        Ok(f(&mut slots))
    }
}

impl SlotStore for MemorySlots {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_slots(|slots| slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_slots(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_slots(|slots| {
            slots.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let slots = MemorySlots::new();
        assert_eq!(slots.get("k").await.unwrap(), None);

        slots.set("k", "v1").await.unwrap();
        slots.set("k", "v2").await.unwrap();
        assert_eq!(slots.get("k").await.unwrap().as_deref(), Some("v2"));

        slots.remove("k").await.unwrap();
        slots.remove("k").await.unwrap();
        assert_eq!(slots.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let slots = MemorySlots::new();
        let other = slots.clone();
        slots.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
