//! Alert log: a bounded, most-recent-first record of panel activity.
//!
//! Section handlers call [`AlertLog::success`] / [`AlertLog::error`] (and
//! friends) after every mutation or failed API call; the alerts section
//! reads it back with [`AlertLog::list`].
//!
//! # Persisted format
//!
//! The whole log lives in one durable slot (`farmalink_alertas_log`) as a
//! JSON array of [`AlertEntry`], newest first, at most [`MAX_ALERTS`] long.
//!
//! # Guarantees
//!
//! - A stored log that cannot be read or parsed is treated as empty.
//!   A single entry that fails to decode is skipped; the rest still load.
//! - If writing fails, the previously stored log is left as it was.
//! - Appends are serialized, so concurrent requests never drop each
//!   other's entries.
//! - Ids are strictly increasing: the creation time in epoch milliseconds,
//!   or one past the newest stored id if the clock has not moved past it.

use chrono::{DateTime, Local, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;

use farmalink_core::{AlertEntry, AlertKind};

use crate::storage::{SlotStore, StorageError, keys};

/// Maximum number of entries kept.
pub const MAX_ALERTS: usize = 100;

/// Display format of `fechaLegible` (day-month-year, 24h clock).
const DISPLAY_FORMAT: &str = "%d-%m-%Y, %H:%M:%S";

/// Errors from writing the alert log.
#[derive(Debug, Error)]
pub enum AlertLogError {
    #[error("Failed to persist alert log: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode alert log: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Bounded alert log over a slot store.
pub struct AlertLog<S> {
    slots: S,
    write_lock: Mutex<()>,
}

impl<S: SlotStore> AlertLog<S> {
    pub fn new(slots: S) -> Self {
        Self {
            slots,
            write_lock: Mutex::new(()),
        }
    }

    /// Underlying slot store.
    pub const fn slots(&self) -> &S {
        &self.slots
    }

    /// All entries, newest first. Empty if nothing (readable) is stored.
    pub async fn list(&self) -> Vec<AlertEntry> {
        let raw = match self.slots.get(keys::ALERT_LOG).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "alert log unreadable, treating as empty");
                return Vec::new();
            }
        };

        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "alert log malformed, treating as empty");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .filter_map(|value| {
                serde_json::from_value(value)
                    .inspect_err(|e| tracing::warn!(error = %e, "skipping malformed alert entry"))
                    .ok()
            })
            .collect()
    }

    /// Record a new entry at the head of the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated log could not be encoded or written.
    /// The stored log is unchanged in that case.
    #[tracing::instrument(skip(self, details), fields(kind = %kind))]
    pub async fn append(
        &self,
        kind: AlertKind,
        message: &str,
        details: Option<Value>,
    ) -> Result<AlertEntry, AlertLogError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.list().await;
        let newest_id = entries.iter().map(|entry| entry.id).max();
        let entry = build_entry(kind, message, details, Utc::now(), newest_id);

        entries.insert(0, entry.clone());
        entries.truncate(MAX_ALERTS);

        let raw = serde_json::to_string(&entries)?;
        self.slots.set(keys::ALERT_LOG, &raw).await?;

        tracing::info!(id = entry.id, message = %entry.message, "alert recorded");
        Ok(entry)
    }

    /// Append an `info` entry.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub async fn info(
        &self,
        message: &str,
        details: Option<Value>,
    ) -> Result<AlertEntry, AlertLogError> {
        self.append(AlertKind::Info, message, details).await
    }

    /// Append a `success` entry.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub async fn success(
        &self,
        message: &str,
        details: Option<Value>,
    ) -> Result<AlertEntry, AlertLogError> {
        self.append(AlertKind::Success, message, details).await
    }

    /// Append a `warning` entry.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub async fn warning(
        &self,
        message: &str,
        details: Option<Value>,
    ) -> Result<AlertEntry, AlertLogError> {
        self.append(AlertKind::Warning, message, details).await
    }

    /// Append an `error` entry.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub async fn error(
        &self,
        message: &str,
        details: Option<Value>,
    ) -> Result<AlertEntry, AlertLogError> {
        self.append(AlertKind::Error, message, details).await
    }

    /// Append, logging instead of returning a failure.
    ///
    /// For handlers reporting an outcome where the alert itself is
    /// secondary to the response.
    pub async fn record(&self, kind: AlertKind, message: &str, details: Option<Value>) {
        if let Err(e) = self.append(kind, message, details).await {
            tracing::warn!(error = %e, "could not record alert");
        }
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot could not be removed.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), AlertLogError> {
        let _guard = self.write_lock.lock().await;
        self.slots.remove(keys::ALERT_LOG).await?;
        tracing::info!("alert log cleared");
        Ok(())
    }
}

/// Build a normalized entry created at `now`.
fn build_entry(
    kind: AlertKind,
    message: &str,
    details: Option<Value>,
    now: DateTime<Utc>,
    newest_id: Option<i64>,
) -> AlertEntry {
    let now_ms = now.timestamp_millis();
    let id = newest_id.map_or(now_ms, |newest| now_ms.max(newest.saturating_add(1)));
    let occurred_at = DateTime::from_timestamp_millis(now_ms).unwrap_or(now);

    AlertEntry {
        id,
        kind,
        message: message.to_string(),
        details: normalize_details(details),
        occurred_at,
        occurred_at_display: occurred_at
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string(),
    }
}

/// `null` means no details; a bare value is wrapped as `{"value": ...}`.
fn normalize_details(details: Option<Value>) -> Option<Map<String, Value>> {
    match details? {
        Value::Null => None,
        Value::Object(map) => Some(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Some(map)
        }
    }
}
