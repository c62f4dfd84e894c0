//! Alert log commands.
//!
//! Operate on the same `farmalink_alertas_log` slot the panel writes, so
//! the panel should be stopped while editing.
//!
//! # Environment Variables
//!
//! - `FARMALINK_DATA_DIR` - Data directory used when `--data-dir` is absent

use std::path::PathBuf;

use serde_json::Value;

use farmalink_core::{AlertEntry, AlertKind};
use farmalink_panel::services::AlertLog;
use farmalink_panel::storage::FileSlots;

use super::CommandError;

/// Resolve the data directory: flag, then environment, then `./data`.
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("FARMALINK_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Open the alert log stored in `dir`.
pub fn open(dir: PathBuf) -> Result<AlertLog<FileSlots>, CommandError> {
    tracing::debug!(dir = %dir.display(), "opening alert log");
    Ok(AlertLog::new(FileSlots::new(dir)?))
}

/// Format one entry as a table line.
fn format_entry(entry: &AlertEntry) -> String {
    let mut line = format!(
        "{:<15} {:<12} {:<22} {}",
        entry.id,
        entry.kind.label(),
        entry.occurred_at_display,
        entry.message
    );
    if let Some(details) = &entry.details {
        line.push_str(&format!("  {}", Value::Object(details.clone())));
    }
    line
}

/// Print the log, newest first.
#[allow(clippy::print_stdout)]
pub async fn list(log: &AlertLog<FileSlots>, json: bool) -> Result<(), CommandError> {
    let entries = log.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No hay alertas registradas.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// Empty the log.
pub async fn clear(log: &AlertLog<FileSlots>) -> Result<(), CommandError> {
    log.clear().await?;
    tracing::info!("Alert log cleared");
    Ok(())
}

/// Parse the `--details` argument.
fn parse_details(raw: Option<&str>) -> Result<Option<Value>, CommandError> {
    raw.map(|raw| {
        serde_json::from_str(raw)
            .map_err(|e| CommandError::InvalidArgument(format!("details: {e}")))
    })
    .transpose()
}

/// Append an entry.
#[allow(clippy::print_stdout)]
pub async fn record(
    log: &AlertLog<FileSlots>,
    kind: &str,
    message: &str,
    details: Option<&str>,
) -> Result<(), CommandError> {
    let kind: AlertKind = kind
        .parse()
        .map_err(|_| CommandError::InvalidArgument(format!("unknown kind: {kind}")))?;
    let details = parse_details(details)?;

    let entry = log.append(kind, message, details).await?;
    println!("{}", format_entry(&entry));
    Ok(())
}
