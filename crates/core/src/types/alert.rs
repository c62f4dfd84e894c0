//! Alert log entries.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error returned when an alert kind is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid alert kind: {0}")]
pub struct AlertKindError(pub String);

/// Severity of an alert log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    /// Wire name (`info`, `success`, `warning`, `error`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Badge text shown next to the entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Éxito",
            Self::Warning => "Advertencia",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertKind {
    type Err = AlertKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(AlertKindError(s.to_string())),
        }
    }
}

/// One entry of the local alert log.
///
/// The persisted field names are the ones the log has always been stored
/// with, so existing logs keep loading:
///
/// ```json
/// {"id": 1731000000000, "tipo": "success", "mensaje": "Producto creado",
///  "detalles": {"codigo": "P-001"}, "fecha": "2024-11-07T17:20:00.000Z",
///  "fechaLegible": "07-11-2024, 14:20:00"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Creation time in epoch milliseconds, bumped when needed so ids stay
    /// strictly increasing.
    pub id: i64,
    #[serde(rename = "tipo")]
    pub kind: AlertKind,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "detalles", default)]
    pub details: Option<Map<String, Value>>,
    #[serde(rename = "fecha", with = "iso_millis")]
    pub occurred_at: DateTime<Utc>,
    /// Local time as shown to the user.
    #[serde(rename = "fechaLegible")]
    pub occurred_at_display: String,
}

impl AlertEntry {
    /// Details rendered as indented JSON, if any.
    #[must_use]
    pub fn details_pretty(&self) -> Option<String> {
        self.details
            .as_ref()
            .and_then(|map| serde_json::to_string_pretty(map).ok())
    }
}

/// `fecha` is written as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
