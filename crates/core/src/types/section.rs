//! Section keys for the management screens.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a section name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown section: {0}")]
pub struct SectionKeyError(pub String);

/// Identifier of a management screen.
///
/// Serialized with the panel's wire names (`productos`, `compras`, `pagos`,
/// `empleados`, `alertas`), which also appear in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    #[serde(rename = "productos")]
    Products,
    #[serde(rename = "compras")]
    Purchases,
    #[serde(rename = "pagos")]
    Payments,
    #[serde(rename = "empleados")]
    Employees,
    #[serde(rename = "alertas")]
    Alerts,
}

impl SectionKey {
    /// Every section, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Products,
        Self::Purchases,
        Self::Payments,
        Self::Employees,
        Self::Alerts,
    ];

    /// Wire name of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "productos",
            Self::Purchases => "compras",
            Self::Payments => "pagos",
            Self::Employees => "empleados",
            Self::Alerts => "alertas",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "Productos",
            Self::Purchases => "Compras",
            Self::Payments => "Pagos",
            Self::Employees => "Empleados",
            Self::Alerts => "Alertas",
        }
    }

    /// Menu icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Products => "💊",
            Self::Purchases => "🛒",
            Self::Payments => "💳",
            Self::Employees => "👥",
            Self::Alerts => "⚠️",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = SectionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SectionKeyError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_key() {
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!("".parse::<SectionKey>().is_err());
        assert!("products".parse::<SectionKey>().is_err());
        assert!("Productos".parse::<SectionKey>().is_err());
    }
}
