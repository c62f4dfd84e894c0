//! View router and the data shared by every panel page.
//!
//! [`view_for`] is the one place that maps a resolved section key to the
//! screen that renders it; the shell handler dispatches on its result.

use farmalink_core::{AlertKind, Identity, Role, SectionKey};

/// A screen of the panel body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Nothing selected: the body stays empty.
    Empty,
    Products,
    Purchases,
    Payments,
    Employees,
    Alerts,
}

/// Map a resolved section to its view. No section renders nothing.
#[must_use]
pub const fn view_for(key: Option<SectionKey>) -> View {
    match key {
        None => View::Empty,
        Some(SectionKey::Products) => View::Products,
        Some(SectionKey::Purchases) => View::Purchases,
        Some(SectionKey::Payments) => View::Payments,
        Some(SectionKey::Employees) => View::Employees,
        Some(SectionKey::Alerts) => View::Alerts,
    }
}

/// Sidebar entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Header and sidebar data for a logged-in page.
#[derive(Debug, Clone)]
pub struct Shell {
    pub email: String,
    pub role: Role,
    pub menu: Vec<MenuItem>,
    pub active: Option<SectionKey>,
}

impl Shell {
    /// Build the chrome for `identity` with `active` highlighted.
    ///
    /// `allowed` is the identity's allow-list; only those sections appear
    /// in the menu.
    #[must_use]
    pub fn new(identity: &Identity, allowed: &[SectionKey], active: Option<SectionKey>) -> Self {
        let menu = allowed
            .iter()
            .map(|&key| MenuItem {
                key: key.as_str(),
                label: key.label(),
                icon: key.icon(),
                active: Some(key) == active,
            })
            .collect();

        Self {
            email: identity.email.to_string(),
            role: identity.role,
            menu,
            active,
        }
    }

    /// Page title for the `<title>` tag.
    #[must_use]
    pub fn title(&self) -> String {
        self.active.map_or_else(
            || "FarmaLink".to_string(),
            |key| format!("{} · FarmaLink", key.label()),
        )
    }
}

/// One-off message shown above a section after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: AlertKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    /// CSS modifier (`notice--success`, ...).
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.kind.as_str()
    }
}
