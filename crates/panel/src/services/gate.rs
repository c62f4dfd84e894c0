//! Authorization gate: role → visible sections, and the active selection.
//!
//! One static table drives the sidebar, the router and the guards, so a
//! section is either visible and reachable or neither.

use farmalink_core::{Role, SectionKey};

use crate::storage::{SlotStore, StorageError, keys};

const ADMIN_SECTIONS: &[SectionKey] = &[
    SectionKey::Products,
    SectionKey::Purchases,
    SectionKey::Payments,
    SectionKey::Employees,
    SectionKey::Alerts,
];

const EMPLOYEE_SECTIONS: &[SectionKey] = &[SectionKey::Products, SectionKey::Purchases];

/// Sections visible to `role`, in menu order. No role sees nothing.
#[must_use]
pub const fn allowed_sections(role: Option<Role>) -> &'static [SectionKey] {
    match role {
        Some(Role::Admin) => ADMIN_SECTIONS,
        Some(Role::Employee) => EMPLOYEE_SECTIONS,
        None => &[],
    }
}

/// Pick the section to show.
///
/// The requested key wins if it is allowed; otherwise the first allowed
/// key; otherwise nothing.
#[must_use]
pub fn resolve(requested: Option<SectionKey>, allowed: &[SectionKey]) -> Option<SectionKey> {
    requested
        .filter(|key| allowed.contains(key))
        .or_else(|| allowed.first().copied())
}

/// The user's section selection.
///
/// Stored in the session slot so it survives page loads. The selection is
/// always re-resolved against the current allow-list before use, so a
/// stale or foreign value can never open a hidden section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    selected: Option<SectionKey>,
}

impl Navigator {
    #[must_use]
    pub const fn new(selected: Option<SectionKey>) -> Self {
        Self { selected }
    }

    /// Raw selection, before resolution.
    #[must_use]
    pub const fn selected(&self) -> Option<SectionKey> {
        self.selected
    }

    /// Select `key` if it is allowed. A disallowed key is ignored and
    /// `false` is returned.
    pub fn select(&mut self, key: SectionKey, allowed: &[SectionKey]) -> bool {
        if allowed.contains(&key) {
            self.selected = Some(key);
            true
        } else {
            tracing::debug!(section = %key, "ignoring selection outside allow-list");
            false
        }
    }

    /// Drop the selection (home button, logout).
    pub const fn reset(&mut self) {
        self.selected = None;
    }

    /// Section to render for `allowed`.
    #[must_use]
    pub fn current(&self, allowed: &[SectionKey]) -> Option<SectionKey> {
        resolve(self.selected, allowed)
    }

    /// Load the selection from the session slot. Anything unreadable is no
    /// selection.
    pub async fn load<S: SlotStore>(slots: &S) -> Self {
        let selected = match slots.get(keys::CURRENT_SECTION).await {
            Ok(Some(raw)) => raw.parse().ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "section slot unreadable");
                None
            }
        };
        Self { selected }
    }

    /// Write the selection to the session slot.
    ///
    /// # Errors
    ///
    /// Returns the slot error if the write fails.
    pub async fn save<S: SlotStore>(&self, slots: &S) -> Result<(), StorageError> {
        match self.selected {
            Some(key) => slots.set(keys::CURRENT_SECTION, key.as_str()).await,
            None => slots.remove(keys::CURRENT_SECTION).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemorySlots;

    #[test]
    fn visibility_table() {
        assert_eq!(
            allowed_sections(Some(Role::Admin)),
            &[
                SectionKey::Products,
                SectionKey::Purchases,
                SectionKey::Payments,
                SectionKey::Employees,
                SectionKey::Alerts,
            ]
        );
        assert_eq!(
            allowed_sections(Some(Role::Employee)),
            &[SectionKey::Products, SectionKey::Purchases]
        );
        assert!(allowed_sections(None).is_empty());
    }

    #[test]
    fn resolve_prefers_requested_then_first() {
        let employee = allowed_sections(Some(Role::Employee));
        assert_eq!(
            resolve(Some(SectionKey::Purchases), employee),
            Some(SectionKey::Purchases)
        );
        assert_eq!(
            resolve(Some(SectionKey::Payments), employee),
            Some(SectionKey::Products)
        );
        assert_eq!(resolve(None, employee), Some(SectionKey::Products));
        assert_eq!(resolve(Some(SectionKey::Alerts), &[]), None);
        assert_eq!(resolve(None, &[]), None);
    }

    #[test]
    fn select_ignores_disallowed_keys() {
        let employee = allowed_sections(Some(Role::Employee));
        let mut nav = Navigator::default();

        assert!(nav.select(SectionKey::Purchases, employee));
        assert!(!nav.select(SectionKey::Employees, employee));
        assert_eq!(nav.selected(), Some(SectionKey::Purchases));
        assert_eq!(nav.current(employee), Some(SectionKey::Purchases));
    }

    #[test]
    fn role_change_takes_effect_immediately() {
        let mut nav = Navigator::default();
        assert!(nav.select(SectionKey::Alerts, allowed_sections(Some(Role::Admin))));

        let employee = allowed_sections(Some(Role::Employee));
        assert_eq!(nav.current(employee), Some(SectionKey::Products));
        assert_eq!(nav.current(allowed_sections(None)), None);
    }

    #[test]
    fn reset_falls_back_to_first_allowed() {
        let admin = allowed_sections(Some(Role::Admin));
        let mut nav = Navigator::new(Some(SectionKey::Payments));
        nav.reset();
        assert_eq!(nav.selected(), None);
        assert_eq!(nav.current(admin), Some(SectionKey::Products));
    }

    #[tokio::test]
    async fn load_and_save_through_slot() {
        let slots = MemorySlots::new();
        assert_eq!(Navigator::load(&slots).await, Navigator::default());

        Navigator::new(Some(SectionKey::Employees))
            .save(&slots)
            .await
            .unwrap();
        assert_eq!(
            slots.get(keys::CURRENT_SECTION).await.unwrap().as_deref(),
            Some("empleados")
        );
        assert_eq!(
            Navigator::load(&slots).await.selected(),
            Some(SectionKey::Employees)
        );

        Navigator::default().save(&slots).await.unwrap();
        assert_eq!(slots.get(keys::CURRENT_SECTION).await.unwrap(), None);
    }

    #[tokio::test]
    async fn load_ignores_garbage() {
        let slots = MemorySlots::new();
        slots.set(keys::CURRENT_SECTION, "bodega").await.unwrap();
        assert_eq!(Navigator::load(&slots).await.selected(), None);
    }
}
