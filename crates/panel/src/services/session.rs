//! Session store: the authenticated identity of one browser.
//!
//! Login is checked against a static credential table compiled into the
//! binary. The table is a demo fixture and offers no real security.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use farmalink_core::{Identity, Role};

use crate::storage::{SlotStore, StorageError, keys};

/// One row of the static credential table.
#[derive(Debug, Clone, Copy)]
pub struct Credential {
    /// Exact (case-sensitive) login key. Usually an email address, but any
    /// string works.
    pub email: &'static str,
    /// Exact password.
    pub password: &'static str,
    /// Role granted on a match.
    pub role: Role,
}

/// Built-in panel accounts.
pub const DEFAULT_CREDENTIALS: &[Credential] = &[
    Credential {
        email: "Administrador@gmail.com",
        password: "adm123",
        role: Role::Admin,
    },
    Credential {
        email: "Empleado@gmail.com",
        password: "empleado123",
        role: Role::Employee,
    },
];

/// Login failure.
///
/// Deliberately carries no detail about which field was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Correo o contraseña inválidos.")]
    InvalidCredentials,
}

/// Current identity plus its persisted mirror in the session slot.
///
/// A store is built per request over that request's slots; [`restore`]
/// loads whatever the slot holds.
///
/// [`restore`]: SessionStore::restore
pub struct SessionStore<S> {
    slots: S,
    credentials: &'static [Credential],
    current: Option<Identity>,
}

impl<S: SlotStore> SessionStore<S> {
    /// Create a store using [`DEFAULT_CREDENTIALS`].
    pub const fn new(slots: S) -> Self {
        Self::with_credentials(slots, DEFAULT_CREDENTIALS)
    }

    /// Create a store with a custom credential table.
    pub const fn with_credentials(slots: S, credentials: &'static [Credential]) -> Self {
        Self {
            slots,
            credentials,
            current: None,
        }
    }

    /// Identity held in memory, if any.
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Role of the current identity, if any.
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|identity| identity.role)
    }

    /// Load the identity from the session slot.
    ///
    /// A missing, unreadable, or malformed slot yields `None`; this never
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&mut self) -> Option<Identity> {
        let raw = match self.slots.get(keys::CURRENT_USER).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.current = None;
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "session slot unreadable, treating as logged out");
                self.current = None;
                return None;
            }
        };

        self.current = match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(error = %e, "session slot malformed, treating as logged out");
                None
            }
        };
        self.current.clone()
    }

    /// Check credentials against the static table.
    ///
    /// The email is trimmed and then matched case-sensitively; the password
    /// must match exactly. Nothing is stored; call [`persist`] on success.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::InvalidCredentials` for an unknown email or a
    /// wrong password alike.
    ///
    /// [`persist`]: SessionStore::persist
    pub fn login(&self, email: &str, password: &SecretString) -> Result<Identity, LoginError> {
        let email = email.trim();
        let entry = self
            .credentials
            .iter()
            .find(|entry| entry.email == email)
            .ok_or(LoginError::InvalidCredentials)?;

        if entry.password != password.expose_secret() {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(Identity::new(entry.email, entry.role))
    }

    /// Make `identity` current and write it to the session slot.
    ///
    /// The in-memory identity is set even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns the slot error if the identity could not be written.
    #[tracing::instrument(skip_all, fields(email = %identity.email, role = %identity.role))]
    pub async fn persist(&mut self, identity: &Identity) -> Result<(), StorageError> {
        self.current = Some(identity.clone());
        let raw = serde_json::to_string(identity)
            .map_err(|e| StorageError::Unavailable(format!("cannot encode identity: {e}")))?;
        self.slots.set(keys::CURRENT_USER, &raw).await
    }

    /// Forget the identity in memory and in the session slot.
    ///
    /// # Errors
    ///
    /// Returns the slot error if the slot could not be removed; memory is
    /// cleared regardless.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.current = None;
        self.slots.remove(keys::CURRENT_USER).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemorySlots;

    const TEST_CREDENTIALS: &[Credential] = &[
        Credential {
            email: "admin@x",
            password: "adm123",
            role: Role::Admin,
        },
        Credential {
            email: "emp@x",
            password: "empleado123",
            role: Role::Employee,
        },
    ];

    fn store(slots: MemorySlots) -> SessionStore<MemorySlots> {
        SessionStore::with_credentials(slots, TEST_CREDENTIALS)
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn login_resolves_role_from_table() {
        let store = store(MemorySlots::new());

        let admin = store.login("admin@x", &secret("adm123")).unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email.as_str(), "admin@x");

        let emp = store.login("emp@x", &secret("empleado123")).unwrap();
        assert_eq!(emp.role, Role::Employee);
    }

    #[test]
    fn login_trims_email_but_not_password() {
        let store = store(MemorySlots::new());

        let identity = store.login("  emp@x\t", &secret("empleado123")).unwrap();
        assert_eq!(identity.email.as_str(), "emp@x");

        assert_eq!(
            store.login("emp@x", &secret(" empleado123")),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let store = store(MemorySlots::new());

        let wrong_password = store.login("emp@x", &secret("wrong")).unwrap_err();
        let unknown_email = store.login("nobody@x", &secret("empleado123")).unwrap_err();
        let wrong_case = store.login("EMP@x", &secret("empleado123")).unwrap_err();

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(unknown_email, wrong_case);
        assert_eq!(wrong_password.to_string(), "Correo o contraseña inválidos.");
    }

    #[test]
    fn default_table_accounts() {
        let store = SessionStore::new(MemorySlots::new());
        assert_eq!(
            store
                .login("Administrador@gmail.com", &secret("adm123"))
                .unwrap()
                .role,
            Role::Admin
        );
        assert_eq!(
            store
                .login("Empleado@gmail.com", &secret("empleado123"))
                .unwrap()
                .role,
            Role::Employee
        );
    }

    #[test]
    fn login_accepts_any_string_key() {
        const USERNAMES: &[Credential] = &[Credential {
            email: "admin",
            password: "adm123",
            role: Role::Admin,
        }];
        let store = SessionStore::with_credentials(MemorySlots::new(), USERNAMES);

        let identity = store.login("admin", &secret("adm123")).unwrap();
        assert_eq!(identity.email, "admin");
        assert_eq!(identity.role, Role::Admin);
    }

    #[tokio::test]
    async fn persist_then_restore() {
        let slots = MemorySlots::new();
        let mut first = store(slots.clone());
        let identity = first.login("admin@x", &secret("adm123")).unwrap();
        first.persist(&identity).await.unwrap();
        assert_eq!(first.current(), Some(&identity));

        let raw = slots.get(keys::CURRENT_USER).await.unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            serde_json::json!({ "email": "admin@x", "role": "admin" })
        );

        let mut second = store(slots);
        assert_eq!(second.restore().await, Some(identity));
        assert_eq!(second.role(), Some(Role::Admin));
    }

    /// Slots that can be read but reject every write.
    #[derive(Default)]
    struct ReadOnlySlots(MemorySlots);

    impl SlotStore for ReadOnlySlots {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_persist_keeps_identity_in_memory_only() {
        let mut session =
            SessionStore::with_credentials(ReadOnlySlots::default(), TEST_CREDENTIALS);
        let identity = session.login("admin@x", &secret("adm123")).unwrap();

        assert!(session.persist(&identity).await.is_err());
        assert_eq!(session.current(), Some(&identity));
        assert_eq!(session.role(), Some(Role::Admin));

        assert_eq!(session.restore().await, None);
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn restore_absent_or_malformed_is_none() {
        let slots = MemorySlots::new();
        let mut session = store(slots.clone());
        assert_eq!(session.restore().await, None);

        for raw in ["not json", "{}", r#"{"email":"a@b","role":"owner"}"#, "null"] {
            slots.set(keys::CURRENT_USER, raw).await.unwrap();
            assert_eq!(session.restore().await, None, "slot content: {raw}");
            assert!(session.current().is_none());
        }
    }

    #[tokio::test]
    async fn clear_removes_memory_and_slot() {
        let slots = MemorySlots::new();
        let mut session = store(slots.clone());
        let identity = session.login("emp@x", &secret("empleado123")).unwrap();
        session.persist(&identity).await.unwrap();

        session.clear().await.unwrap();
        assert!(session.current().is_none());
        assert_eq!(slots.get(keys::CURRENT_USER).await.unwrap(), None);
        assert_eq!(session.restore().await, None);
    }
}
