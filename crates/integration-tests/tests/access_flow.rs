//! Integration tests for login, persisted identity and section gating.

use farmalink_core::{Role, SectionKey};
use farmalink_integration_tests::TEST_CREDENTIALS;
use farmalink_panel::services::{LoginError, Navigator, SessionStore, allowed_sections, resolve};
use farmalink_panel::storage::{MemorySlots, SlotStore, keys};
use secrecy::SecretString;

fn password(raw: &str) -> SecretString {
    SecretString::from(raw.to_owned())
}

fn store(slots: MemorySlots) -> SessionStore<MemorySlots> {
    SessionStore::with_credentials(slots, TEST_CREDENTIALS)
}

// =============================================================================
// Login Scenarios
// =============================================================================

#[tokio::test]
async fn test_admin_login_sees_every_section() {
    let slots = MemorySlots::new();
    let mut session = store(slots.clone());

    let identity = session
        .login("admin@x", &password("adm123"))
        .expect("admin credentials are valid");
    assert_eq!(identity.role, Role::Admin);
    session.persist(&identity).await.expect("persist");

    let allowed = allowed_sections(session.role());
    assert_eq!(allowed, SectionKey::ALL.as_slice());
    assert_eq!(allowed.len(), 5);
}

#[tokio::test]
async fn test_employee_login_sees_products_and_purchases() {
    let mut session = store(MemorySlots::new());
    let identity = session
        .login("emp@x", &password("empleado123"))
        .expect("employee credentials are valid");
    session.persist(&identity).await.expect("persist");

    assert_eq!(session.role(), Some(Role::Employee));
    assert_eq!(
        allowed_sections(session.role()),
        [SectionKey::Products, SectionKey::Purchases]
    );
}

#[tokio::test]
async fn test_wrong_password_leaves_session_empty() {
    let slots = MemorySlots::new();
    let session = store(slots.clone());

    assert_eq!(
        session.login("emp@x", &password("wrong")),
        Err(LoginError::InvalidCredentials)
    );
    assert!(session.current().is_none());
    assert_eq!(slots.get(keys::CURRENT_USER).await.expect("get"), None);
}

#[tokio::test]
async fn test_identity_survives_a_new_store_over_the_same_slots() {
    let slots = MemorySlots::new();
    let mut first = store(slots.clone());
    let identity = first
        .login(" admin@x ", &password("adm123"))
        .expect("login");
    first.persist(&identity).await.expect("persist");

    let mut second = store(slots.clone());
    let restored = second.restore().await.expect("identity restored");
    assert_eq!(restored.email.as_str(), "admin@x");
    assert_eq!(restored.role, Role::Admin);

    second.clear().await.expect("clear");
    assert!(store(slots).restore().await.is_none());
}

#[tokio::test]
async fn test_tampered_session_slot_reads_as_logged_out() {
    let slots = MemorySlots::new();
    slots
        .set(keys::CURRENT_USER, r#"{"email":"admin@x","role":"root"}"#)
        .await
        .expect("seed");

    let mut session = store(slots);
    assert!(session.restore().await.is_none());
    assert!(allowed_sections(session.role()).is_empty());
}

// =============================================================================
// Section Resolution
// =============================================================================

#[test]
fn test_employee_cannot_resolve_payments() {
    let allowed = allowed_sections(Some(Role::Employee));
    assert_eq!(
        resolve(Some(SectionKey::Payments), allowed),
        Some(SectionKey::Products)
    );
    assert_eq!(
        resolve(Some(SectionKey::Purchases), allowed),
        Some(SectionKey::Purchases)
    );
}

#[test]
fn test_logged_out_resolves_to_nothing() {
    assert_eq!(resolve(Some(SectionKey::Products), allowed_sections(None)), None);
    assert_eq!(resolve(None, allowed_sections(None)), None);
}

#[test]
fn test_every_resolution_is_allowed() {
    for role in [None, Some(Role::Admin), Some(Role::Employee)] {
        let allowed = allowed_sections(role);
        for requested in SectionKey::ALL.iter().copied().map(Some).chain([None]) {
            if let Some(key) = resolve(requested, allowed) {
                assert!(allowed.contains(&key), "{role:?} resolved {key}");
            }
        }
    }
}

#[tokio::test]
async fn test_saved_selection_is_reresolved_after_role_change() {
    let slots = MemorySlots::new();

    let mut navigator = Navigator::default();
    assert!(navigator.select(SectionKey::Alerts, allowed_sections(Some(Role::Admin))));
    navigator.save(&slots).await.expect("save");

    // Same browser, now an employee.
    let loaded = Navigator::load(&slots).await;
    assert_eq!(
        loaded.current(allowed_sections(Some(Role::Employee))),
        Some(SectionKey::Products)
    );
}
