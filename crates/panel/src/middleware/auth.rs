//! Authentication extractors.
//!
//! Handlers take [`CurrentUser`] to require a logged-in identity. The
//! identity is restored from the session slot on every request, so a
//! cleared or corrupted slot logs the browser out immediately.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use farmalink_core::{Identity, SectionKey};

use crate::services::{Navigator, SessionStore, allowed_sections};
use crate::storage::SessionSlots;

/// The logged-in user of this request, with its session slots.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(user: CurrentUser) -> impl IntoResponse {
///     format!("Hola, {}", user.identity.email)
/// }
/// ```
pub struct CurrentUser {
    pub identity: Identity,
    pub slots: SessionSlots,
}

impl CurrentUser {
    /// Sections this user may open.
    #[must_use]
    pub const fn allowed(&self) -> &'static [SectionKey] {
        allowed_sections(Some(self.identity.role))
    }

    /// Whether this user may open `key`.
    #[must_use]
    pub fn can_open(&self, key: SectionKey) -> bool {
        self.allowed().contains(&key)
    }

    /// Session store over this request's slots, already holding the
    /// identity.
    pub async fn session_store(&self) -> SessionStore<SessionSlots> {
        let mut store = SessionStore::new(self.slots.clone());
        store.restore().await;
        store
    }

    /// Saved section selection.
    pub async fn navigator(&self) -> Navigator {
        Navigator::load(&self.slots).await
    }
}

/// Rejection when a handler needs a logged-in user.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// No session layer in front of the handler.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

async fn restore_identity(session: &Session) -> Option<Identity> {
    SessionStore::new(SessionSlots::new(session.clone()))
        .restore()
        .await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::MissingSession)?;

        let identity = restore_identity(&session)
            .await
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self {
            identity,
            slots: SessionSlots::new(session),
        })
    }
}

/// Extractor that optionally gets the current identity.
///
/// Unlike [`CurrentUser`], this never rejects.
pub struct OptionalUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => restore_identity(session).await,
            None => None,
        };

        Ok(Self(identity))
    }
}
