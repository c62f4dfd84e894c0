//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use farmalink_core::AlertKind;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{CurrentUser, OptionalUser};
use crate::services::{LoginError, Navigator, SessionStore};
use crate::state::AppState;
use crate::storage::SessionSlots;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page, or go straight to the panel if already logged in.
pub async fn login_page(
    OptionalUser(identity): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> Response {
    if identity.is_some() {
        return Redirect::to("/").into_response();
    }

    // Only one failure is ever reported, whatever the query says.
    let error = query
        .error
        .map(|_| LoginError::InvalidCredentials.to_string());
    LoginTemplate { error }.into_response()
}

/// Handle login form submission.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let slots = SessionSlots::new(session);
    let mut store = SessionStore::new(slots.clone());

    let identity = match store.login(&form.email, &SecretString::from(form.password)) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::info!(error = %e, "login rejected");
            return Redirect::to("/login?error=credentials").into_response();
        }
    };

    if let Err(e) = store.persist(&identity).await {
        tracing::error!(error = %e, "failed to persist session");
    }
    if let Err(e) = Navigator::default().save(&slots).await {
        tracing::warn!(error = %e, "failed to reset section");
    }

    set_sentry_user(&identity);
    tracing::info!(email = %identity.email, role = %identity.role, "login");
    state
        .alerts()
        .record(
            AlertKind::Info,
            "Inicio de sesión",
            Some(json!({ "email": identity.email, "rol": identity.role })),
        )
        .await;

    Redirect::to("/").into_response()
}

/// Log out and return to the login page.
///
/// Fails when the identity cannot be removed, since redirecting would
/// leave the browser logged in.
pub async fn logout(user: CurrentUser) -> Result<Redirect, AppError> {
    let mut store = user.session_store().await;
    store.clear().await?;

    let mut navigator = user.navigator().await;
    navigator.reset();
    if let Err(e) = navigator.save(&user.slots).await {
        tracing::warn!(error = %e, "failed to clear section");
    }

    clear_sentry_user();
    tracing::info!(email = %user.identity.email, "logout");
    Ok(Redirect::to("/login"))
}
