//! Panel shell: section selection and dispatch to the section views.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use farmalink_core::SectionKey;

use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{Notice, Shell, View, view_for};

use super::{alerts, employees, payments, products, purchases};

/// Query parameters understood by section pages.
#[derive(Debug, Default, Deserialize)]
pub struct SectionQuery {
    /// Free-text search (products).
    pub q: Option<String>,
    /// Category filter (products).
    pub categoria: Option<String>,
    /// Purchase awaiting delete confirmation (purchases).
    pub confirmar: Option<i32>,
}

/// Body shown when no section resolves.
#[derive(Template, WebTemplate)]
#[template(path = "sections/empty.html")]
pub struct EmptyTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
}

/// Path of a section page.
#[must_use]
pub fn section_path(key: SectionKey) -> String {
    format!("/sections/{key}")
}

/// `GET /`: go to the saved section, or the first one the role allows.
pub async fn home(State(state): State<AppState>, user: CurrentUser) -> Response {
    let navigator = user.navigator().await;
    match navigator.current(user.allowed()) {
        Some(key) => Redirect::to(&section_path(key)).into_response(),
        None => render(&state, &user, None, None, &SectionQuery::default()).await,
    }
}

/// `POST /inicio`: home button. Drops the selection.
pub async fn reset(user: CurrentUser) -> Redirect {
    let mut navigator = user.navigator().await;
    navigator.reset();
    if let Err(e) = navigator.save(&user.slots).await {
        tracing::warn!(error = %e, "failed to reset section");
    }
    Redirect::to("/")
}

/// `GET /sections/{key}`: select a section and render it.
///
/// Unknown or disallowed keys are ignored and the browser is sent back to
/// its current section.
#[tracing::instrument(skip(state, user, query), fields(email = %user.identity.email))]
pub async fn section(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(key): Path<String>,
    Query(query): Query<SectionQuery>,
) -> Response {
    let Ok(key) = key.parse::<SectionKey>() else {
        return Redirect::to("/").into_response();
    };

    let mut navigator = user.navigator().await;
    if !navigator.select(key, user.allowed()) {
        return Redirect::to("/").into_response();
    }
    if let Err(e) = navigator.save(&user.slots).await {
        tracing::warn!(error = %e, "failed to save section");
    }

    render(&state, &user, Some(key), None, &query).await
}

/// Render the page for `key` inside the shell.
pub async fn render(
    state: &AppState,
    user: &CurrentUser,
    key: Option<SectionKey>,
    notice: Option<Notice>,
    query: &SectionQuery,
) -> Response {
    let shell = Shell::new(&user.identity, user.allowed(), key);
    match view_for(key) {
        View::Empty => EmptyTemplate { shell, notice }.into_response(),
        View::Products => products::page(state, shell, notice, query).await,
        View::Purchases => purchases::page(state, shell, notice, query).await,
        View::Payments => payments::page(state, shell, notice).await,
        View::Employees => employees::page(state, shell, notice).await,
        View::Alerts => alerts::page(state, shell, notice).await,
    }
}

/// Re-render `key` with the outcome of an action.
pub(crate) async fn render_after_action(
    state: &AppState,
    user: &CurrentUser,
    key: SectionKey,
    notice: Notice,
) -> Response {
    render(state, user, Some(key), Some(notice), &SectionQuery::default()).await
}
