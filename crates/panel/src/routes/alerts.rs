//! Alerts section (admin): inventory counters from the API and the local
//! alert log.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use farmalink_core::{AlertEntry, SectionKey};

use crate::api::AlertSummary;
use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{Notice, Shell};

use super::report_load_failure;
use super::shell::render_after_action;

/// Alert log entry view for templates.
#[derive(Debug, Clone)]
pub struct AlertRow {
    pub id: i64,
    pub kind: &'static str,
    pub kind_label: &'static str,
    pub message: String,
    pub when: String,
    pub details: Option<String>,
}

impl From<&AlertEntry> for AlertRow {
    fn from(entry: &AlertEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind.as_str(),
            kind_label: entry.kind.label(),
            message: entry.message.clone(),
            when: entry.occurred_at_display.clone(),
            details: entry.details_pretty(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "sections/alerts.html")]
pub struct AlertsTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
    pub summary: AlertSummary,
    pub summary_error: Option<String>,
    pub log: Vec<AlertRow>,
}

/// Render the alerts section.
pub async fn page(state: &AppState, shell: Shell, notice: Option<Notice>) -> Response {
    let (summary, summary_error) = match state.api().alert_summary().await {
        Ok(summary) => (summary, None),
        Err(e) => (
            AlertSummary::default(),
            Some(report_load_failure(state, "las alertas", &e).await),
        ),
    };

    // Read after the summary so a load failure shows up in the list.
    let log = state.alerts().list().await;

    AlertsTemplate {
        shell,
        notice,
        summary,
        summary_error,
        log: log.iter().map(AlertRow::from).collect(),
    }
    .into_response()
}

/// `POST /alertas/limpiar`: empty the alert log.
#[tracing::instrument(skip_all, fields(email = %user.identity.email))]
pub async fn clear(State(state): State<AppState>, user: CurrentUser) -> Response {
    if !user.can_open(SectionKey::Alerts) {
        return Redirect::to("/").into_response();
    }

    let notice = match state.alerts().clear().await {
        Ok(()) => Notice::success("Historial de alertas limpiado."),
        Err(e) => {
            tracing::error!(error = %e, "failed to clear alert log");
            Notice::error("No se pudo limpiar el historial de alertas.")
        }
    };

    render_after_action(&state, &user, SectionKey::Alerts, notice).await
}
