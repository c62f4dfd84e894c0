//! Payments section (admin): salary payments list and register form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use farmalink_core::{AlertKind, Money, SectionKey};

use crate::api::{Payment, PaymentRequest};
use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{Notice, Shell};

use super::report_load_failure;
use super::shell::render_after_action;

/// Message shown after a registered payment.
pub const PAYMENT_DONE: &str = "Pago realizado correctamente.";

/// Payment view for templates.
#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub rut: String,
    pub name: String,
    pub date: String,
    pub amount: String,
}

impl From<&Payment> for PaymentRow {
    fn from(payment: &Payment) -> Self {
        Self {
            rut: payment.rut.clone(),
            name: payment.name.clone(),
            date: payment
                .paid_on
                .map_or_else(|| "—".to_string(), |d| d.format("%d-%m-%Y").to_string()),
            amount: Money::clp(payment.amount).to_string(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "sections/payments.html")]
pub struct PaymentsTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
    pub rows: Vec<PaymentRow>,
    pub load_error: Option<String>,
}

/// Register-payment form.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub name: String,
    pub rut: String,
    pub amount: String,
}

impl PaymentForm {
    fn into_request(self) -> Result<PaymentRequest, &'static str> {
        let name = self.name.trim();
        let rut = self.rut.trim();
        if name.is_empty() || rut.is_empty() {
            return Err("Nombre y RUT son obligatorios.");
        }

        // Pesos have no decimals; "450.000" is accepted as typed on screen.
        let amount = self
            .amount
            .trim()
            .replace('.', "")
            .parse::<Decimal>()
            .ok()
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or("El monto debe ser mayor a 0.")?;

        Ok(PaymentRequest {
            name: name.to_string(),
            rut: rut.to_string(),
            amount,
        })
    }
}

/// Render the payments section.
pub async fn page(state: &AppState, shell: Shell, notice: Option<Notice>) -> Response {
    let (rows, load_error) = match state.api().list_payments().await {
        Ok(payments) => (payments.iter().map(PaymentRow::from).collect(), None),
        Err(e) => (Vec::new(), Some(report_load_failure(state, "los pagos", &e).await)),
    };

    PaymentsTemplate {
        shell,
        notice,
        rows,
        load_error,
    }
    .into_response()
}

/// `POST /pagos`: register a payment.
#[tracing::instrument(skip(state, user, form), fields(email = %user.identity.email))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PaymentForm>,
) -> Response {
    if !user.can_open(SectionKey::Payments) {
        return Redirect::to("/").into_response();
    }

    let notice = match form.into_request() {
        Err(message) => Notice::error(message),
        Ok(request) => match state.api().make_payment(&request).await {
            Ok(_) => {
                state
                    .alerts()
                    .record(
                        AlertKind::Success,
                        PAYMENT_DONE,
                        Some(json!({
                            "rut": request.rut,
                            "monto": Money::clp(request.amount).to_string(),
                        })),
                    )
                    .await;
                Notice::success(PAYMENT_DONE)
            }
            Err(e) => {
                tracing::warn!(error = %e, "payment failed");
                let message = format!("No se pudo registrar el pago{}", e.status_suffix());
                state
                    .alerts()
                    .record(AlertKind::Error, &message, Some(e.details()))
                    .await;
                Notice::error(message)
            }
        },
    };

    render_after_action(&state, &user, SectionKey::Payments, notice).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn form(amount: &str) -> PaymentForm {
        PaymentForm {
            name: " Ana Pérez ".to_string(),
            rut: "12.345.678-9".to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn form_accepts_grouped_pesos() {
        let request = form("450.000").into_request().unwrap();
        assert_eq!(request.name, "Ana Pérez");
        assert_eq!(request.amount, Decimal::from(450_000));
    }

    #[test]
    fn form_rejects_non_positive_amounts() {
        assert!(form("0").into_request().is_err());
        assert!(form("-10").into_request().is_err());
        assert!(form("mucho").into_request().is_err());

        let mut missing = form("1000");
        missing.rut = "  ".to_string();
        assert!(missing.into_request().is_err());
    }

    #[test]
    fn row_formats_pesos() {
        let payment = Payment {
            name: "Ana".to_string(),
            rut: "1-9".to_string(),
            amount: Decimal::from(1_250_000),
            paid_on: NaiveDate::from_ymd_opt(2025, 2, 28),
        };
        let row = PaymentRow::from(&payment);
        assert_eq!(row.amount, "$1.250.000");
        assert_eq!(row.date, "28-02-2025");
    }
}
