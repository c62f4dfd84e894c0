//! Purchases section: history, single-line purchase form and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use farmalink_core::{AlertKind, Money, ProductId, PurchaseId, SectionKey, SupplierId, UserId};

use crate::api::{NewPurchase, Purchase, PurchaseLine};
use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{Notice, Shell};

use super::report_load_failure;
use super::shell::{SectionQuery, render_after_action};

/// Suppliers offered by the form, with their API ids.
pub const SUPPLIERS: &[(&str, i32)] = &[
    ("Medicamentos XYZ", 1),
    ("Laboratorios ABC S.A.", 2),
    ("Farma Distribución", 3),
    ("Proveedor Genérico", 4),
];

/// Registering user sent with every purchase.
const REGISTERED_BY: &str = "Sistema";
const REGISTERED_BY_ID: i32 = 1;

/// Expiry date sent for purchase lines; the form does not ask for one.
fn default_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Supplier id for a form name. Unknown names fall back to the first
/// supplier.
#[must_use]
pub fn supplier_id(name: &str) -> SupplierId {
    let id = SUPPLIERS
        .iter()
        .find(|(supplier, _)| *supplier == name.trim())
        .map_or(1, |(_, id)| *id);
    SupplierId::new(id)
}

/// Display name for a supplier id.
#[must_use]
pub fn supplier_name(id: SupplierId) -> String {
    SUPPLIERS
        .iter()
        .find(|(_, known)| SupplierId::new(*known) == id)
        .map_or_else(|| format!("Proveedor #{id}"), |(name, _)| (*name).to_string())
}

/// Purchase view for templates.
#[derive(Debug, Clone)]
pub struct PurchaseRow {
    pub id: PurchaseId,
    pub supplier: String,
    pub date: String,
    pub total: String,
    pub registered_by: String,
    pub confirm_delete: bool,
}

impl PurchaseRow {
    fn new(purchase: &Purchase, confirm: Option<PurchaseId>) -> Self {
        Self {
            id: purchase.id,
            supplier: supplier_name(purchase.supplier_id),
            date: purchase.purchased_on.format("%Y-%m-%d").to_string(),
            total: Money::usd(purchase.total).to_string(),
            registered_by: purchase
                .registered_by
                .clone()
                .unwrap_or_else(|| "—".to_string()),
            confirm_delete: confirm == Some(purchase.id),
        }
    }
}

/// Purchases page template.
#[derive(Template, WebTemplate)]
#[template(path = "sections/purchases.html")]
pub struct PurchasesTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
    pub rows: Vec<PurchaseRow>,
    pub suppliers: Vec<&'static str>,
    pub load_error: Option<String>,
}

/// New purchase form. One line per purchase.
#[derive(Debug, Deserialize)]
pub struct PurchaseForm {
    pub supplier: String,
    pub date: String,
    pub product_id: String,
    pub quantity: String,
    pub unit_cost: String,
}

impl PurchaseForm {
    /// Validate and build the API body. `total = quantity × unit cost`.
    fn into_new_purchase(self) -> Result<NewPurchase, &'static str> {
        if self.supplier.trim().is_empty() {
            return Err("Selecciona un proveedor.");
        }
        let purchased_on = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Ingresa una fecha de compra válida.")?;
        let product_id = self
            .product_id
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or("Ingresa un producto válido.")?;
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or("La cantidad debe ser mayor a 0.")?;
        let unit_cost = self
            .unit_cost
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|cost| !cost.is_sign_negative())
            .ok_or("El precio no puede ser negativo.")?;

        Ok(NewPurchase {
            supplier_id: supplier_id(&self.supplier),
            purchased_on,
            total: Decimal::from(quantity) * unit_cost,
            registered_by: REGISTERED_BY.to_string(),
            registered_by_id: UserId::new(REGISTERED_BY_ID),
            lines: vec![PurchaseLine {
                product_id: ProductId::new(product_id),
                unit_cost,
                quantity,
                expires_on: default_expiry(),
            }],
        })
    }
}

/// Render the purchases section.
pub async fn page(
    state: &AppState,
    shell: Shell,
    notice: Option<Notice>,
    query: &SectionQuery,
) -> Response {
    let confirm = query.confirmar.map(PurchaseId::new);
    let (rows, load_error) = match state.api().list_purchases().await {
        Ok(purchases) => (
            purchases.iter().map(|p| PurchaseRow::new(p, confirm)).collect(),
            None,
        ),
        Err(e) => (Vec::new(), Some(report_load_failure(state, "las compras", &e).await)),
    };

    PurchasesTemplate {
        shell,
        notice,
        rows,
        suppliers: SUPPLIERS.iter().map(|(name, _)| *name).collect(),
        load_error,
    }
    .into_response()
}

/// `POST /compras`: register a purchase.
#[tracing::instrument(skip(state, user, form), fields(email = %user.identity.email))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PurchaseForm>,
) -> Response {
    if !user.can_open(SectionKey::Purchases) {
        return Redirect::to("/").into_response();
    }

    let notice = match form.into_new_purchase() {
        Err(message) => Notice::error(message),
        Ok(purchase) => match state.api().create_purchase(&purchase).await {
            Ok(created) => {
                state
                    .alerts()
                    .record(
                        AlertKind::Success,
                        "Compra registrada correctamente.",
                        Some(json!({
                            "proveedor": purchase.supplier_id,
                            "total": Money::usd(purchase.total).to_string(),
                            "respuesta": created,
                        })),
                    )
                    .await;
                Notice::success("Compra registrada correctamente.")
            }
            Err(e) => {
                tracing::warn!(error = %e, "purchase create failed");
                let message = format!("No se pudo guardar la compra{}", e.status_suffix());
                state
                    .alerts()
                    .record(AlertKind::Error, &message, Some(e.details()))
                    .await;
                Notice::error(message)
            }
        },
    };

    render_after_action(&state, &user, SectionKey::Purchases, notice).await
}

/// `POST /compras/{id}/eliminar`: delete a confirmed purchase.
#[tracing::instrument(skip(state, user), fields(email = %user.identity.email))]
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Response {
    if !user.can_open(SectionKey::Purchases) {
        return Redirect::to("/").into_response();
    }

    if id <= 0 {
        return AppError::BadRequest(format!("invalid purchase id {id}")).into_response();
    }

    let id = PurchaseId::new(id);
    let notice = match state.api().delete_purchase(id).await {
        Ok(()) => {
            state
                .alerts()
                .record(
                    AlertKind::Success,
                    "Compra eliminada correctamente.",
                    Some(json!({ "id_compra": id })),
                )
                .await;
            Notice::success(format!("Compra #{id} eliminada."))
        }
        Err(e) => {
            tracing::warn!(error = %e, "purchase delete failed");
            let message = format!("No se pudo eliminar la compra{}", e.status_suffix());
            state
                .alerts()
                .record(AlertKind::Error, &message, Some(e.details()))
                .await;
            Notice::error(message)
        }
    };

    render_after_action(&state, &user, SectionKey::Purchases, notice).await
}
