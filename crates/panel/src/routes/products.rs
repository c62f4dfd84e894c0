//! Products section: catalog list with search, category filter and create.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use farmalink_core::{AlertKind, CategoryId, SectionKey};

use crate::api::{NewProduct, Product, ProductStatus};
use crate::filters;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{Notice, Shell};

use super::report_load_failure;
use super::shell::{SectionQuery, render_after_action};

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "Todas";

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub code: String,
    pub name: String,
    pub category: String,
    pub threshold: i32,
    pub status: &'static str,
    pub active: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            category: product.category_label(),
            threshold: product.stock_threshold,
            status: product.status.label(),
            active: product.status == ProductStatus::Active,
        }
    }
}

/// Entry of the category filter.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "sections/products.html")]
pub struct ProductsTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
    pub rows: Vec<ProductRow>,
    pub total: usize,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub load_error: Option<String>,
}

/// Create-product form.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub category: String,
    pub threshold: String,
    /// `Activo` or `Inactivo`.
    #[serde(default)]
    pub status: String,
}

impl ProductForm {
    /// Validate and map to the API body.
    fn into_new_product(self) -> Result<NewProduct, &'static str> {
        let code = self.code.trim();
        let name = self.name.trim();
        let category = self.category.trim();
        if code.is_empty() || name.is_empty() || category.is_empty() {
            return Err("Código, nombre y categoría son obligatorios.");
        }

        let stock_threshold = self
            .threshold
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|value| *value >= 0)
            .ok_or("El umbral de stock debe ser un número entero no negativo.")?;

        let status = if self.status == "Inactivo" {
            ProductStatus::Inactive
        } else {
            ProductStatus::Active
        };

        Ok(NewProduct {
            code: code.to_string(),
            name: name.to_string(),
            category_id: category_for_text(category),
            stock_threshold,
            status,
        })
    }
}

/// Map a free-text category to its id: "antib..." is 2, "vitam..." is 3,
/// anything else 1. Vitamins win when both match.
#[must_use]
pub fn category_for_text(text: &str) -> CategoryId {
    let text = text.to_lowercase();
    if text.contains("vitam") {
        CategoryId::new(3)
    } else if text.contains("antib") {
        CategoryId::new(2)
    } else {
        CategoryId::new(1)
    }
}

/// Category labels in first-seen order, preceded by [`ALL_CATEGORIES`].
fn category_options(rows: &[ProductRow]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for row in rows {
        if !options.contains(&row.category) {
            options.push(row.category.clone());
        }
    }
    options
}

/// Rows matching the search text (code, name or category, any case) and
/// the selected category.
#[must_use]
pub fn filter_products(rows: &[ProductRow], search: &str, category: &str) -> Vec<ProductRow> {
    let needle = search.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            needle.is_empty()
                || row.code.to_lowercase().contains(&needle)
                || row.name.to_lowercase().contains(&needle)
                || row.category.to_lowercase().contains(&needle)
        })
        .filter(|row| category == ALL_CATEGORIES || row.category == category)
        .cloned()
        .collect()
}

/// Render the products section.
pub async fn page(
    state: &AppState,
    shell: Shell,
    notice: Option<Notice>,
    query: &SectionQuery,
) -> Response {
    let search = query.q.clone().unwrap_or_default();
    let selected_category = query
        .categoria
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    let (all, load_error) = match state.api().list_products().await {
        Ok(products) => (products.iter().map(ProductRow::from).collect(), None),
        Err(e) => (Vec::new(), Some(report_load_failure(state, "los productos", &e).await)),
    };

    ProductsTemplate {
        shell,
        notice,
        total: all.len(),
        categories: category_options(&all)
            .into_iter()
            .map(|name| CategoryOption {
                selected: name == selected_category,
                name,
            })
            .collect(),
        rows: filter_products(&all, &search, &selected_category),
        search,
        load_error,
    }
    .into_response()
}

/// `POST /productos`: create a product, then show the refreshed list.
#[tracing::instrument(skip(state, user, form), fields(email = %user.identity.email))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ProductForm>,
) -> Response {
    if !user.can_open(SectionKey::Products) {
        return Redirect::to("/").into_response();
    }

    let notice = match form.into_new_product() {
        Err(message) => Notice::error(message),
        Ok(product) => match state.api().create_product(&product).await {
            Ok(created) => {
                state
                    .alerts()
                    .record(
                        AlertKind::Success,
                        "Producto creado correctamente.",
                        Some(json!({ "producto": product.code, "respuesta": created })),
                    )
                    .await;
                Notice::success(format!("Producto {} creado correctamente.", product.code))
            }
            Err(e) => {
                tracing::warn!(error = %e, "product create failed");
                let message = format!("No se pudo crear el producto{}", e.status_suffix());
                state
                    .alerts()
                    .record(AlertKind::Error, &message, Some(e.details()))
                    .await;
                Notice::error(message)
            }
        },
    };

    render_after_action(&state, &user, SectionKey::Products, notice).await
}
