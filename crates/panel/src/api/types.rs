//! Records exchanged with the FarmaLink REST API.
//!
//! Field names on the wire are the API's (Spanish, snake case); the Rust
//! names are English.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmalink_core::{CategoryId, EmployeeId, ProductId, PurchaseId, SupplierId, UserId};

// =============================================================================
// Products
// =============================================================================

/// Product status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "ACT")]
    Active,
    /// Any code other than `ACT` reads as inactive.
    #[serde(rename = "INA", other)]
    Inactive,
}

impl ProductStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id_producto")]
    pub id: ProductId,
    #[serde(rename = "cod_producto")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "id_categoria")]
    pub category_id: CategoryId,
    /// Stock level under which the product counts as low.
    #[serde(rename = "umbral_stock", default)]
    pub stock_threshold: i32,
    #[serde(rename = "estado")]
    pub status: ProductStatus,
}

impl Product {
    /// Category as shown in lists (`Categoría 2`).
    #[must_use]
    pub fn category_label(&self) -> String {
        format!("Categoría {}", self.category_id)
    }
}

/// Body of `POST /api/productos/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "cod_producto")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "id_categoria")]
    pub category_id: CategoryId,
    #[serde(rename = "umbral_stock")]
    pub stock_threshold: i32,
    #[serde(rename = "estado")]
    pub status: ProductStatus,
}

// =============================================================================
// Purchases
// =============================================================================

/// One line of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    #[serde(rename = "id_producto")]
    pub product_id: ProductId,
    #[serde(rename = "costo_unitario", with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "fecha_venc")]
    pub expires_on: NaiveDate,
}

/// A recorded purchase from a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(rename = "id_compra")]
    pub id: PurchaseId,
    #[serde(rename = "id_proveedor")]
    pub supplier_id: SupplierId,
    #[serde(rename = "fecha_compra")]
    pub purchased_on: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "usuario_registra", default)]
    pub registered_by: Option<String>,
    #[serde(rename = "id_usuario_registra", default)]
    pub registered_by_id: Option<UserId>,
    #[serde(rename = "detalle", default)]
    pub lines: Vec<PurchaseLine>,
}

/// Body of `POST /api/compras/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPurchase {
    #[serde(rename = "id_proveedor")]
    pub supplier_id: SupplierId,
    #[serde(rename = "fecha_compra")]
    pub purchased_on: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "usuario_registra")]
    pub registered_by: String,
    #[serde(rename = "id_usuario_registra")]
    pub registered_by_id: UserId,
    #[serde(rename = "detalle")]
    pub lines: Vec<PurchaseLine>,
}

// =============================================================================
// Staff
// =============================================================================

/// Current activity of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeActivity {
    Available,
    OnShift,
    OnBreak,
}

impl EmployeeActivity {
    /// Map the API's free-form `actividad`; anything unknown is a break.
    #[must_use]
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "disponible" => Self::Available,
            "enturno" => Self::OnShift,
            _ => Self::OnBreak,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Disponible",
            Self::OnShift => "En turno",
            Self::OnBreak => "En descanso",
        }
    }
}

/// A pharmacy employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "id_empleado")]
    pub id: EmployeeId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    pub rut: String,
    #[serde(rename = "edad", default)]
    pub age: Option<u32>,
    #[serde(rename = "actividad", default)]
    pub activity: String,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    #[must_use]
    pub fn activity_status(&self) -> EmployeeActivity {
        EmployeeActivity::from_api(&self.activity)
    }
}

/// A salary payment made to an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "nombre")]
    pub name: String,
    pub rut: String,
    #[serde(rename = "monto_a_pagar", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "fecha_pago", default)]
    pub paid_on: Option<NaiveDate>,
}

/// Body of `POST /api/pagos/realizar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub rut: String,
    #[serde(rename = "monto_a_pagar", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

// =============================================================================
// Alerts
// =============================================================================

/// Inventory alert counters computed by the API. Missing counters are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSummary {
    #[serde(rename = "stock_bajo")]
    pub low_stock: u32,
    #[serde(rename = "por_vencer")]
    pub expiring: u32,
    #[serde(rename = "vencidos")]
    pub expired: u32,
    #[serde(rename = "total_alertas")]
    pub total: u32,
}
