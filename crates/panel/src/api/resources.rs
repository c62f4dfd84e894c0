//! Endpoint wrappers, one method per API operation.

use serde_json::Value;

use farmalink_core::PurchaseId;

use super::{
    AlertSummary, ApiClient, ApiError, Employee, NewProduct, NewPurchase, Payment, PaymentRequest,
    Product, Purchase,
};

impl ApiClient {
    /// `GET /api/productos/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/api/productos/").await
    }

    /// `POST /api/productos/`, returning whatever the API echoes back.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the API rejects the product.
    #[tracing::instrument(skip(self, product), fields(code = %product.code))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Value, ApiError> {
        self.post("/api/productos/", product).await
    }

    /// `GET /api/compras/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        self.get("/api/compras/").await
    }

    /// `POST /api/compras/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the API rejects the purchase.
    #[tracing::instrument(skip(self, purchase), fields(supplier = %purchase.supplier_id))]
    pub async fn create_purchase(&self, purchase: &NewPurchase) -> Result<Value, ApiError> {
        self.post("/api/compras/", purchase).await
    }

    /// `DELETE /api/compras/{id}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the API does not confirm the deletion.
    #[tracing::instrument(skip(self))]
    pub async fn delete_purchase(&self, id: PurchaseId) -> Result<(), ApiError> {
        self.delete(&format!("/api/compras/{id}")).await
    }

    /// `GET /api/empleados/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get("/api/empleados/").await
    }

    /// `GET /api/pagos/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list_payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.get("/api/pagos/").await
    }

    /// `POST /api/pagos/realizar`, returning the registered payment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the API rejects the payment.
    #[tracing::instrument(skip(self, payment), fields(rut = %payment.rut))]
    pub async fn make_payment(&self, payment: &PaymentRequest) -> Result<Payment, ApiError> {
        self.post("/api/pagos/realizar", payment).await
    }

    /// `GET /api/alertas/`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn alert_summary(&self) -> Result<AlertSummary, ApiError> {
        self.get("/api/alertas/").await
    }
}
