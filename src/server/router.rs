//! Router builder utilities for the dashboard routes

use super::handlers::{
    create_invoice, delete_invoice, get_invoice, health_check, list_invoices, update_invoice,
};
use super::host::DashboardHost;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Build the invoice routes under the host's list path
///
/// With the default path:
/// - GET /dashboard/invoices - Rendered invoice list (cached)
/// - POST /dashboard/invoices - Create invoice
/// - GET /dashboard/invoices/{id} - Get invoice
/// - PUT|POST /dashboard/invoices/{id} - Update invoice
/// - DELETE /dashboard/invoices/{id} - Delete invoice
pub fn build_invoice_routes(host: Arc<DashboardHost>) -> Router {
    let list_path = host.list_path().to_string();
    let item_path = format!("{}/{{id}}", list_path);

    Router::new()
        .route(&list_path, get(list_invoices).post(create_invoice))
        .route(
            &item_path,
            get(get_invoice)
                .put(update_invoice)
                .post(update_invoice)
                .delete(delete_invoice),
        )
        .with_state(host)
}

/// Build health check routes
pub fn build_health_routes(host: Arc<DashboardHost>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(host)
}
