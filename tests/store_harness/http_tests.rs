//! HTTP test macro for invoice store backends.
//!
//! The `dashboard_http_tests!` macro runs the dashboard router, built by
//! `ServerBuilder`, on top of a given store:
//! form/JSON → HTTP request → handler → pipeline → store → HTTP response.
//!
//! # Generated Tests
//!
//! - `test_health`: service name reported
//! - `test_create_form_redirects`: 303 to the list, invoice persisted in cents
//! - `test_create_json_body`: JSON bodies accepted
//! - `test_create_invalid_returns_form_state`: 422 with field errors, nothing stored
//! - `test_list_view_cache_lifecycle`: miss, hit, invalidated by a mutation
//! - `test_get_invoice` / `test_get_unknown_invoice` / `test_get_invalid_id`
//! - `test_update_put_and_post`: both verbs update, date kept
//! - `test_update_unknown_invoice`: 500 with the update fault message
//! - `test_delete_then_get`: 204 then 404, second delete is a fault
//! - `test_unsupported_content_type`: 400

/// Generate the HTTP suite for a storage backend.
///
/// `$factory` must produce a fresh `impl InvoiceStore + 'static`.
#[macro_export]
macro_rules! dashboard_http_tests {
    ($factory:expr) => {
        mod dashboard_http_tests {
            use super::*;
            use acme::core::invoice::InvoiceStatus;
            use acme::core::store::InvoiceStore;
            use acme::server::{ServerBuilder, VIEW_CACHE_HEADER};
            use axum::http::{StatusCode, header};
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use std::sync::Arc;
            use uuid::Uuid;

            async fn make_server() -> (TestServer, Arc<dyn InvoiceStore>) {
                let store: Arc<dyn InvoiceStore> = Arc::new($factory);
                let router = ServerBuilder::new()
                    .with_shared_store(store.clone())
                    .build()
                    .unwrap();
                (TestServer::new(router), store)
            }

            async fn only_invoice(store: &Arc<dyn InvoiceStore>) -> acme::core::InvoiceRecord {
                let mut records = store.list().await.unwrap();
                assert_eq!(records.len(), 1);
                records.remove(0)
            }

            fn cache_state(response: &axum_test::TestResponse) -> String {
                response
                    .headers()
                    .get(VIEW_CACHE_HEADER)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_string()
            }

            #[tokio::test]
            async fn test_health() {
                let (server, _) = make_server().await;
                let response = server.get("/health").await;
                response.assert_status_ok();
                response.assert_json(&json!({ "status": "ok", "service": "acme-dashboard" }));
            }

            // ==============================================================
            // Create
            // ==============================================================

            #[tokio::test]
            async fn test_create_form_redirects() {
                let (server, store) = make_server().await;

                let response = server
                    .post("/dashboard/invoices")
                    .form(&[("customerId", "c1"), ("amount", "15.50"), ("status", "pending")])
                    .await;

                response.assert_status(StatusCode::SEE_OTHER);
                assert_eq!(
                    response.headers().get(header::LOCATION).unwrap(),
                    "/dashboard/invoices"
                );

                let invoice = only_invoice(&store).await;
                assert_eq!(invoice.amount, 1550);
                assert_eq!(invoice.status, InvoiceStatus::Pending);
                assert_eq!(invoice.date, chrono::Utc::now().date_naive());
            }

            #[tokio::test]
            async fn test_create_json_body() {
                let (server, store) = make_server().await;

                let response = server
                    .post("/dashboard/invoices")
                    .json(&json!({ "customerId": "c9", "amount": 12.345, "status": "paid" }))
                    .await;

                response.assert_status(StatusCode::SEE_OTHER);
                let invoice = only_invoice(&store).await;
                assert_eq!(invoice.customer_id, "c9");
                assert_eq!(invoice.amount, 1235);
            }

            #[tokio::test]
            async fn test_create_invalid_returns_form_state() {
                let (server, store) = make_server().await;

                let response = server
                    .post("/dashboard/invoices")
                    .form(&[("customerId", ""), ("amount", "0"), ("status", "archived")])
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: Value = response.json();
                assert_eq!(body["message"], "Missing fields. Failed to create invoice.");
                assert_eq!(body["errors"]["customerId"][0], "Please select a customer.");
                assert_eq!(
                    body["errors"]["amount"][0],
                    "Please enter an amount greater than $0."
                );
                assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
                assert!(store.list().await.unwrap().is_empty());
            }

            // ==============================================================
            // List view
            // ==============================================================

            #[tokio::test]
            async fn test_list_view_cache_lifecycle() {
                let (server, _) = make_server().await;

                let first = server.get("/dashboard/invoices").await;
                first.assert_status_ok();
                assert_eq!(cache_state(&first), "miss");
                assert!(first.text().contains("No invoices yet."));

                let second = server.get("/dashboard/invoices").await;
                assert_eq!(cache_state(&second), "hit");

                server
                    .post("/dashboard/invoices")
                    .form(&[("customerId", "c1"), ("amount", "15.50"), ("status", "pending")])
                    .await
                    .assert_status(StatusCode::SEE_OTHER);

                let third = server.get("/dashboard/invoices").await;
                assert_eq!(cache_state(&third), "miss");
                assert!(third.text().contains("$15.50"));
            }

            #[tokio::test]
            async fn test_failed_mutation_keeps_cache() {
                let (server, _) = make_server().await;
                server.get("/dashboard/invoices").await.assert_status_ok();

                server
                    .delete(&format!("/dashboard/invoices/{}", Uuid::new_v4()))
                    .await
                    .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

                let response = server.get("/dashboard/invoices").await;
                assert_eq!(cache_state(&response), "hit");
            }

            // ==============================================================
            // Get
            // ==============================================================

            #[tokio::test]
            async fn test_get_invoice() {
                let (server, store) = make_server().await;
                let created = store
                    .insert(new_invoice("c1", 3040, InvoiceStatus::Paid, date(2022, 10, 29)))
                    .await
                    .unwrap();

                let response = server
                    .get(&format!("/dashboard/invoices/{}", created.id))
                    .await;

                response.assert_status_ok();
                response.assert_json(&json!({
                    "id": created.id.to_string(),
                    "customerId": "c1",
                    "amount": 3040,
                    "status": "paid",
                    "date": "2022-10-29"
                }));
            }

            #[tokio::test]
            async fn test_get_unknown_invoice() {
                let (server, _) = make_server().await;
                let response = server
                    .get(&format!("/dashboard/invoices/{}", Uuid::new_v4()))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVOICE_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_get_invalid_id() {
                let (server, _) = make_server().await;
                let response = server.get("/dashboard/invoices/not-a-uuid").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_ID");
            }

            // ==============================================================
            // Update
            // ==============================================================

            #[tokio::test]
            async fn test_update_put_and_post() {
                let (server, store) = make_server().await;
                let created = store
                    .insert(new_invoice("c1", 1550, InvoiceStatus::Pending, date(2024, 6, 1)))
                    .await
                    .unwrap();
                let path = format!("/dashboard/invoices/{}", created.id);

                server
                    .put(&path)
                    .form(&[("customerId", "c2"), ("amount", "20"), ("status", "paid")])
                    .await
                    .assert_status(StatusCode::SEE_OTHER);
                let invoice = only_invoice(&store).await;
                assert_eq!(invoice.customer_id, "c2");
                assert_eq!(invoice.amount, 2000);
                assert_eq!(invoice.date, date(2024, 6, 1));

                server
                    .post(&path)
                    .form(&[("customerId", "c2"), ("amount", "0.29"), ("status", "paid")])
                    .await
                    .assert_status(StatusCode::SEE_OTHER);
                assert_eq!(only_invoice(&store).await.amount, 29);
            }

            #[tokio::test]
            async fn test_update_invalid_uses_edit_message() {
                let (server, _) = make_server().await;
                let response = server
                    .put(&format!("/dashboard/invoices/{}", Uuid::new_v4()))
                    .form(&[("customerId", "c1"), ("amount", "abc"), ("status", "paid")])
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: Value = response.json();
                assert_eq!(body["message"], "Missing fields. Failed to edit invoice.");
                assert_eq!(body["errors"]["amount"][0], "Please enter a valid amount.");
            }

            #[tokio::test]
            async fn test_update_unknown_invoice() {
                let (server, _) = make_server().await;
                let response = server
                    .put(&format!("/dashboard/invoices/{}", Uuid::new_v4()))
                    .form(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")])
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                response.assert_json(&json!({
                    "message": "Database error: Failed to update invoice."
                }));
            }

            // ==============================================================
            // Delete
            // ==============================================================

            #[tokio::test]
            async fn test_delete_then_get() {
                let (server, store) = make_server().await;
                let created = store
                    .insert(new_invoice("c1", 100, InvoiceStatus::Paid, date(2024, 1, 1)))
                    .await
                    .unwrap();
                let path = format!("/dashboard/invoices/{}", created.id);

                server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);

                let again = server.delete(&path).await;
                again.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                again.assert_json(&json!({
                    "message": "Database error: Failed to delete invoice."
                }));
            }

            // ==============================================================
            // Request errors
            // ==============================================================

            #[tokio::test]
            async fn test_unsupported_content_type() {
                let (server, _) = make_server().await;
                let response = server
                    .post("/dashboard/invoices")
                    .text("customerId=c1")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "UNSUPPORTED_CONTENT_TYPE");
            }
        }
    };
}
