//! Macro-generated test suite for `InvoiceStore` contract validation.
//!
//! # Generated Tests
//!
//! ## Insert & Get
//! - `test_insert_and_get`: insert then retrieve, verify all fields
//! - `test_insert_generates_distinct_ids`: two inserts, two ids
//! - `test_get_nonexistent`: random id returns None
//!
//! ## List
//! - `test_list_empty`: empty store returns empty vec
//! - `test_list_newest_first`: ordered by date descending
//! - `test_list_same_date_ordered_by_id`: ties broken by id
//!
//! ## Update
//! - `test_update_existing_keeps_date`: fields rewritten, date untouched
//! - `test_update_is_idempotent`: same input twice, same state
//! - `test_update_nonexistent`: NotFound
//!
//! ## Delete
//! - `test_delete_existing`: gone afterwards
//! - `test_delete_nonexistent`: NotFound
//! - `test_delete_twice`: second delete is NotFound
//!
//! ## Concurrency
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `InvoiceStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test. For the concurrency test the store must be `Clone + 'static`
/// with clones sharing state.
#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use acme::core::invoice::InvoiceStatus;
            use acme::core::store::InvoiceStore;
            use tokio_test::{assert_err, assert_ok};
            use uuid::Uuid;

            // ==================================================================
            // Insert & Get
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("c1", 1550, InvoiceStatus::Pending, date(2024, 6, 1)))
                    .await
                    .unwrap();

                assert!(!created.id.is_nil());
                assert_eq!(created.customer_id, "c1");
                assert_eq!(created.amount, 1550);
                assert_eq!(created.status, InvoiceStatus::Pending);
                assert_eq!(created.date, date(2024, 6, 1));

                let fetched = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched, created);
            }

            #[tokio::test]
            async fn test_insert_generates_distinct_ids() {
                let store = $factory;
                let a = store
                    .insert(new_invoice("c1", 100, InvoiceStatus::Paid, date(2024, 1, 1)))
                    .await
                    .unwrap();
                let b = store
                    .insert(new_invoice("c1", 100, InvoiceStatus::Paid, date(2024, 1, 1)))
                    .await
                    .unwrap();
                assert_ne!(a.id, b.id);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            // ==================================================================
            // List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;
                for (cents, on) in [
                    (100, date(2024, 1, 5)),
                    (200, date(2024, 3, 1)),
                    (300, date(2023, 12, 31)),
                ] {
                    store
                        .insert(new_invoice("c1", cents, InvoiceStatus::Pending, on))
                        .await
                        .unwrap();
                }

                let amounts: Vec<i64> = store
                    .list()
                    .await
                    .unwrap()
                    .iter()
                    .map(|r| r.amount)
                    .collect();
                assert_eq!(amounts, vec![200, 100, 300]);
            }

            #[tokio::test]
            async fn test_list_same_date_ordered_by_id() {
                let store = $factory;
                for cents in [1, 2, 3, 4] {
                    store
                        .insert(new_invoice("c1", cents, InvoiceStatus::Paid, date(2024, 2, 2)))
                        .await
                        .unwrap();
                }

                let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|r| r.id).collect();
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(ids, sorted);
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing_keeps_date() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("c1", 1550, InvoiceStatus::Pending, date(2024, 6, 1)))
                    .await
                    .unwrap();

                assert_ok!(
                    store
                        .update(&created.id, &validated("c2", 9900, InvoiceStatus::Paid))
                        .await
                );

                let updated = store.get(&created.id).await.unwrap().unwrap();
                assert_eq!(updated.customer_id, "c2");
                assert_eq!(updated.amount, 9900);
                assert_eq!(updated.status, InvoiceStatus::Paid);
                assert_eq!(updated.date, date(2024, 6, 1));
            }

            #[tokio::test]
            async fn test_update_is_idempotent() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("c1", 1550, InvoiceStatus::Pending, date(2024, 6, 1)))
                    .await
                    .unwrap();
                let fields = validated("c1", 2000, InvoiceStatus::Paid);

                store.update(&created.id, &fields).await.unwrap();
                let first = store.get(&created.id).await.unwrap();
                store.update(&created.id, &fields).await.unwrap();
                let second = store.get(&created.id).await.unwrap();

                assert_eq!(first, second);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let err = store
                    .update(&Uuid::new_v4(), &validated("c1", 100, InvoiceStatus::Paid))
                    .await
                    .unwrap_err();
                assert!(err.is_not_found());
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("c1", 100, InvoiceStatus::Paid, date(2024, 1, 1)))
                    .await
                    .unwrap();

                assert_ok!(store.delete(&created.id).await);

                assert!(store.get(&created.id).await.unwrap().is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                let err = assert_err!(store.delete(&Uuid::new_v4()).await);
                assert!(err.is_not_found());
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let store = $factory;
                let created = store
                    .insert(new_invoice("c1", 100, InvoiceStatus::Paid, date(2024, 1, 1)))
                    .await
                    .unwrap();

                store.delete(&created.id).await.unwrap();
                assert!(store.delete(&created.id).await.unwrap_err().is_not_found());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();
                for i in 0..10_i64 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(new_invoice("c1", 100 + i, InvoiceStatus::Pending, date(2024, 1, 1)))
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list().await.unwrap().len(), 10);
            }
        }
    };
}
