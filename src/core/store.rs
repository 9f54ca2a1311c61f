//! Store trait for invoice persistence

use crate::core::error::StoreError;
use crate::core::invoice::{InvoiceRecord, NewInvoice, ValidatedInvoice};
use async_trait::async_trait;
use uuid::Uuid;

/// Invoice persistence boundary
///
/// Every mutating method is a single atomic statement. Implementations
/// generate ids on insert and report a missing row on update/delete as
/// [`StoreError::NotFound`] rather than succeeding silently.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice and return it with its generated id
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord, StoreError>;

    /// Rewrite customer, amount and status of an existing invoice
    ///
    /// The creation date is left untouched.
    async fn update(&self, id: &Uuid, invoice: &ValidatedInvoice) -> Result<(), StoreError>;

    /// Remove an invoice
    async fn delete(&self, id: &Uuid) -> Result<(), StoreError>;

    /// Get an invoice by id
    async fn get(&self, id: &Uuid) -> Result<Option<InvoiceRecord>, StoreError>;

    /// List all invoices, newest first
    async fn list(&self) -> Result<Vec<InvoiceRecord>, StoreError>;
}
