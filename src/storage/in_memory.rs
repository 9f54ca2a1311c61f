//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::StoreError;
use crate::core::invoice::{InvoiceRecord, NewInvoice, ValidatedInvoice};
use crate::core::store::InvoiceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory invoice store
///
/// Useful for testing and development. Uses an async RwLock so it can be
/// shared freely across tasks; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, InvoiceRecord>>>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = InvoiceRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            invoices: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored invoices
    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<InvoiceRecord, StoreError> {
        let record = InvoiceRecord::from_new(Uuid::new_v4(), invoice);
        self.invoices
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &Uuid, invoice: &ValidatedInvoice) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().await;
        let record = invoices
            .get_mut(id)
            .ok_or(StoreError::NotFound { id: *id })?;
        record.apply(invoice);
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        self.invoices
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id: *id })
    }

    async fn get(&self, id: &Uuid) -> Result<Option<InvoiceRecord>, StoreError> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<InvoiceRecord>, StoreError> {
        let mut records: Vec<InvoiceRecord> =
            self.invoices.read().await.values().cloned().collect();
        // Newest first; id breaks ties so the order is stable
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}
