//! # Acme Dashboard
//!
//! Backend of an invoice dashboard, built around a validated mutation
//! pipeline: every create, update or delete of an invoice is validated,
//! persisted, invalidates the cached invoice list and then redirects.
//!
//! ## Features
//!
//! - **Explicit schema**: `InvoiceSchema` turns raw form fields into a
//!   `ValidatedInvoice` or field-attributed errors
//! - **Exact money**: amounts are parsed as decimals and stored as integer cents
//! - **Redirect as a value**: `Outcome::Redirect` is produced after the
//!   protected persistence step and can never be mistaken for a fault
//! - **Pluggable storage**: in-memory or PostgreSQL (`postgres` feature)
//! - **Cached views**: the tera-rendered list is cached and invalidated on mutation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acme::prelude::*;
//!
//! let actions = InvoiceActions::new(
//!     Arc::new(InvoiceSchema::strict()),
//!     Arc::new(InMemoryInvoiceStore::new()),
//!     Arc::new(ViewCache::new()),
//! );
//!
//! let form = FormData::new()
//!     .with("customerId", "c1")
//!     .with("amount", "15.50")
//!     .with("status", "pending");
//!
//! match actions.create_invoice(&FormState::initial(), &form).await {
//!     Outcome::Redirect(path) => println!("go to {}", path),
//!     Outcome::Error(err) => println!("{}", err),
//!     Outcome::Completed => {}
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Pipeline ===
    pub use crate::core::pipeline::{
        FormState, INVOICES_PATH, InvoiceActions, MutationError, Outcome, Stage, messages,
    };

    // === Domain ===
    pub use crate::core::{
        form::FormData,
        invoice::{InvoiceRecord, InvoiceStatus, NewInvoice, ValidatedInvoice},
        validation::{FieldErrors, InvoiceField, InvoiceSchema, SchemaMessages, Validation},
    };

    // === Seams ===
    pub use crate::core::{
        cache::{CacheInvalidator, NoopInvalidator, ViewCache},
        events::{EventBus, ViewEvent},
        store::InvoiceStore,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DashboardError, RenderError, RequestError, StoreError,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{DashboardHost, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
