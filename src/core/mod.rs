//! Core module containing the invoice domain, the mutation pipeline and
//! the traits at its seams

pub mod cache;
pub mod error;
pub mod events;
pub mod extractors;
pub mod form;
pub mod invoice;
pub mod pipeline;
pub mod store;
pub mod validation;

pub use cache::{CacheInvalidator, CachedView, NoopInvalidator, ViewCache};
pub use error::{ConfigError, DashboardError, RenderError, RequestError, StoreError};
pub use events::{EventBus, EventEnvelope, ViewEvent};
pub use extractors::FormInput;
pub use form::FormData;
pub use invoice::{InvoiceRecord, InvoiceStatus, NewInvoice, ValidatedInvoice};
pub use pipeline::{FormState, INVOICES_PATH, InvoiceActions, MutationError, Outcome, Stage};
pub use store::InvoiceStore;
pub use validation::{FieldErrors, InvoiceField, InvoiceSchema, SchemaMessages, Validation};
