//! Validation and filtering system
//!
//! Raw form input is validated at the boundary into a `Validation`, so
//! everything downstream works on `ValidatedInvoice` only.

pub mod errors;
pub mod filters;
pub mod schema;
pub mod validators;

pub use errors::{FieldErrors, InvoiceField};
pub use schema::{InvoiceSchema, SchemaMessages, Validation};
