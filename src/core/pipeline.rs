//! Validated mutation pipeline for invoices
//!
//! Every form submission runs one pass of:
//!
//! ```text
//! Idle → Validating → {Rejected | Validated} → Persisting → {Failed | Persisted}
//!      → Invalidating → Redirecting (success) | Returned (error, or delete)
//! ```
//!
//! There is no retry transition. A successful create/update yields
//! [`Outcome::Redirect`]; the HTTP layer performs the navigation. The
//! redirect is a plain value produced after the protected persistence step
//! has returned, so fault handling can never swallow it.

use crate::core::cache::CacheInvalidator;
use crate::core::error::StoreError;
use crate::core::form::FormData;
use crate::core::invoice::{NewInvoice, ValidatedInvoice, today};
use crate::core::store::InvoiceStore;
use crate::core::validation::{FieldErrors, InvoiceSchema, Validation};
use chrono::NaiveDate;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use uuid::Uuid;

/// Path of the invoice list view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Summary messages reported to the form
pub mod messages {
    pub const CREATE_INVALID: &str = "Missing fields. Failed to create invoice.";
    pub const UPDATE_INVALID: &str = "Missing fields. Failed to edit invoice.";
    pub const CREATE_FAILED: &str = "Database error: Failed to create invoice.";
    pub const UPDATE_FAILED: &str = "Database error: Failed to update invoice.";
    pub const DELETE_FAILED: &str = "Database error: Failed to delete invoice.";
}

/// Pipeline states, as reported in traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Rejected,
    Validated,
    Persisting,
    Failed,
    Persisted,
    Invalidating,
    Redirecting,
    Returned,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::Rejected => "rejected",
            Stage::Validated => "validated",
            Stage::Persisting => "persisting",
            Stage::Failed => "failed",
            Stage::Persisted => "persisted",
            Stage::Invalidating => "invalidating",
            Stage::Redirecting => "redirecting",
            Stage::Returned => "returned",
        }
    }

    /// Whether the invocation ends in this stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Redirecting | Stage::Returned)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a mutation did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// User-correctable, attributed to fields; nothing was written
    Validation { message: String, errors: FieldErrors },
    /// The store rejected or failed the statement
    Persistence { message: String },
}

impl MutationError {
    pub fn message(&self) -> &str {
        match self {
            MutationError::Validation { message, .. } | MutationError::Persistence { message } => {
                message
            }
        }
    }
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::Validation { message, errors } => write!(f, "{} ({})", message, errors),
            MutationError::Persistence { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for MutationError {}

/// State handed back to the form between submissions
///
/// Serializes to `{ message?: string, errors?: { customerId?, amount?, status? } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl FormState {
    /// Fresh state for a form that has not been submitted yet
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn is_error(&self) -> bool {
        self.message.is_some() || self.errors.is_some()
    }
}

impl From<MutationError> for FormState {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation { message, errors } => FormState {
                message: Some(message),
                errors: Some(errors),
            },
            MutationError::Persistence { message } => FormState {
                message: Some(message),
                errors: None,
            },
        }
    }
}

/// Result of one pipeline invocation
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Mutation persisted and the list view invalidated; navigate here
    Redirect(String),
    /// Mutation persisted and the list view invalidated; stay put
    Completed,
    /// Nothing changed (validation) or the store failed (persistence)
    Error(MutationError),
}

impl Outcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect(_))
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(path) => Some(path),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MutationError> {
        match self {
            Outcome::Error(err) => Some(err),
            _ => None,
        }
    }

    /// State to re-render the form with, if the mutation failed
    pub fn into_form_state(self) -> Option<FormState> {
        match self {
            Outcome::Error(err) => Some(err.into()),
            _ => None,
        }
    }
}

/// Failure of the protected persistence step
enum Fault {
    Store(StoreError),
    Panicked(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Store(e) => write!(f, "{}", e),
            Fault::Panicked(msg) => write!(f, "store panicked: {}", msg),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// The invoice mutation operations
///
/// Holds shared, immutable collaborators only; each call is independent.
#[derive(Clone)]
pub struct InvoiceActions {
    schema: Arc<InvoiceSchema>,
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn CacheInvalidator>,
    list_path: String,
    clock: Clock,
}

impl InvoiceActions {
    pub fn new(
        schema: Arc<InvoiceSchema>,
        store: Arc<dyn InvoiceStore>,
        cache: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            schema,
            store,
            cache,
            list_path: INVOICES_PATH.to_string(),
            clock: Arc::new(today),
        }
    }

    /// Override the list view path that is invalidated and redirected to
    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = path.into();
        self
    }

    /// Override the source of creation dates
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn schema(&self) -> &InvoiceSchema {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    /// Validate a submission and create an invoice from it
    #[tracing::instrument(name = "create_invoice", skip_all)]
    pub async fn create_invoice(&self, previous: &FormState, input: &FormData) -> Outcome {
        let invoice = match self.validate(previous, input) {
            Ok(invoice) => invoice,
            Err(errors) => return Self::rejected(messages::CREATE_INVALID, errors),
        };

        let invoice = NewInvoice::from_validated(invoice, (self.clock)());
        tracing::info!(
            customer_id = %invoice.customer_id,
            amount_in_cents = invoice.amount_in_cents,
            status = %invoice.status,
            date = %invoice.date,
            "creating invoice"
        );

        enter(Stage::Persisting);
        let record = match self.protect("create", self.store.insert(invoice)).await {
            Ok(record) => record,
            Err(_) => return Self::failed(messages::CREATE_FAILED),
        };
        enter(Stage::Persisted);
        tracing::info!(invoice_id = %record.id, "invoice created");

        self.invalidate_and_redirect().await
    }

    /// Validate a submission and rewrite the invoice `id` with it
    #[tracing::instrument(name = "update_invoice", skip_all, fields(invoice_id = %id))]
    pub async fn update_invoice(&self, id: &Uuid, previous: &FormState, input: &FormData) -> Outcome {
        let invoice = match self.validate(previous, input) {
            Ok(invoice) => invoice,
            Err(errors) => return Self::rejected(messages::UPDATE_INVALID, errors),
        };

        tracing::info!(
            customer_id = %invoice.customer_id,
            amount_in_cents = invoice.amount_in_cents,
            status = %invoice.status,
            "updating invoice"
        );

        enter(Stage::Persisting);
        if self
            .protect("update", self.store.update(id, &invoice))
            .await
            .is_err()
        {
            return Self::failed(messages::UPDATE_FAILED);
        }
        enter(Stage::Persisted);

        self.invalidate_and_redirect().await
    }

    /// Delete the invoice `id`
    ///
    /// No validation and no redirect: this is triggered from the list view.
    #[tracing::instrument(name = "delete_invoice", skip_all, fields(invoice_id = %id))]
    pub async fn delete_invoice(&self, id: &Uuid) -> Outcome {
        enter(Stage::Idle);
        enter(Stage::Persisting);
        if self
            .protect("delete", self.store.delete(id))
            .await
            .is_err()
        {
            return Self::failed(messages::DELETE_FAILED);
        }
        enter(Stage::Persisted);

        enter(Stage::Invalidating);
        self.cache.invalidate(&self.list_path).await;
        tracing::info!("invoice deleted");

        enter(Stage::Returned);
        Outcome::Completed
    }

    fn validate(&self, previous: &FormState, input: &FormData) -> Result<ValidatedInvoice, FieldErrors> {
        enter(Stage::Idle);
        if previous.is_error() {
            tracing::debug!(previous = ?previous.message, "resubmission after a failed attempt");
        }

        enter(Stage::Validating);
        match self.schema.validate(input) {
            Validation::Valid(invoice) => {
                enter(Stage::Validated);
                Ok(invoice)
            }
            Validation::Invalid(errors) => {
                enter(Stage::Rejected);
                tracing::info!(fields = %errors, "invoice form rejected");
                Err(errors)
            }
        }
    }

    /// Run one store call, turning errors and panics into a `Fault`
    async fn protect<T, F>(&self, operation: &'static str, call: F) -> Result<T, Fault>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let fault = match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => Fault::Store(err),
            Err(payload) => Fault::Panicked(panic_message(payload.as_ref())),
        };

        enter(Stage::Failed);
        tracing::error!(operation, error = %fault, "invoice persistence failed");
        Err(fault)
    }

    async fn invalidate_and_redirect(&self) -> Outcome {
        enter(Stage::Invalidating);
        self.cache.invalidate(&self.list_path).await;

        enter(Stage::Redirecting);
        Outcome::Redirect(self.list_path.clone())
    }

    fn rejected(message: &str, errors: FieldErrors) -> Outcome {
        enter(Stage::Returned);
        Outcome::Error(MutationError::Validation {
            message: message.to_string(),
            errors,
        })
    }

    fn failed(message: &str) -> Outcome {
        enter(Stage::Returned);
        Outcome::Error(MutationError::Persistence {
            message: message.to_string(),
        })
    }
}

impl fmt::Debug for InvoiceActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceActions")
            .field("schema", &self.schema)
            .field("list_path", &self.list_path)
            .finish_non_exhaustive()
    }
}

fn enter(stage: Stage) {
    tracing::trace!(stage = %stage, "pipeline stage");
}
