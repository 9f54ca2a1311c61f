//! The invoice form schema
//!
//! `InvoiceSchema` is built once at startup and shared by reference between
//! the create and update operations. It turns a `FormData` into either a
//! `ValidatedInvoice` or the full set of field errors.

use super::errors::{FieldErrors, InvoiceField};
use super::filters::{coerce_decimal, to_cents, trim};
use super::validators::{self, Rule};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceStatus, ValidatedInvoice};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest customer id the `invoices.customer_id` column accepts
pub const MAX_CUSTOMER_ID_LEN: usize = 255;

/// User-facing messages reported by the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMessages {
    pub customer_required: String,
    pub customer_too_long: String,
    pub amount_invalid: String,
    pub amount_not_positive: String,
    pub status_invalid: String,
}

impl Default for SchemaMessages {
    fn default() -> Self {
        Self {
            customer_required: "Please select a customer.".to_string(),
            customer_too_long: format!(
                "Customer id must be at most {} characters.",
                MAX_CUSTOMER_ID_LEN
            ),
            amount_invalid: "Please enter a valid amount.".to_string(),
            amount_not_positive: "Please enter an amount greater than $0.".to_string(),
            status_invalid: "Please select an invoice status.".to_string(),
        }
    }
}

/// Result of running the schema over raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(ValidatedInvoice),
    Invalid(FieldErrors),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    /// Convert into a `Result`, for callers that prefer `?`
    pub fn into_result(self) -> Result<ValidatedInvoice, FieldErrors> {
        match self {
            Validation::Valid(invoice) => Ok(invoice),
            Validation::Invalid(errors) => Err(errors),
        }
    }
}

/// Immutable validation schema for invoice forms
///
/// Rules per field run in order and all of them run, so a field can carry
/// several messages at once.
pub struct InvoiceSchema {
    messages: SchemaMessages,
    customer_id: Vec<Rule>,
    amount: Vec<Rule>,
    status: Vec<Rule>,
}

impl InvoiceSchema {
    /// Build the schema with the given messages
    pub fn new(messages: SchemaMessages) -> Self {
        let statuses = InvoiceStatus::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let customer_id: Vec<Rule> = vec![
            Box::new(validators::required(messages.customer_required.clone())),
            Box::new(validators::max_length(
                MAX_CUSTOMER_ID_LEN,
                messages.customer_too_long.clone(),
            )),
        ];
        let amount: Vec<Rule> = vec![
            Box::new(validators::number(messages.amount_invalid.clone())),
            Box::new(validators::greater_than(
                Decimal::ZERO,
                messages.amount_not_positive.clone(),
            )),
        ];
        let status: Vec<Rule> = vec![Box::new(validators::one_of(
            statuses,
            messages.status_invalid.clone(),
        ))];

        Self {
            messages,
            customer_id,
            amount,
            status,
        }
    }

    /// Schema with the default messages
    pub fn strict() -> Self {
        Self::new(SchemaMessages::default())
    }

    pub fn messages(&self) -> &SchemaMessages {
        &self.messages
    }

    fn rules(&self, field: InvoiceField) -> &[Rule] {
        match field {
            InvoiceField::CustomerId => &self.customer_id,
            InvoiceField::Amount => &self.amount,
            InvoiceField::Status => &self.status,
        }
    }

    /// Validate and coerce raw form input
    pub fn validate(&self, input: &FormData) -> Validation {
        let mut errors = FieldErrors::new();

        for field in InvoiceField::ALL {
            let raw = input.get(field.name());
            for rule in self.rules(field) {
                if let Err(message) = rule(raw) {
                    errors.push(field, message);
                }
            }
        }

        if !errors.is_empty() {
            return Validation::Invalid(errors);
        }

        // Rules passed, so the conversions below only fail on values the
        // rules cannot express (amounts too large for i64 cents).
        let customer_id = trim(input.get(InvoiceField::CustomerId.name()))
            .unwrap_or_default()
            .to_string();

        let amount_in_cents = coerce_decimal(input.get(InvoiceField::Amount.name()))
            .and_then(to_cents)
            .filter(|cents| *cents > 0);
        let Some(amount_in_cents) = amount_in_cents else {
            errors.push(InvoiceField::Amount, self.messages.amount_invalid.clone());
            return Validation::Invalid(errors);
        };

        let status = match input
            .get(InvoiceField::Status.name())
            .unwrap_or_default()
            .parse::<InvoiceStatus>()
        {
            Ok(status) => status,
            Err(_) => {
                errors.push(InvoiceField::Status, self.messages.status_invalid.clone());
                return Validation::Invalid(errors);
            }
        };

        Validation::Valid(ValidatedInvoice {
            customer_id,
            amount_in_cents,
            status,
        })
    }
}

impl Default for InvoiceSchema {
    fn default() -> Self {
        Self::strict()
    }
}

impl fmt::Debug for InvoiceSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceSchema")
            .field("messages", &self.messages)
            .field("customer_id_rules", &self.customer_id.len())
            .field("amount_rules", &self.amount.len())
            .field("status_rules", &self.status.len())
            .finish()
    }
}
