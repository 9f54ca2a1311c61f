//! Invoice domain types
//!
//! `ValidatedInvoice` is the only shape the persistence layer ever sees for
//! writes; `InvoiceRecord` is what the store hands back.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in form display order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not exactly one of the known statuses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    /// Matching is exact: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Invoice data that passed schema validation
///
/// Money is held as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

/// Row to insert: validated fields plus the creation date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    /// Stamp a validated invoice with the given creation date
    pub fn from_validated(invoice: ValidatedInvoice, date: NaiveDate) -> Self {
        Self {
            customer_id: invoice.customer_id,
            amount_in_cents: invoice.amount_in_cents,
            status: invoice.status,
            date,
        }
    }
}

/// Persisted invoice as stored in the `invoices` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: Uuid,
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceRecord {
    /// Build the record for a freshly inserted row
    pub fn from_new(id: Uuid, invoice: NewInvoice) -> Self {
        Self {
            id,
            customer_id: invoice.customer_id,
            amount: invoice.amount_in_cents,
            status: invoice.status,
            date: invoice.date,
        }
    }

    /// Overwrite the mutable fields; `date` is kept as created
    pub fn apply(&mut self, invoice: &ValidatedInvoice) {
        self.customer_id = invoice.customer_id.clone();
        self.amount = invoice.amount_in_cents;
        self.status = invoice.status;
    }

    /// Amount formatted as dollars, e.g. `1550` -> `"$15.50"`
    pub fn formatted_amount(&self) -> String {
        format_cents(self.amount)
    }
}

/// Current calendar date in UTC, with no time component
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format integer cents as a dollar string
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}
