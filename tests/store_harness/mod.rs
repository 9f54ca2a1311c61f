//! Shared test harness for invoice store backends
//!
//! Provides fixtures plus two macro suites that any `InvoiceStore` backend
//! can be run through:
//! - `invoice_store_tests!` checks the store contract directly
//! - `dashboard_http_tests!` drives the full HTTP surface on top of it
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod invoice_store_tests;

#[macro_use]
pub mod http_tests;

use acme::core::form::FormData;
use acme::core::invoice::{InvoiceStatus, NewInvoice, ValidatedInvoice};
use chrono::NaiveDate;

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Row ready for `InvoiceStore::insert`
pub fn new_invoice(customer_id: &str, cents: i64, status: InvoiceStatus, on: NaiveDate) -> NewInvoice {
    NewInvoice {
        customer_id: customer_id.to_string(),
        amount_in_cents: cents,
        status,
        date: on,
    }
}

/// Fields for `InvoiceStore::update`
pub fn validated(customer_id: &str, cents: i64, status: InvoiceStatus) -> ValidatedInvoice {
    ValidatedInvoice {
        customer_id: customer_id.to_string(),
        amount_in_cents: cents,
        status,
    }
}

/// Submission that passes the schema: `{c1, 15.50, pending}`
pub fn valid_form() -> FormData {
    FormData::new()
        .with("customerId", "c1")
        .with("amount", "15.50")
        .with("status", "pending")
}
