//! Field-attributed validation errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fields an invoice form can be rejected on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceField {
    CustomerId,
    Amount,
    Status,
}

impl InvoiceField {
    pub const ALL: [InvoiceField; 3] = [
        InvoiceField::CustomerId,
        InvoiceField::Amount,
        InvoiceField::Status,
    ];

    /// Form field name, as submitted and as reported back
    pub fn name(&self) -> &'static str {
        match self {
            InvoiceField::CustomerId => crate::core::form::fields::CUSTOMER_ID,
            InvoiceField::Amount => crate::core::form::fields::AMOUNT,
            InvoiceField::Status => crate::core::form::fields::STATUS,
        }
    }
}

impl fmt::Display for InvoiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error messages per field
///
/// Serializes to `{ customerId?: string[], amount?: string[], status?: string[] }`;
/// fields without errors are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: InvoiceField) -> &mut Option<Vec<String>> {
        match field {
            InvoiceField::CustomerId => &mut self.customer_id,
            InvoiceField::Amount => &mut self.amount,
            InvoiceField::Status => &mut self.status,
        }
    }

    /// Append a message to a field's error list
    pub fn push(&mut self, field: InvoiceField, message: impl Into<String>) {
        self.slot_mut(field)
            .get_or_insert_with(Vec::new)
            .push(message.into());
    }

    /// Messages recorded for a field (empty if none)
    pub fn get(&self, field: InvoiceField) -> &[String] {
        let slot = match field {
            InvoiceField::CustomerId => &self.customer_id,
            InvoiceField::Amount => &self.amount,
            InvoiceField::Status => &self.status,
        };
        slot.as_deref().unwrap_or(&[])
    }

    pub fn has(&self, field: InvoiceField) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        InvoiceField::ALL.iter().all(|f| !self.has(*f))
    }

    /// Fields that carry at least one message
    pub fn fields(&self) -> Vec<InvoiceField> {
        InvoiceField::ALL
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .fields()
            .into_iter()
            .map(|field| format!("{}: {}", field, self.get(field).join("; ")))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}
