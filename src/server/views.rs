//! HTML views rendered with tera

use crate::core::error::RenderError;
use crate::core::invoice::InvoiceRecord;
use serde::Serialize;
use tera::{Context, Tera};

/// Template name of the invoice list
pub const INVOICE_LIST: &str = "invoices/list.html";

/// Invoice as shown in the list table
#[derive(Debug, Serialize)]
struct InvoiceRow<'a> {
    id: String,
    customer_id: &'a str,
    amount: String,
    status: &'static str,
    date: String,
}

impl<'a> From<&'a InvoiceRecord> for InvoiceRow<'a> {
    fn from(record: &'a InvoiceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            customer_id: &record.customer_id,
            amount: record.formatted_amount(),
            status: record.status.as_str(),
            date: record.date.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Compiled templates
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compile the built-in templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INVOICE_LIST, include_str!("templates/invoice_list.html"))
            .map_err(|e| render_error(INVOICE_LIST, e))?;
        Ok(Self { tera })
    }

    /// Render the invoice list; `list_path` is the base for row links
    pub fn render_invoice_list(
        &self,
        list_path: &str,
        records: &[InvoiceRecord],
    ) -> Result<String, RenderError> {
        let rows: Vec<InvoiceRow<'_>> = records.iter().map(InvoiceRow::from).collect();

        let mut context = Context::new();
        context.insert("list_path", list_path);
        context.insert("invoices", &rows);

        self.tera
            .render(INVOICE_LIST, &context)
            .map_err(|e| render_error(INVOICE_LIST, e))
    }
}

fn render_error(view: &str, err: tera::Error) -> RenderError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RenderError {
        view: view.to_string(),
        message,
    }
}
