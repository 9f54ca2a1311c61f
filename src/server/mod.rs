//! Server module for the dashboard HTTP surface
//!
//! `ServerBuilder` wires configuration, an invoice store and the view cache
//! into a [`DashboardHost`] and exposes it over axum:
//! - Health routes
//! - Invoice list view (tera, cached) and mutation routes

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;
pub mod views;

pub use builder::ServerBuilder;
pub use handlers::{VIEW_CACHE_HEADER, outcome_response};
pub use host::DashboardHost;
pub use router::{build_health_routes, build_invoice_routes};
pub use views::Views;
