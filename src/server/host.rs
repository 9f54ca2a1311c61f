//! Server host holding the dashboard's shared state
//!
//! The host is the single source of truth handed to every handler: the
//! mutation pipeline, the store it writes to, the view cache it
//! invalidates and the compiled views that fill that cache.

use super::views::Views;
use crate::config::DashboardConfig;
use crate::core::cache::ViewCache;
use crate::core::events::EventBus;
use crate::core::pipeline::InvoiceActions;
use crate::core::store::InvoiceStore;
use crate::core::validation::InvoiceSchema;
use anyhow::Result;
use std::sync::Arc;

/// Shared state of a running dashboard
///
/// # Example
///
/// ```rust,ignore
/// let host = DashboardHost::from_builder_components(
///     config,
///     Arc::new(InMemoryInvoiceStore::new()),
///     EventBus::new(1024),
/// )?;
/// let app = build_invoice_routes(Arc::new(host));
/// ```
pub struct DashboardHost {
    /// Validated configuration the host was built from
    pub config: Arc<DashboardConfig>,

    /// Invoice mutation operations
    pub actions: InvoiceActions,

    /// Backing store, shared with `actions`
    pub store: Arc<dyn InvoiceStore>,

    /// Rendered views, invalidated by `actions`
    pub cache: ViewCache,

    /// Compiled templates
    pub views: Arc<Views>,
}

impl DashboardHost {
    /// Build the host from builder components
    ///
    /// The schema is built once here from the configured messages and shared
    /// by every request.
    pub fn from_builder_components(
        config: DashboardConfig,
        store: Arc<dyn InvoiceStore>,
        event_bus: EventBus,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let schema = Arc::new(InvoiceSchema::new(config.schema.clone()));
        let cache = ViewCache::new().with_event_bus(event_bus);
        let views = Arc::new(Views::new()?);

        let actions = InvoiceActions::new(schema, store.clone(), Arc::new(cache.clone()))
            .with_list_path(config.views.invoices_path.clone());

        Ok(Self {
            config,
            actions,
            store,
            cache,
            views,
        })
    }

    /// Path of the invoice list view
    pub fn list_path(&self) -> &str {
        self.actions.list_path()
    }

    /// Name reported by the health endpoint
    pub fn service_name(&self) -> &str {
        &self.config.server.service_name
    }

    /// Event bus the view cache publishes on
    pub fn event_bus(&self) -> Option<&EventBus> {
        self.cache.event_bus()
    }
}
