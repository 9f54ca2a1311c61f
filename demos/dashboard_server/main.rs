//! Runnable invoice dashboard
//!
//! This example demonstrates:
//! - Loading `DashboardConfig` from YAML (path in `ACME_CONFIG`, optional)
//! - Picking the invoice store: PostgreSQL when `database.url` is set and
//!   the `postgres` feature is enabled, in-memory otherwise
//! - Watching view invalidations on the event bus
//!
//! ```bash
//! RUST_LOG=acme=debug,tower_http=debug cargo run --example dashboard_server
//! curl -i -d 'customerId=c1&amount=15.50&status=pending' localhost:3000/dashboard/invoices
//! ```

use acme::prelude::*;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::var("ACME_CONFIG") {
        Ok(path) => DashboardConfig::from_yaml_file(&path)?,
        Err(_) => DashboardConfig::default_config(),
    };

    let store = open_store(&config).await?;
    if store.list().await?.is_empty() {
        seed(store.as_ref()).await?;
    }

    let bus = EventBus::new(config.views.event_capacity);
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = events.recv().await {
            tracing::info!(
                action = envelope.event.action(),
                path = envelope.event.path(),
                "view event"
            );
        }
    });

    println!("🧾 Acme Dashboard");
    println!("   GET    {}", config.views.invoices_path);
    println!("   POST   {}", config.views.invoices_path);
    println!("   GET    {}/{{id}}", config.views.invoices_path);
    println!("   PUT    {}/{{id}}", config.views.invoices_path);
    println!("   DELETE {}/{{id}}", config.views.invoices_path);

    ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store)
        .with_event_bus(bus)
        .serve_configured()
        .await
}

#[cfg(feature = "postgres")]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    use acme::storage::postgres::{connect, ensure_schema};

    let Some(url) = &config.database.url else {
        tracing::info!("no database url configured, using the in-memory store");
        return Ok(Arc::new(InMemoryInvoiceStore::new()));
    };

    let pool = connect(url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("connected to PostgreSQL");
    Ok(Arc::new(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    if config.database.url.is_some() {
        tracing::warn!("database url ignored: built without the `postgres` feature");
    }
    Ok(Arc::new(InMemoryInvoiceStore::new()))
}

/// Insert a few invoices so the list is not empty
async fn seed(store: &dyn InvoiceStore) -> Result<()> {
    let samples = [
        ("3958dc9e-712f-4377-85e9-fec4b6a6442a", 15795, InvoiceStatus::Pending, (2022, 12, 6)),
        ("3958dc9e-742f-4377-85e9-fec4b6a6442a", 20348, InvoiceStatus::Pending, (2022, 11, 14)),
        ("3958dc9e-787f-4377-85e9-fec4b6a6442a", 3040, InvoiceStatus::Paid, (2022, 10, 29)),
    ];

    for (customer_id, cents, status, (y, m, d)) in samples {
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| anyhow::anyhow!("invalid seed date {}-{}-{}", y, m, d))?;
        store
            .insert(NewInvoice {
                customer_id: customer_id.to_string(),
                amount_in_cents: cents,
                status,
                date,
            })
            .await?;
    }

    println!("✅ Seeded {} invoices", samples.len());
    Ok(())
}
