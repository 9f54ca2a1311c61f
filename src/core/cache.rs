//! Page cache and its invalidation signal

use crate::core::events::{EventBus, ViewEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Target of the "this view is stale" signal
///
/// Fire-and-forget: there is nothing to acknowledge and nothing that can
/// fail from the caller's point of view.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, path: &str);
}

/// A cached rendering of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedView {
    pub body: String,
    pub rendered_at: DateTime<Utc>,
}

/// Rendered views keyed by request path
#[derive(Clone, Default)]
pub struct ViewCache {
    views: Arc<RwLock<HashMap<String, CachedView>>>,
    events: Option<EventBus>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `ViewEvent`s on the given bus
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    pub async fn get(&self, path: &str) -> Option<CachedView> {
        self.views.read().await.get(path).cloned()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.views.read().await.contains_key(path)
    }

    /// Store a fresh rendering
    pub async fn put(&self, path: &str, body: String) -> CachedView {
        let view = CachedView {
            body,
            rendered_at: Utc::now(),
        };
        self.views
            .write()
            .await
            .insert(path.to_string(), view.clone());
        self.publish(ViewEvent::Rendered {
            path: path.to_string(),
        });
        view
    }

    fn publish(&self, event: ViewEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

#[async_trait]
impl CacheInvalidator for ViewCache {
    async fn invalidate(&self, path: &str) {
        let removed = self.views.write().await.remove(path).is_some();
        tracing::debug!(path, removed, "view invalidated");
        self.publish(ViewEvent::Invalidated {
            path: path.to_string(),
        });
    }
}

/// Invalidator that does nothing, for callers without a cache
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

#[async_trait]
impl CacheInvalidator for NoopInvalidator {
    async fn invalidate(&self, _path: &str) {}
}
