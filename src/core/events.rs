//! Internal event system for cache notifications
//!
//! The EventBus uses `tokio::sync::broadcast` to decouple the view cache
//! (which publishes) from anything that wants to react to a view going
//! stale: log sinks, pre-warmers, live-reload sockets.
//!
//! # Architecture
//!
//! ```text
//! Mutation pipeline ──▶ ViewCache::invalidate() ──▶ EventBus::publish() ──▶ subscribers
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ViewEvent::Invalidated { path: "/dashboard/invoices".into() });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("stale view: {:?}", envelope.event.path());
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events about cached views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewEvent {
    /// A cached rendering was discarded; the next request recomputes it
    Invalidated { path: String },
    /// A fresh rendering was stored
    Rendered { path: String },
}

impl ViewEvent {
    /// Path of the view this event relates to
    pub fn path(&self) -> &str {
        match self {
            ViewEvent::Invalidated { path } | ViewEvent::Rendered { path } => path,
        }
    }

    /// Get the action name
    pub fn action(&self) -> &str {
        match self {
            ViewEvent::Invalidated { .. } => "invalidated",
            ViewEvent::Rendered { .. } => "rendered",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ViewEvent,
}

impl EventEnvelope {
    pub fn new(event: ViewEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; clones publish to the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Non-blocking and infallible. Returns the number of receivers that
    /// will see the event; zero when nobody is listening.
    pub fn publish(&self, event: ViewEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
