//! Event types for the lodge event system
//!
//! Provides the shared event enum and the EventBus used to notify
//! downstream consumers (listing views, SSE clients) about imports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Lodge event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LodgeEvent {
    /// A property record graph was created
    ///
    /// Triggers:
    /// - SSE: Import summary for connected admin views
    PropertyImported {
        /// Owning tenant
        tenant_id: Uuid,
        /// New property id
        property_id: Uuid,
        /// Property display name
        property_name: String,
        /// Rows created per table
        created: BTreeMap<String, usize>,
        /// Number of sub-entity failures recorded
        warning_count: usize,
        /// When the import finished
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// An import was rejected before any sub-entity was written
    PropertyImportFailed {
        /// Owning tenant
        tenant_id: Uuid,
        /// Error reported to the caller
        error: String,
        /// When the import failed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Cached property listings for a tenant are stale
    ///
    /// Triggers:
    /// - Listing views: refetch the property list
    PropertyListingInvalidated {
        /// Tenant whose listing changed
        tenant_id: Uuid,
        /// Property that caused the change
        property_id: Uuid,
        /// When the listing became stale
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl LodgeEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &str {
        match self {
            LodgeEvent::PropertyImported { .. } => "PropertyImported",
            LodgeEvent::PropertyImportFailed { .. } => "PropertyImportFailed",
            LodgeEvent::PropertyListingInvalidated { .. } => "PropertyListingInvalidated",
        }
    }
}

/// Broadcast bus for LodgeEvents
///
/// Cloning shares the underlying channel. Events emitted before a receiver
/// subscribes are not delivered to it.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<LodgeEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// * `capacity` - Number of events to buffer before lagging receivers drop old events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<LodgeEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: LodgeEvent) -> Result<usize, broadcast::error::SendError<LodgeEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: LodgeEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
