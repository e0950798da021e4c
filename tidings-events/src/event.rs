//! Event definitions and traits

use crate::event_type::{EventType, EventTypeKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;
use uuid::Uuid;

/// Event trait
///
/// All events must implement this trait to be published through the event bus.
/// Events are immutable once built; handlers only ever see shared references.
pub trait Event: Send + Sync + Debug + 'static {
    /// Concrete type of this event in the category graph
    fn event_type(&self) -> EventTypeKey;

    /// Get event metadata
    fn metadata(&self) -> &EventMetadata;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// View this event as the payload of one of its ancestor categories.
    ///
    /// Events whose category carries shared data (every news item has an agency
    /// and content, whatever its section) return that data here so handlers
    /// declared against the category can receive it.
    fn as_ancestor(&self, _category: &EventType) -> Option<&dyn Any> {
        None
    }

    /// Get event name
    fn event_name(&self) -> &'static str {
        self.event_type().name()
    }

    /// Get event ID
    fn event_id(&self) -> Uuid {
        self.metadata().id
    }

    /// Get event timestamp
    fn timestamp(&self) -> DateTime<Utc> {
        self.metadata().timestamp
    }
}

impl dyn Event {
    /// Borrow the event as `T`.
    ///
    /// Tries the concrete type first, then the view exposed for each ancestor
    /// category, nearest first.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if let Some(concrete) = self.as_any().downcast_ref::<T>() {
            return Some(concrete);
        }

        self.event_type()
            .ancestors()
            .skip(1)
            .find_map(|category| self.as_ancestor(category)?.downcast_ref::<T>())
    }

    /// Whether [`downcast_ref`](Self::downcast_ref) would succeed for `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

/// Base event metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event ID
    pub id: Uuid,

    /// Timestamp when event was created
    pub timestamp: DateTime<Utc>,

    /// Optional correlation ID for tracing
    pub correlation_id: Option<Uuid>,

    /// Optional causation ID (ID of the event that caused this event)
    pub causation_id: Option<Uuid>,

    /// Custom attributes
    pub attributes: serde_json::Value,
}

impl EventMetadata {
    /// Create new event metadata
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            correlation_id: None,
            causation_id: None,
            attributes: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Set correlation ID
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Set causation ID
    pub fn with_causation_id(mut self, id: Uuid) -> Self {
        self.causation_id = Some(id);
        self
    }

    /// Attach a custom attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = &mut self.attributes {
            map.insert(key.into(), value);
        }
        self
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}
