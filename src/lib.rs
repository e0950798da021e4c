// Tidings - a synchronous in-process event bus for Rust
//
// Producers publish typed events, consumers subscribe to event types or to
// whole categories of them, and every matching handler runs before `publish`
// returns.

// Re-export the event bus
pub use tidings_events::*;

// Re-export the sensor and news feeds
#[cfg(feature = "feeds")]
pub use tidings_feeds as feeds;

/// Prelude for common imports
///
/// ```
/// use tidings::prelude::*;
///
/// let bus = EventBus::new();
/// assert_eq!(bus.subscription_count(), 0);
/// ```
pub mod prelude {
    pub use tidings_events::{
        Event, EventBus, EventBusBuilder, EventBusConfig, EventMetadata, EventType, EventTypeKey,
        HandlerError, HandlerMethod, HandlerResult, Listener, Subscriber,
    };
}
