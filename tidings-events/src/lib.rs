//! In-process publish/subscribe for tidings
//!
//! Producers publish typed events without knowing who consumes them. Consumers
//! register interest in an event type, or in a whole category of event types,
//! and are invoked synchronously when a matching event is published.
//!
//! ## Features
//!
//! - **Category matching** - a subscription on an abstract category receives
//!   every event of every type below it
//! - **Three ways to register** - explicit subscriber objects, listener objects
//!   whose handler methods are discovered, and plain callbacks
//! - **Failure isolation** - a failing or panicking handler never stops the
//!   others and never reaches the producer
//! - **Synchronous** - all handlers have run when `publish` returns
//!
//! ## Quick Start
//!
//! ```rust
//! use std::any::Any;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tidings_events::*;
//!
//! static ALERT: EventType = EventType::category("alert");
//! static FIRE: EventType = EventType::concrete("fire").extends(&ALERT);
//!
//! #[derive(Debug)]
//! struct FireEvent {
//!     metadata: EventMetadata,
//!     room: String,
//! }
//!
//! impl Event for FireEvent {
//!     fn event_type(&self) -> EventTypeKey { &FIRE }
//!     fn metadata(&self) -> &EventMetadata { &self.metadata }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! struct Siren {
//!     rings: AtomicU32,
//! }
//!
//! impl Subscriber for Siren {
//!     fn inform(&self, _event: &dyn Event) -> HandlerResult {
//!         self.rings.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! let bus = EventBus::new();
//! let siren = Arc::new(Siren { rings: AtomicU32::new(0) });
//!
//! // Subscribed to the category, receives every alert
//! bus.subscribe(&ALERT, siren.clone());
//!
//! bus.publish(FireEvent {
//!     metadata: EventMetadata::new(),
//!     room: "kitchen".to_string(),
//! });
//!
//! assert_eq!(siren.rings.load(Ordering::SeqCst), 1);
//! ```
//!
//! ## Listener Objects
//!
//! ```rust,ignore
//! impl Listener for Thermostat {
//!     fn handler_methods(&self) -> Vec<HandlerMethod<Self>> {
//!         vec![HandlerMethod::unary("on_temperature", Self::on_temperature)]
//!     }
//! }
//!
//! let bus = EventBus::builder()
//!     .event_type::<TemperatureEvent>(&TEMPERATURE)
//!     .build();
//!
//! bus.register_object(Arc::new(Thermostat::default()));
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! let diagnostics = Arc::new(CollectingDiagnostics::new());
//! let bus = EventBusBuilder::new()
//!     .diagnostics(diagnostics.clone())
//!     .build();
//!
//! bus.publish(event);
//! for failure in diagnostics.failures() {
//!     eprintln!("{failure}");
//! }
//! ```

pub mod bus;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod event;
pub mod event_type;
pub mod handler;
pub mod registry;

pub use bus::{DispatchReport, EventBus, EventBusBuilder};
pub use catalog::EventCatalog;
pub use config::{ConfigError, EventBusConfig};
pub use diagnostics::{
    CollectingDiagnostics, Diagnostics, DispatchFailure, RegistrationError, TracingDiagnostics,
};
pub use event::{Event, EventMetadata};
pub use event_type::{EventType, EventTypeKey};
pub use handler::{HandlerError, HandlerMethod, HandlerResult, Listener, ParamType, Subscriber};
pub use registry::{Registry, Subscription, Target};
