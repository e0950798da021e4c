//! Event Bus implementation

use crate::catalog::EventCatalog;
use crate::config::EventBusConfig;
use crate::diagnostics::{Diagnostics, DispatchFailure, RegistrationError, TracingDiagnostics};
use crate::event::Event;
use crate::event_type::EventTypeKey;
use crate::handler::{HandlerError, HandlerMethod, HandlerResult, Listener, Subscriber};
use crate::registry::{Callback, Registry, Target};
use parking_lot::RwLock;
use std::any::{Any, type_name};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Event bus for in-process event publishing and handling
///
/// Cloning is cheap; clones share one registry. Handlers run synchronously on
/// the publishing thread, in registration order, before `publish` returns.
#[derive(Clone)]
pub struct EventBus {
    /// Subscriptions for each event type
    registry: Arc<RwLock<Registry>>,

    /// Payload types known to introspective registration
    catalog: Arc<RwLock<EventCatalog>>,

    /// Where failures go
    diagnostics: Arc<dyn Diagnostics>,

    /// Configuration
    config: Arc<EventBusConfig>,
}

impl EventBus {
    /// Create new event bus
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create event bus with custom config
    pub fn with_config(config: EventBusConfig) -> Self {
        Self::from_parts(config, EventCatalog::new(), Arc::new(TracingDiagnostics))
    }

    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    fn from_parts(
        config: EventBusConfig,
        catalog: EventCatalog,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::new())),
            catalog: Arc::new(RwLock::new(catalog)),
            diagnostics,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    /// Declare `T` as the payload type of `key` for introspective registration
    pub fn declare_event_type<T: Any>(&self, key: EventTypeKey) {
        self.catalog.write().declare::<T>(key);

        if self.config.enable_logging {
            debug!(
                bus = %self.config.name,
                event = %key,
                payload = type_name::<T>(),
                "Declared event type"
            );
        }
    }

    /// Subscribe an object to an event type
    ///
    /// The subscriber is informed of every event of type `key` or of any
    /// descendant of `key`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let bus = EventBus::new();
    /// bus.subscribe(&TEMPERATURE, display.clone());
    /// ```
    pub fn subscribe(&self, key: EventTypeKey, subscriber: Arc<dyn Subscriber>) {
        let name = subscriber.name().to_string();
        self.registry.write().add(key, Target::Subscriber(subscriber));

        if self.config.enable_logging {
            debug!(bus = %self.config.name, event = %key, subscriber = %name, "Subscribed");
        }
    }

    /// Remove every subscription of `subscriber` under `key`
    ///
    /// Matches by identity: only subscriptions holding this same `Arc` are
    /// removed. Does nothing if there are none.
    pub fn unsubscribe(&self, key: EventTypeKey, subscriber: &Arc<dyn Subscriber>) {
        let removed = self.registry.write().remove(key, subscriber);

        if self.config.enable_logging {
            debug!(
                bus = %self.config.name,
                event = %key,
                subscriber = %subscriber.name(),
                removed,
                "Unsubscribed"
            );
        }
    }

    /// Subscribe every usable handler method of `listener`
    ///
    /// Each method taking exactly one parameter whose type is in the catalog is
    /// subscribed under that type's key. Other methods are skipped and reported
    /// to the diagnostics sink. Returns the number of subscriptions added.
    pub fn register_object<L: Listener>(&self, listener: Arc<L>) -> usize {
        let owner: Arc<str> = Arc::from(listener.name());
        let methods = listener.handler_methods();

        // Only resolution runs under the catalog lock; listener and diagnostics
        // code may call back into the bus.
        let resolved: Vec<_> = {
            let catalog = self.catalog.read();
            methods
                .iter()
                .map(|method| resolve_method(&catalog, &owner, method))
                .collect()
        };

        let mut bound = Vec::new();
        for (method, resolution) in methods.iter().zip(resolved) {
            match resolution {
                Ok(key) => bound.push((key, bind_method(&listener, &owner, method))),
                Err(error) => self.diagnostics.registration_skipped(&error),
            }
        }

        let added = bound.len();
        {
            let mut registry = self.registry.write();
            for (key, target) in bound {
                registry.add(key, target);
            }
        }

        if self.config.enable_logging {
            debug!(
                bus = %self.config.name,
                listener = %owner,
                handlers = added,
                "Registered listener"
            );
        }
        added
    }

    /// Register a callback receiving events as `E`
    ///
    /// `E` is either the concrete event type or the payload type of one of its
    /// ancestor categories. An event that cannot be viewed as `E` fails the
    /// invocation with [`HandlerError::TypeMismatch`].
    pub fn register_handler<E, F>(&self, key: EventTypeKey, callback: F)
    where
        E: Any,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        let call: Callback = Arc::new(move |event: &dyn Event| match event.downcast_ref::<E>() {
            Some(typed) => callback(typed),
            None => Err(HandlerError::TypeMismatch {
                expected: type_name::<E>(),
                actual: event.event_name(),
            }),
        });
        self.add_callback(key, format!("fn(&{})", type_name::<E>()), call);
    }

    /// Register a callback receiving the event untyped
    pub fn register_fn<F>(&self, key: EventTypeKey, callback: F)
    where
        F: Fn(&dyn Event) -> HandlerResult + Send + Sync + 'static,
    {
        self.add_callback(key, "fn(&dyn Event)".to_string(), Arc::new(callback));
    }

    fn add_callback(&self, key: EventTypeKey, label: String, call: Callback) {
        if self.config.enable_logging {
            debug!(bus = %self.config.name, event = %key, handler = %label, "Registered handler");
        }
        self.registry.write().add(
            key,
            Target::Callback {
                label: label.into(),
                call,
            },
        );
    }

    /// Publish an event
    ///
    /// All handlers registered for the event's type or any of its ancestors
    /// are invoked. Failures are reported to diagnostics and never returned.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let bus = EventBus::new();
    /// bus.publish(TemperatureEvent::new("t1", 15));
    /// ```
    pub fn publish<E: Event>(&self, event: E) {
        self.dispatch(&event);
    }

    /// Deliver `event` and report what happened
    pub fn dispatch(&self, event: &dyn Event) -> DispatchReport {
        let event_type = event.event_type();
        let mut report = DispatchReport::new(event_type, event.event_id());

        if self.config.enable_logging {
            info!(
                bus = %self.config.name,
                event = %event_type,
                id = %event.event_id(),
                "Publishing event"
            );
        }

        // Snapshot so handlers may (un)subscribe or publish while we iterate
        let matched = self.registry.read().entries_matching(event_type);

        if matched.is_empty() {
            if self.config.warn_on_unmatched {
                warn!(
                    bus = %self.config.name,
                    event = %event_type,
                    "No handlers registered for event"
                );
            } else if self.config.enable_logging {
                debug!(
                    bus = %self.config.name,
                    event = %event_type,
                    "No handlers registered for event"
                );
            }
            return report;
        }

        for subscription in &matched {
            let target = subscription.target();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| target.invoke(event)))
                .unwrap_or_else(|payload| {
                    Err(HandlerError::Panicked(panic_message(payload.as_ref())))
                });

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    let failure = DispatchFailure {
                        event_type,
                        event_id: report.event_id,
                        subscriber: target.describe(),
                        error,
                    };
                    self.diagnostics.dispatch_failed(&failure);
                    report.failures.push(failure);
                }
            }
        }

        if self.config.enable_logging {
            debug!(
                bus = %self.config.name,
                event = %event_type,
                delivered = report.delivered,
                failed = report.failures.len(),
                "Event dispatched"
            );
        }

        report
    }

    /// Get handler count registered under exactly `key`
    pub fn handler_count(&self, key: EventTypeKey) -> usize {
        self.registry.read().count(key)
    }

    /// Total number of subscriptions
    pub fn subscription_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Keys that currently hold subscriptions, in first-registration order
    pub fn keys(&self) -> Vec<EventTypeKey> {
        self.registry.read().keys().collect()
    }

    /// Clear all handlers
    pub fn clear(&self) {
        self.registry.write().clear();
        if self.config.enable_logging {
            info!(bus = %self.config.name, "Cleared all event handlers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.config)
            .field("subscriptions", &self.subscription_count())
            .finish_non_exhaustive()
    }
}

fn resolve_method<L>(
    catalog: &EventCatalog,
    owner: &str,
    method: &HandlerMethod<L>,
) -> Result<EventTypeKey, RegistrationError> {
    match method.params() {
        [param] => catalog
            .resolve(param)
            .ok_or_else(|| RegistrationError::UnknownParameterType {
                listener: owner.to_string(),
                method: method.name(),
                type_name: param.name(),
            }),
        params => Err(RegistrationError::WrongArity {
            listener: owner.to_string(),
            method: method.name(),
            arity: params.len(),
        }),
    }
}

fn bind_method<L: Listener>(
    listener: &Arc<L>,
    owner: &Arc<str>,
    method: &HandlerMethod<L>,
) -> Target {
    let object = Arc::clone(listener);
    let invoker = method.invoker();
    Target::Method {
        owner: Arc::clone(owner),
        method: method.name(),
        call: Arc::new(move |event: &dyn Event| invoker(object.as_ref(), &[event])),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Outcome of one [`EventBus::dispatch`] call
#[derive(Debug, Clone)]
pub struct DispatchReport {
    event_type: EventTypeKey,
    event_id: Uuid,
    delivered: usize,
    failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    fn new(event_type: EventTypeKey, event_id: Uuid) -> Self {
        Self {
            event_type,
            event_id,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    pub fn event_type(&self) -> EventTypeKey {
        self.event_type
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Handlers that returned `Ok`
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn failures(&self) -> &[DispatchFailure] {
        &self.failures
    }

    /// Number of subscriptions that matched the event
    pub fn matched(&self) -> usize {
        self.delivered + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Event bus builder
pub struct EventBusBuilder {
    config: EventBusConfig,
    catalog: EventCatalog,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl EventBusBuilder {
    /// Create new event bus builder
    pub fn new() -> Self {
        Self {
            config: EventBusConfig::default(),
            catalog: EventCatalog::new(),
            diagnostics: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EventBusConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bus name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Enable/disable logging
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Enable/disable warnings for events nobody handles
    pub fn warn_on_unmatched(mut self, enabled: bool) -> Self {
        self.config.warn_on_unmatched = enabled;
        self
    }

    /// Add every declaration of `catalog`
    pub fn catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog.extend(&catalog);
        self
    }

    /// Declare one payload type
    pub fn event_type<T: Any>(mut self, key: EventTypeKey) -> Self {
        self.catalog.declare::<T>(key);
        self
    }

    /// Send failures to `diagnostics` instead of the log
    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Build the event bus
    pub fn build(self) -> EventBus {
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics));
        EventBus::from_parts(self.config, self.catalog, diagnostics)
    }
}

impl Default for EventBusBuilder {
    fn default() -> Self {
        Self::new()
    }
}
