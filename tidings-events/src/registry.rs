//! Subscription registry
//!
//! Subscriptions are stored per key, in registration order. Keys themselves
//! keep the order in which they first received a subscription; that order is
//! the order in which ancestor keys are visited during dispatch.

use crate::event::Event;
use crate::event_type::{EventType, EventTypeKey};
use crate::handler::{HandlerResult, Subscriber};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type Callback = Arc<dyn Fn(&dyn Event) -> HandlerResult + Send + Sync>;

/// What a subscription invokes.
#[derive(Clone)]
pub enum Target {
    /// Explicitly subscribed object
    Subscriber(Arc<dyn Subscriber>),

    /// Handler method discovered on a listener
    Method {
        owner: Arc<str>,
        method: &'static str,
        call: Callback,
    },

    /// Callback bound directly to a key
    Callback { label: Arc<str>, call: Callback },
}

impl Target {
    pub fn invoke(&self, event: &dyn Event) -> HandlerResult {
        match self {
            Target::Subscriber(subscriber) => subscriber.inform(event),
            Target::Method { call, .. } | Target::Callback { call, .. } => call(event),
        }
    }

    /// Human readable name for logs
    pub fn describe(&self) -> String {
        match self {
            Target::Subscriber(subscriber) => subscriber.name().to_string(),
            Target::Method { owner, method, .. } => format!("{owner}::{method}"),
            Target::Callback { label, .. } => label.to_string(),
        }
    }

    /// Whether this target is `subscriber` itself (same allocation).
    pub fn is_subscriber(&self, subscriber: &Arc<dyn Subscriber>) -> bool {
        match self {
            Target::Subscriber(own) => std::ptr::addr_eq(Arc::as_ptr(own), Arc::as_ptr(subscriber)),
            _ => false,
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Target::Subscriber(_) => "Subscriber",
            Target::Method { .. } => "Method",
            Target::Callback { .. } => "Callback",
        };
        f.debug_tuple(kind).field(&self.describe()).finish()
    }
}

/// A registered pairing of key and target.
#[derive(Debug, Clone)]
pub struct Subscription {
    key: EventTypeKey,
    target: Target,
}

impl Subscription {
    pub fn new(key: EventTypeKey, target: Target) -> Self {
        Self { key, target }
    }

    pub fn key(&self) -> EventTypeKey {
        self.key
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

/// Ordered mapping from key to subscriptions.
#[derive(Debug, Default)]
pub struct Registry {
    slots: IndexMap<EventTypeKey, Vec<Subscription>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscription under `key`.
    ///
    /// No uniqueness check: a target added twice is invoked twice.
    pub fn add(&mut self, key: EventTypeKey, target: Target) {
        self.slots
            .entry(key)
            .or_default()
            .push(Subscription::new(key, target));
    }

    /// Drop every subscription of `subscriber` under `key`.
    ///
    /// Returns the number removed. Other keys and other subscribers are left
    /// alone; a key left without subscriptions is forgotten.
    pub fn remove(&mut self, key: EventTypeKey, subscriber: &Arc<dyn Subscriber>) -> usize {
        let Some(subscriptions) = self.slots.get_mut(key) else {
            return 0;
        };

        let before = subscriptions.len();
        subscriptions.retain(|subscription| !subscription.target.is_subscriber(subscriber));
        let removed = before - subscriptions.len();

        if subscriptions.is_empty() {
            // shift, not swap: the remaining keys keep their order
            self.slots.shift_remove(key);
        }
        removed
    }

    /// Every subscription that receives events of type `runtime`.
    ///
    /// Subscriptions under `runtime` itself come first, then those under each
    /// ancestor key in key order. Each subscription appears once.
    pub fn entries_matching(&self, runtime: &EventType) -> Vec<Subscription> {
        let mut matched: Vec<Subscription> = self
            .subscriptions(runtime)
            .map(<[Subscription]>::to_vec)
            .unwrap_or_default();

        for (key, subscriptions) in &self.slots {
            if *key != runtime && key.matches(runtime) {
                matched.extend(subscriptions.iter().cloned());
            }
        }
        matched
    }

    /// Subscriptions registered under exactly `key`
    pub fn subscriptions(&self, key: &EventType) -> Option<&[Subscription]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    pub fn count(&self, key: &EventType) -> usize {
        self.slots.get(key).map_or(0, Vec::len)
    }

    /// Keys in first-registration order
    pub fn keys(&self) -> impl Iterator<Item = EventTypeKey> + '_ {
        self.slots.keys().copied()
    }

    /// Total number of subscriptions
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NEWS: EventType = EventType::category("news");
    static SPORTS: EventType = EventType::concrete("sports").extends(&NEWS);
    static WEATHER: EventType = EventType::concrete("weather");
    static LOCAL: EventType = EventType::category("local").extends(&NEWS);
    static DERBY: EventType = EventType::concrete("derby").extends(&LOCAL);

    struct Named(&'static str);

    impl Subscriber for Named {
        fn inform(&self, _event: &dyn Event) -> HandlerResult {
            Ok(())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn named(name: &'static str) -> Arc<dyn Subscriber> {
        Arc::new(Named(name))
    }

    fn names(subscriptions: &[Subscription]) -> Vec<String> {
        subscriptions
            .iter()
            .map(|subscription| subscription.target().describe())
            .collect()
    }

    #[test]
    fn test_add_keeps_registration_order() {
        let mut registry = Registry::new();
        registry.add(&SPORTS, Target::Subscriber(named("a")));
        registry.add(&SPORTS, Target::Subscriber(named("b")));
        registry.add(&SPORTS, Target::Subscriber(named("c")));

        assert_eq!(names(registry.subscriptions(&SPORTS).unwrap()), vec!["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_targets_are_kept() {
        let mut registry = Registry::new();
        let twice = named("twice");
        registry.add(&WEATHER, Target::Subscriber(twice.clone()));
        registry.add(&WEATHER, Target::Subscriber(twice));

        assert_eq!(registry.count(&WEATHER), 2);
    }

    #[test]
    fn test_matching_puts_exact_key_first() {
        let mut registry = Registry::new();
        registry.add(&NEWS, Target::Subscriber(named("reader")));
        registry.add(&SPORTS, Target::Subscriber(named("fan")));
        registry.add(&WEATHER, Target::Subscriber(named("farmer")));

        let matched = registry.entries_matching(&SPORTS);
        assert_eq!(names(&matched), vec!["fan", "reader"]);
    }

    #[test]
    fn test_matching_lists_each_subscription_once() {
        let mut registry = Registry::new();
        registry.add(&NEWS, Target::Subscriber(named("reader")));

        assert_eq!(registry.entries_matching(&SPORTS).len(), 1);
        assert!(registry.entries_matching(&WEATHER).is_empty());
    }

    #[test]
    fn test_matching_groups_ancestors_by_key_order() {
        let mut registry = Registry::new();
        let dup = named("dup");
        registry.add(&NEWS, Target::Subscriber(named("news1")));
        registry.add(&LOCAL, Target::Subscriber(named("local1")));
        registry.add(&DERBY, Target::Subscriber(dup.clone()));
        registry.add(&DERBY, Target::Subscriber(dup));
        registry.add(&NEWS, Target::Subscriber(named("news2")));

        let matched = registry.entries_matching(&DERBY);
        assert_eq!(
            names(&matched),
            vec!["dup", "dup", "news1", "news2", "local1"]
        );
    }

    #[test]
    fn test_remove_keeps_key_order() {
        let mut registry = Registry::new();
        let gone = named("gone");
        registry.add(&NEWS, Target::Subscriber(gone.clone()));
        registry.add(&SPORTS, Target::Subscriber(named("fan")));
        registry.add(&WEATHER, Target::Subscriber(named("farmer")));
        registry.add(&LOCAL, Target::Subscriber(named("neighbour")));

        registry.remove(&NEWS, &gone);

        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec![&SPORTS as EventTypeKey, &WEATHER, &LOCAL]
        );
    }

    #[test]
    fn test_remove_by_identity() {
        let mut registry = Registry::new();
        let first = named("same-name");
        let second = named("same-name");
        registry.add(&WEATHER, Target::Subscriber(first.clone()));
        registry.add(&WEATHER, Target::Subscriber(second.clone()));
        registry.add(&WEATHER, Target::Subscriber(first.clone()));

        assert_eq!(registry.remove(&WEATHER, &first), 2);
        assert_eq!(registry.count(&WEATHER), 1);
        assert!(registry.subscriptions(&WEATHER).unwrap()[0]
            .target()
            .is_subscriber(&second));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = Registry::new();
        let subscriber = named("x");
        registry.add(&SPORTS, Target::Subscriber(subscriber.clone()));

        assert_eq!(registry.remove(&WEATHER, &subscriber), 0);
        assert_eq!(registry.remove(&SPORTS, &named("y")), 0);
        assert_eq!(registry.count(&SPORTS), 1);
    }

    #[test]
    fn test_emptied_key_is_forgotten() {
        let mut registry = Registry::new();
        let subscriber = named("x");
        registry.add(&SPORTS, Target::Subscriber(subscriber.clone()));
        registry.add(&WEATHER, Target::Subscriber(named("y")));

        registry.remove(&SPORTS, &subscriber);

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![&WEATHER as EventTypeKey]);
        registry.clear();
        assert!(registry.is_empty());
    }
}
