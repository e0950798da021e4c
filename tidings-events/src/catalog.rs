//! Mapping from Rust payload types to event categories
//!
//! [`EventBus::register_object`](crate::EventBus::register_object) infers the
//! key of each handler method from its parameter type. The catalog is what
//! turns that parameter type into an [`EventTypeKey`]; a parameter type with no
//! entry is not an event and the method is skipped.

use crate::event_type::EventTypeKey;
use crate::handler::ParamType;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

/// Payload types known to a bus, with the category each one stands for.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    entries: HashMap<TypeId, CatalogEntry>,
}

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    key: EventTypeKey,
    type_name: &'static str,
}

impl EventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `T` as the payload type of `key`.
    ///
    /// Declaring the same type again replaces the earlier key.
    pub fn declare<T: Any>(&mut self, key: EventTypeKey) -> &mut Self {
        self.entries.insert(
            TypeId::of::<T>(),
            CatalogEntry {
                key,
                type_name: type_name::<T>(),
            },
        );
        self
    }

    /// Builder form of [`declare`](Self::declare).
    pub fn with<T: Any>(mut self, key: EventTypeKey) -> Self {
        self.declare::<T>(key);
        self
    }

    /// Merge every declaration from `other` into this catalog.
    pub fn extend(&mut self, other: &EventCatalog) {
        self.entries
            .extend(other.entries.iter().map(|(id, entry)| (*id, *entry)));
    }

    /// Key for a declared handler parameter.
    pub fn resolve(&self, param: &ParamType) -> Option<EventTypeKey> {
        self.entries.get(&param.type_id()).map(|entry| entry.key)
    }

    pub fn key_of<T: Any>(&self) -> Option<EventTypeKey> {
        self.resolve(&ParamType::of::<T>())
    }

    /// Type names declared for `key`.
    pub fn types_for(&self, key: EventTypeKey) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .entries
            .values()
            .filter(|entry| entry.key == key)
            .map(|entry| entry.type_name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::EventType;

    static READING: EventType = EventType::concrete("reading");
    static OTHER: EventType = EventType::concrete("other");

    #[allow(dead_code)]
    struct Reading;
    #[allow(dead_code)]
    struct Other;

    #[test]
    fn test_declared_type_resolves() {
        let catalog = EventCatalog::new().with::<Reading>(&READING);

        assert_eq!(catalog.key_of::<Reading>(), Some(&READING));
        assert_eq!(catalog.resolve(&ParamType::of::<Reading>()), Some(&READING));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_undeclared_type_is_unknown() {
        let catalog = EventCatalog::new().with::<Reading>(&READING);

        assert!(catalog.key_of::<Other>().is_none());
        assert!(catalog.key_of::<i32>().is_none());
    }

    #[test]
    fn test_redeclare_replaces_key() {
        let mut catalog = EventCatalog::new();
        catalog.declare::<Reading>(&READING).declare::<Reading>(&OTHER);

        assert_eq!(catalog.key_of::<Reading>(), Some(&OTHER));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_extend_merges_entries() {
        let mut catalog = EventCatalog::new().with::<Reading>(&READING);
        catalog.extend(&EventCatalog::new().with::<Other>(&OTHER));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.types_for(&OTHER).len(), 1);
        assert!(catalog.types_for(&OTHER)[0].ends_with("Other"));
    }
}
