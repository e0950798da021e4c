//! Static event category graph
//!
//! Event types form a tree: every [`EventType`] names its parent category at
//! definition time, so matching an event against a subscription key is a plain
//! walk up the ancestor chain.
//!
//! Types are compared by node identity. Declare each one exactly once as a
//! `static` item and hand out references to it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Key under which subscriptions are registered.
pub type EventTypeKey = &'static EventType;

/// A node in the event category graph.
///
/// ```rust
/// use tidings_events::EventType;
///
/// static NEWS: EventType = EventType::category("news");
/// static SPORTS: EventType = EventType::concrete("sports_news").extends(&NEWS);
///
/// assert!(NEWS.matches(&SPORTS));
/// assert!(SPORTS.matches(&SPORTS));
/// assert!(!SPORTS.matches(&NEWS));
/// ```
pub struct EventType {
    name: &'static str,
    parent: Option<&'static EventType>,
    is_abstract: bool,
}

impl EventType {
    /// A type that events can be instances of.
    pub const fn concrete(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            is_abstract: false,
        }
    }

    /// An abstract category. Nothing is published as a bare category; it only
    /// groups its descendants.
    pub const fn category(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            is_abstract: true,
        }
    }

    /// Attach this type under `parent`.
    pub const fn extends(self, parent: &'static EventType) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<EventTypeKey> {
        self.parent
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Walk from this type up to the root, starting with the type itself.
    pub fn ancestors(&self) -> impl Iterator<Item = &EventType> + '_ {
        std::iter::successors(Some(self), |ty| ty.parent.map(|p| p as &EventType))
    }

    /// Number of ancestors above this type.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Whether a subscription keyed on `self` receives events of type `runtime`.
    ///
    /// Reflexive, and transitive along parent links.
    pub fn matches(&self, runtime: &EventType) -> bool {
        runtime.ancestors().any(|ty| ty == self)
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self, state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventType")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|p| p.name))
            .field("is_abstract", &self.is_abstract)
            .finish()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    static ROOT: EventType = EventType::category("root");
    static MIDDLE: EventType = EventType::category("middle").extends(&ROOT);
    static LEAF: EventType = EventType::concrete("leaf").extends(&MIDDLE);
    static SIBLING: EventType = EventType::concrete("sibling").extends(&ROOT);
    static FLAT: EventType = EventType::concrete("flat");

    #[test]
    fn test_matches_is_reflexive() {
        assert!(LEAF.matches(&LEAF));
        assert!(FLAT.matches(&FLAT));
        assert!(ROOT.matches(&ROOT));
    }

    #[test]
    fn test_matches_follows_ancestors() {
        assert!(MIDDLE.matches(&LEAF));
        assert!(ROOT.matches(&LEAF));
        assert!(ROOT.matches(&SIBLING));
    }

    #[test]
    fn test_matches_never_goes_down_or_sideways() {
        assert!(!LEAF.matches(&MIDDLE));
        assert!(!MIDDLE.matches(&SIBLING));
        assert!(!SIBLING.matches(&LEAF));
        assert!(!FLAT.matches(&LEAF));
        assert!(!ROOT.matches(&FLAT));
    }

    #[test]
    fn test_ancestor_chain() {
        let names: Vec<_> = LEAF.ancestors().map(EventType::name).collect();
        assert_eq!(names, vec!["leaf", "middle", "root"]);
        assert_eq!(LEAF.depth(), 2);
        assert_eq!(FLAT.depth(), 0);
        assert_eq!(LEAF.parent(), Some(&MIDDLE));
    }

    #[test]
    fn test_identity_equality() {
        static LOOKALIKE: EventType = EventType::concrete("flat");

        assert_eq!(&FLAT, &FLAT);
        assert_ne!(&FLAT, &LOOKALIKE);

        let keys: HashSet<EventTypeKey> = [&FLAT, &LOOKALIKE, &FLAT].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_abstract_flag() {
        assert!(ROOT.is_abstract());
        assert!(!LEAF.is_abstract());
        assert_eq!(LEAF.to_string(), "leaf");
    }
}
