//! Handler traits
//!
//! Three kinds of targets can sit behind a subscription:
//!
//! - a [`Subscriber`] object registered explicitly under a key and informed of
//!   every matching event,
//! - a [`Listener`] object whose [`HandlerMethod`] table is read at registration
//!   time, one subscription per usable method,
//! - a plain callback bound to one key.

use crate::event::Event;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// Result returned by every handler.
pub type HandlerResult = Result<(), HandlerError>;

/// Event handler error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Handler expected {expected} but received {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Object registered explicitly with [`EventBus::subscribe`](crate::EventBus::subscribe).
///
/// The same object may be subscribed under several keys; it is informed once
/// per matching subscription and tells event types apart itself.
pub trait Subscriber: Send + Sync {
    /// Handle a published event
    fn inform(&self, event: &dyn Event) -> HandlerResult;

    /// Name used in logs and diagnostics
    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Object whose handler methods are discovered by
/// [`EventBus::register_object`](crate::EventBus::register_object).
///
/// ```rust,ignore
/// impl Listener for Thermostat {
///     fn handler_methods(&self) -> Vec<HandlerMethod<Self>> {
///         vec![HandlerMethod::unary("on_temperature", Self::on_temperature)]
///     }
/// }
/// ```
///
/// Only methods taking exactly one parameter of a catalogued event type are
/// bound; everything else in the table is skipped and reported.
pub trait Listener: Send + Sync + Sized + 'static {
    /// Every method this object offers as a handler
    fn handler_methods(&self) -> Vec<HandlerMethod<Self>>;

    /// Name used in logs and diagnostics
    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Declared type of a handler method parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

pub(crate) type Invoker<L> = Arc<dyn Fn(&L, &[&dyn Event]) -> HandlerResult + Send + Sync>;

/// Entry in a [`Listener`]'s handler table.
pub struct HandlerMethod<L> {
    name: &'static str,
    params: Vec<ParamType>,
    invoker: Invoker<L>,
}

impl<L: 'static> HandlerMethod<L> {
    /// A method taking no event.
    pub fn nullary<F>(name: &'static str, method: F) -> Self
    where
        F: Fn(&L) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            name,
            params: Vec::new(),
            invoker: Arc::new(move |listener: &L, _args: &[&dyn Event]| method(listener)),
        }
    }

    /// A method taking one argument.
    pub fn unary<A, F>(name: &'static str, method: F) -> Self
    where
        A: Any,
        F: Fn(&L, &A) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            name,
            params: vec![ParamType::of::<A>()],
            invoker: Arc::new(move |listener: &L, args: &[&dyn Event]| {
                method(listener, argument::<A>(args, 0)?)
            }),
        }
    }

    /// A method taking two arguments.
    pub fn binary<A, B, F>(name: &'static str, method: F) -> Self
    where
        A: Any,
        B: Any,
        F: Fn(&L, &A, &B) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            name,
            params: vec![ParamType::of::<A>(), ParamType::of::<B>()],
            invoker: Arc::new(move |listener: &L, args: &[&dyn Event]| {
                method(listener, argument::<A>(args, 0)?, argument::<B>(args, 1)?)
            }),
        }
    }
}

impl<L> HandlerMethod<L> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    /// Call the method on `listener` with `args` as its arguments.
    pub fn invoke(&self, listener: &L, args: &[&dyn Event]) -> HandlerResult {
        (self.invoker)(listener, args)
    }

    pub(crate) fn invoker(&self) -> Invoker<L> {
        Arc::clone(&self.invoker)
    }
}

impl<L> fmt::Debug for HandlerMethod<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn argument<'a, A: Any>(args: &[&'a dyn Event], index: usize) -> Result<&'a A, HandlerError> {
    let event: &'a dyn Event = *args
        .get(index)
        .ok_or_else(|| HandlerError::Failed(format!("missing argument {index}")))?;

    event
        .downcast_ref::<A>()
        .ok_or_else(|| HandlerError::TypeMismatch {
            expected: type_name::<A>(),
            actual: event.event_name(),
        })
}
