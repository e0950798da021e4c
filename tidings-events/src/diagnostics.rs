//! Failure reporting
//!
//! The bus never hands failures back to producers. Skipped handler methods and
//! failed handler invocations are forwarded to a [`Diagnostics`] sink instead.

use crate::event_type::EventTypeKey;
use crate::handler::HandlerError;
use parking_lot::Mutex;
use std::fmt;
use tracing::{error, warn};
use uuid::Uuid;

/// A listener method that could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{listener}::{method} takes {arity} parameters, handler methods take exactly one")]
    WrongArity {
        listener: String,
        method: &'static str,
        arity: usize,
    },

    #[error("{listener}::{method} takes {type_name}, which is not a declared event type")]
    UnknownParameterType {
        listener: String,
        method: &'static str,
        type_name: &'static str,
    },
}

impl RegistrationError {
    pub fn method(&self) -> &'static str {
        match self {
            RegistrationError::WrongArity { method, .. }
            | RegistrationError::UnknownParameterType { method, .. } => *method,
        }
    }
}

/// A handler invocation that returned an error or panicked.
#[derive(Debug, Clone)]
pub struct DispatchFailure {
    pub event_type: EventTypeKey,
    pub event_id: Uuid,
    pub subscriber: String,
    pub error: HandlerError,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on {} ({}): {}",
            self.subscriber, self.event_type, self.event_id, self.error
        )
    }
}

/// Receiver for registration and dispatch problems.
pub trait Diagnostics: Send + Sync {
    fn registration_skipped(&self, error: &RegistrationError);

    fn dispatch_failed(&self, failure: &DispatchFailure);
}

/// Logs every report through `tracing`. Used when no sink is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn registration_skipped(&self, error: &RegistrationError) {
        warn!(error = %error, "Skipped handler method");
    }

    fn dispatch_failed(&self, failure: &DispatchFailure) {
        error!(
            event = %failure.event_type,
            event_id = %failure.event_id,
            subscriber = %failure.subscriber,
            error = %failure.error,
            "Handler failed"
        );
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    skipped: Mutex<Vec<RegistrationError>>,
    failures: Mutex<Vec<DispatchFailure>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registration_errors(&self) -> Vec<RegistrationError> {
        self.skipped.lock().clone()
    }

    pub fn failures(&self) -> Vec<DispatchFailure> {
        self.failures.lock().clone()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.lock().len()
    }

    pub fn clear(&self) {
        self.skipped.lock().clear();
        self.failures.lock().clear();
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn registration_skipped(&self, error: &RegistrationError) {
        self.skipped.lock().push(error.clone());
    }

    fn dispatch_failed(&self, failure: &DispatchFailure) {
        self.failures.lock().push(failure.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::EventType;

    static JOB: EventType = EventType::concrete("job");

    #[test]
    fn test_collecting_diagnostics() {
        let diagnostics = CollectingDiagnostics::new();
        diagnostics.registration_skipped(&RegistrationError::WrongArity {
            listener: "Worker".to_string(),
            method: "run",
            arity: 0,
        });
        diagnostics.dispatch_failed(&DispatchFailure {
            event_type: &JOB,
            event_id: Uuid::nil(),
            subscriber: "Worker::on_job".to_string(),
            error: HandlerError::failed("boom"),
        });

        assert_eq!(diagnostics.registration_errors()[0].method(), "run");
        assert_eq!(diagnostics.failure_count(), 1);

        diagnostics.clear();
        assert!(diagnostics.failures().is_empty());
    }

    #[test]
    fn test_failure_display() {
        let failure = DispatchFailure {
            event_type: &JOB,
            event_id: Uuid::nil(),
            subscriber: "Worker::on_job".to_string(),
            error: HandlerError::failed("boom"),
        };

        assert_eq!(
            failure.to_string(),
            "Worker::on_job failed on job (00000000-0000-0000-0000-000000000000): \
             Handler failed: boom"
        );
    }

    #[test]
    fn test_registration_error_messages() {
        let error = RegistrationError::UnknownParameterType {
            listener: "Worker".to_string(),
            method: "on_number",
            type_name: "i32",
        };

        assert_eq!(
            error.to_string(),
            "Worker::on_number takes i32, which is not a declared event type"
        );
    }
}
