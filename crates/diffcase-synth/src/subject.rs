//! Functions under test and the errors they raise.

use std::panic::{AssertUnwindSafe, catch_unwind};

use diffcase_value::{Inputs, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error raised by a subject for one input tuple.
///
/// `error_type` is the short class name reported in diagnostics
/// (`ValueError`, `TypeError`, `Panic`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{error_type}: {message}")]
pub struct InvocationError {
    pub error_type: String,
    pub message: String,
}

impl InvocationError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new("ValueError", message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }

    pub fn key_error(message: impl Into<String>) -> Self {
        Self::new("KeyError", message)
    }

    pub fn missing_input(name: &str) -> Self {
        Self::new("TypeError", format!("missing required argument: '{name}'"))
    }

    /// Same error with `prefix` prepended to the class name.
    pub fn prefixed(self, prefix: &str) -> Self {
        Self {
            error_type: format!("{prefix}{}", self.error_type),
            message: self.message,
        }
    }
}

/// A function that can be invoked on named inputs.
///
/// Inputs are borrowed, so a subject cannot alter the tuple that will be
/// persisted.
pub trait Subject {
    fn invoke(&self, inputs: &Inputs) -> Result<Value, InvocationError>;
}

impl<F> Subject for F
where
    F: Fn(&Inputs) -> Result<Value, InvocationError>,
{
    fn invoke(&self, inputs: &Inputs) -> Result<Value, InvocationError> {
        self(inputs)
    }
}

/// Fetch a named argument.
pub fn arg<'a>(inputs: &'a Inputs, name: &str) -> Result<&'a Value, InvocationError> {
    inputs.get(name).ok_or_else(|| InvocationError::missing_input(name))
}

/// Invoke `subject`, turning a panic into an `InvocationError` of type `Panic`.
pub fn invoke_guarded<S>(subject: &S, inputs: &Inputs) -> Result<Value, InvocationError>
where
    S: Subject + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| subject.invoke(inputs))) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "non-string panic payload".to_string()
            };
            Err(InvocationError::new("Panic", message))
        }
    }
}
