use miette::Diagnostic;
use thiserror::Error;

use crate::runtime::value::JsValue;

#[derive(Debug, Clone, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("TypeError: {message}")]
    TypeError { message: String },

    #[error("RangeError: {message}")]
    RangeError { message: String },

    #[error("out of memory: requested {requested} heap units with a limit of {limit}")]
    #[diagnostic(help("raise `heapLimit` in the engine configuration"))]
    OutOfMemory { requested: usize, limit: usize },

    #[error("string of length {length} exceeds the maximum of {max}")]
    StringTooLong { length: usize, max: usize },

    #[error("uncaught exception: {value}")]
    Thrown { value: JsValue },
}

impl RuntimeError {
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError {
            message: message.into(),
        }
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }

    /// The script-visible value carried by a thrown exception, if any.
    pub fn thrown_value(&self) -> Option<&JsValue> {
        match self {
            Self::Thrown { value } => Some(value),
            _ => None,
        }
    }
}
