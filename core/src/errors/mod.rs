mod config_error;
mod runtime_error;

pub use config_error::ConfigError;
pub use runtime_error::RuntimeError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping all tracejs errors.
#[derive(Debug, Error, Diagnostic)]
pub enum TraceJsError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
