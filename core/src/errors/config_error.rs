use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {source}")]
    #[diagnostic(help("expected a JSON object with camelCase engine options"))]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}
