use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Longest string the runtime materializes by default (UTF-16 code units).
pub const DEFAULT_MAX_STRING_LENGTH: usize = (1 << 28) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum live heap units; `None` leaves the heap unbounded.
    pub heap_limit: Option<usize>,
    /// Allocations before the first automatic collection.
    pub gc_threshold: usize,
    pub max_string_length: usize,
    pub max_frames: usize,
    /// Keep the captured frames after `stack` has been materialized, for
    /// debuggers and other introspection.
    pub retain_stack_traces: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            heap_limit: None,
            gc_threshold: 1024,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_frames: 10_000,
            retain_stack_traces: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }
}
