use crate::config::EngineConfig;
use crate::context::Context;
use crate::errors::RuntimeError;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_heap_limit(mut self, units: usize) -> Self {
        self.config.heap_limit = Some(units);
        self
    }

    pub fn with_gc_threshold(mut self, allocations: usize) -> Self {
        self.config.gc_threshold = allocations;
        self
    }

    pub fn with_max_string_length(mut self, length: usize) -> Self {
        self.config.max_string_length = length;
        self
    }

    pub fn with_max_frames(mut self, frames: usize) -> Self {
        self.config.max_frames = frames;
        self
    }

    pub fn with_retain_stack_traces(mut self, retain: bool) -> Self {
        self.config.retain_stack_traces = retain;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn new_context(&self) -> Result<Context, RuntimeError> {
        Context::with_config(self.config.clone())
    }
}
