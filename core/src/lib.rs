pub mod config;
pub mod context;
pub mod diagnostics;
pub mod embedding;
pub mod engine;
pub mod errors;
pub mod runtime;
pub mod vm;

pub use config::EngineConfig;
pub use context::Context;
pub use diagnostics::{FrameEntry, StackTrace};
pub use engine::Engine;
pub use errors::{ConfigError, RuntimeError, TraceJsError};
pub use runtime::error::ErrorKind;
pub use runtime::value::JsValue as Value;
pub use vm::bytecode::{CodeUnitRef, DomainRef, ModuleBuilder};
pub use vm::machine::FrameCallee;
