pub mod debug_info;
pub mod stack_trace;

pub use debug_info::{DebugInfo, DebugSourceLocation};
pub use stack_trace::{FrameEntry, StackTrace};
