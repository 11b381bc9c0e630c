pub mod handle;

pub use handle::{Handle, HandleScope, ScopeMarker};
