pub mod heap;
pub mod marker;
pub mod sweeper;
pub mod trace;

pub use heap::{CollectStats, ErasedGc, Gc, GcCell, Heap};
pub use trace::{Trace, Tracer};
