use std::cell::RefCell;

use super::heap::{ErasedGc, Gc};

/// Implemented by every heap cell: report each owned `Gc` reference to the
/// tracer. Cells that hold plain data (frame entries, debug tables) report
/// nothing for it.
pub trait Trace {
    fn trace(&self, tracer: &mut Tracer);
}

/// Collects references discovered while tracing one cell; the marker drains
/// it after each cell.
#[derive(Default)]
pub struct Tracer {
    discovered: Vec<ErasedGc>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark<T>(&mut self, gc: Gc<T>) {
        self.discovered.push(gc.erase());
    }

    pub fn mark_erased(&mut self, gc: ErasedGc) {
        self.discovered.push(gc);
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, ErasedGc> {
        self.discovered.drain(..)
    }
}

impl Trace for String {
    fn trace(&self, _tracer: &mut Tracer) {}
}

impl<T: Trace> Trace for Option<T> {
    fn trace(&self, tracer: &mut Tracer) {
        if let Some(value) = self {
            value.trace(tracer);
        }
    }
}

impl<T: Trace> Trace for Vec<T> {
    fn trace(&self, tracer: &mut Tracer) {
        for value in self {
            value.trace(tracer);
        }
    }
}

impl<T: Trace> Trace for RefCell<T> {
    fn trace(&self, tracer: &mut Tracer) {
        self.borrow().trace(tracer);
    }
}

impl<T> Trace for Gc<T> {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.mark_erased(self.erase());
    }
}
