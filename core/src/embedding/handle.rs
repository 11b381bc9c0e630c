use crate::runtime::gc::{ErasedGc, Gc};

/// A rooted reference. The referenced cell survives collection for as long
/// as the scope entry that created the handle is alive.
#[derive(Debug, Clone, Copy)]
pub struct Handle<T> {
    gc: Gc<T>,
}

impl<T> Handle<T> {
    pub fn new(gc: Gc<T>) -> Self {
        Self { gc }
    }

    pub fn gc(&self) -> Gc<T> {
        self.gc
    }

    pub fn erase(&self) -> ErasedGc {
        self.gc.erase()
    }
}

/// Position in a `HandleScope` to flush back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMarker(usize);

/// Stack of rooted handles. Loops that create temporaries take a marker
/// once and flush to it on every iteration so the number of live handles
/// stays constant regardless of iteration count.
#[derive(Default)]
pub struct HandleScope {
    roots: Vec<ErasedGc>,
}

impl HandleScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create<T>(&mut self, gc: Gc<T>) -> Handle<T> {
        self.roots.push(gc.erase());
        Handle::new(gc)
    }

    pub fn roots(&self) -> &[ErasedGc] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn marker(&self) -> ScopeMarker {
        ScopeMarker(self.roots.len())
    }

    /// Releases every handle created since `marker` was taken.
    pub fn flush_to_marker(&mut self, marker: ScopeMarker) {
        self.roots.truncate(marker.0);
    }
}
