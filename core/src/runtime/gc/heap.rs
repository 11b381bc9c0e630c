use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::marker;
use super::sweeper;
use super::trace::Trace;
use crate::errors::RuntimeError;

pub type GcCell<T> = RefCell<T>;

/// Index of a heap cell. Only meaningful for the heap that produced it.
pub struct Gc<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Gc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gc({})", self.index)
    }
}

impl<T> Copy for Gc<T> {}

impl<T> Clone for Gc<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Gc<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Gc<T> {}

impl<T> Hash for Gc<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> Gc<T> {
    pub fn erase(self) -> ErasedGc {
        self.index
    }
}

pub type ErasedGc = usize;

trait TraceAny: Trace + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Trace + Any> TraceAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct GcBox {
    marked: bool,
    /// One unit for the cell itself plus one per element grown into it.
    units: usize,
    value: Box<dyn TraceAny>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub before: usize,
    pub after: usize,
    pub collected: usize,
}

pub struct Heap {
    slots: Vec<Option<GcBox>>,
    live_count: usize,
    live_units: usize,
    alloc_count: usize,
    collection_threshold: usize,
    limit: Option<usize>,
}

impl Heap {
    pub fn new() -> Self {
        Self::with_threshold(1024)
    }

    pub fn with_threshold(collection_threshold: usize) -> Self {
        Self {
            slots: Vec::new(),
            live_count: 0,
            live_units: 0,
            alloc_count: 0,
            collection_threshold: collection_threshold.max(1),
            limit: None,
        }
    }

    /// Caps the number of live units. Allocations past the cap fail with
    /// `RuntimeError::OutOfMemory`.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn would_exceed(&self, units: usize) -> bool {
        self.limit
            .is_some_and(|limit| self.live_units + units > limit)
    }

    pub fn alloc<T: Trace + Any>(&mut self, value: T) -> Result<Gc<T>, RuntimeError> {
        self.check_units(1)?;
        let boxed = GcBox {
            marked: false,
            units: 1,
            value: Box::new(value),
        };
        let index = self.slots.len();
        self.slots.push(Some(boxed));
        self.live_count += 1;
        self.live_units += 1;
        self.alloc_count += 1;
        Ok(Gc {
            index,
            _marker: PhantomData,
        })
    }

    /// Charges `units` extra units to an existing cell, e.g. when a storage
    /// grows.
    pub fn grow<T>(&mut self, gc: Gc<T>, units: usize) -> Result<(), RuntimeError> {
        self.check_units(units)?;
        let Some(Some(slot)) = self.slots.get_mut(gc.index) else {
            return Err(RuntimeError::TypeError {
                message: "grow on a collected cell".to_string(),
            });
        };
        slot.units += units;
        self.live_units += units;
        Ok(())
    }

    fn check_units(&self, units: usize) -> Result<(), RuntimeError> {
        match self.limit {
            Some(limit) if self.live_units + units > limit => Err(RuntimeError::OutOfMemory {
                requested: units,
                limit,
            }),
            _ => Ok(()),
        }
    }

    pub fn get<T: Trace + Any>(&self, gc: Gc<T>) -> Option<&T> {
        self.slots
            .get(gc.index)
            .and_then(|slot| slot.as_ref())
            .and_then(|boxed| boxed.value.as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: Trace + Any>(&mut self, gc: Gc<T>) -> Option<&mut T> {
        self.slots
            .get_mut(gc.index)
            .and_then(|slot| slot.as_mut())
            .and_then(|boxed| boxed.value.as_any_mut().downcast_mut::<T>())
    }

    pub fn contains<T>(&self, gc: Gc<T>) -> bool {
        self.exists(gc.index)
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn live_units(&self) -> usize {
        self.live_units
    }

    pub fn should_collect(&self) -> bool {
        self.alloc_count >= self.collection_threshold
    }

    pub fn collect(&mut self, roots: &[ErasedGc]) -> CollectStats {
        let before = self.live_count;
        marker::mark_from_roots(self, roots);
        let (collected, freed_units) = sweeper::sweep(self);
        self.live_count -= collected;
        self.live_units -= freed_units;
        self.alloc_count = 0;
        self.collection_threshold = (self.live_count.max(1)) * 2;
        tracing::trace!(before, after = self.live_count, collected, "heap collected");
        CollectStats {
            before,
            after: self.live_count,
            collected,
        }
    }

    pub(crate) fn is_marked(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map(|boxed| boxed.marked)
            .unwrap_or(false)
    }

    pub(crate) fn exists(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .and_then(|slot| slot.as_ref())
            .is_some()
    }

    pub(crate) fn mark(&mut self, index: usize) {
        if let Some(Some(slot)) = self.slots.get_mut(index) {
            slot.marked = true;
        }
    }

    pub(crate) fn trace_index(&self, index: usize, tracer: &mut super::trace::Tracer) {
        if let Some(Some(slot)) = self.slots.get(index) {
            slot.value.trace(tracer);
        }
    }

    /// Frees every unmarked cell and clears marks on survivors. Returns the
    /// number of cells and units released.
    pub(crate) fn sweep_unmarked(&mut self) -> (usize, usize) {
        let mut freed = 0;
        let mut freed_units = 0;
        for slot in &mut self.slots {
            if let Some(boxed) = slot {
                if boxed.marked {
                    boxed.marked = false;
                } else {
                    freed_units += boxed.units;
                    *slot = None;
                    freed += 1;
                }
            }
        }
        (freed, freed_units)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
