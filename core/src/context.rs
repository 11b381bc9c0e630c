use std::any::Any;
use std::cell::{Ref, RefMut};

use crate::config::EngineConfig;
use crate::embedding::handle::HandleScope;
use crate::errors::RuntimeError;
use crate::runtime::error::StackAccessor;
use crate::runtime::gc::{CollectStats, ErasedGc, Gc, GcCell, Heap, Trace, Tracer};
use crate::runtime::intrinsics::Intrinsics;
use crate::runtime::value::{ArrayStorage, JsObject, ObjectRef};
use crate::vm::machine::{ExecutionPoint, FrameStack};

/// A runtime instance: heap, live frames, and the per-runtime shared state.
pub struct Context {
    pub(crate) heap: Heap,
    pub(crate) handles: HandleScope,
    pub(crate) frames: FrameStack,
    pub(crate) current: Option<ExecutionPoint>,
    pub(crate) intrinsics: Intrinsics,
    pub(crate) error_stack_accessor: Option<StackAccessor>,
    pub(crate) config: EngineConfig,
}

impl Context {
    pub fn new() -> Result<Self, RuntimeError> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, RuntimeError> {
        let mut heap = Heap::with_threshold(config.gc_threshold);
        let intrinsics = Intrinsics::create(&mut heap)?;
        let mut ctx = Self {
            heap,
            handles: HandleScope::new(),
            frames: FrameStack::new(config.max_frames),
            current: None,
            intrinsics,
            error_stack_accessor: None,
            config,
        };
        ctx.init_error_builtins()?;
        ctx.heap.set_limit(ctx.config.heap_limit);
        Ok(ctx)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn handles(&mut self) -> &mut HandleScope {
        &mut self.handles
    }

    pub fn set_heap_limit(&mut self, limit: Option<usize>) {
        self.heap.set_limit(limit);
    }

    /// Allocates a cell and registers it in the current handle scope. May
    /// collect first; anything the caller still needs must be rooted.
    pub fn alloc<T: Trace + Any>(&mut self, value: T) -> Result<Gc<T>, RuntimeError> {
        self.make_room(1);
        let gc = self.heap.alloc(value)?;
        self.handles.create(gc);
        Ok(gc)
    }

    pub fn alloc_object(&mut self, object: JsObject) -> Result<ObjectRef, RuntimeError> {
        self.alloc(GcCell::new(object))
    }

    pub fn alloc_storage<T: Trace + Any>(
        &mut self,
        capacity: usize,
    ) -> Result<Gc<GcCell<ArrayStorage<T>>>, RuntimeError> {
        self.alloc(GcCell::new(ArrayStorage::with_capacity(capacity)))
    }

    /// Appends to a heap storage, charging one unit. `storage` and `value`
    /// must be rooted by the caller.
    pub fn storage_push<T: Trace + Any>(
        &mut self,
        storage: Gc<GcCell<ArrayStorage<T>>>,
        value: T,
    ) -> Result<(), RuntimeError> {
        self.make_room(1);
        self.heap.grow(storage, 1)?;
        self.heap
            .get(storage)
            .ok_or_else(|| RuntimeError::type_error("push into a collected storage"))?
            .borrow_mut()
            .push(value);
        Ok(())
    }

    pub fn storage<T: Trace + Any>(
        &self,
        storage: Gc<GcCell<ArrayStorage<T>>>,
    ) -> Result<Ref<'_, ArrayStorage<T>>, RuntimeError> {
        self.heap
            .get(storage)
            .map(|cell| cell.borrow())
            .ok_or_else(|| RuntimeError::type_error("use of a collected storage"))
    }

    fn make_room(&mut self, units: usize) {
        if self.heap.should_collect() || self.heap.would_exceed(units) {
            self.collect_garbage();
        }
    }

    pub fn collect_garbage(&mut self) -> CollectStats {
        let roots = self.roots();
        self.heap.collect(&roots)
    }

    pub(crate) fn roots(&self) -> Vec<ErasedGc> {
        let mut tracer = Tracer::new();
        self.intrinsics.trace(&mut tracer);
        self.frames.trace(&mut tracer);
        if let Some(point) = self.current {
            tracer.mark(point.code_unit);
        }
        if let Some(accessor) = &self.error_stack_accessor {
            accessor.trace(&mut tracer);
        }
        let mut roots: Vec<ErasedGc> = tracer.drain().collect();
        roots.extend_from_slice(self.handles.roots());
        roots
    }

    /// Runs `f` and releases every handle it created. Values `f` returns
    /// are not rooted afterwards.
    pub fn scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let marker = self.handles.marker();
        let out = f(self);
        self.handles.flush_to_marker(marker);
        out
    }

    pub fn object(&self, obj: ObjectRef) -> Result<Ref<'_, JsObject>, RuntimeError> {
        self.heap
            .get(obj)
            .map(|cell| cell.borrow())
            .ok_or_else(|| RuntimeError::type_error("use of a collected object"))
    }

    pub fn object_mut(&self, obj: ObjectRef) -> Result<RefMut<'_, JsObject>, RuntimeError> {
        self.heap
            .get(obj)
            .map(|cell| cell.borrow_mut())
            .ok_or_else(|| RuntimeError::type_error("use of a collected object"))
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }
}
