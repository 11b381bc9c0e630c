use crate::runtime::gc::{Heap, Trace, Tracer};
use crate::runtime::value::ObjectRef;
use crate::vm::bytecode::CodeUnitRef;

/// What a frame is running: a function object, or bare code (global or
/// eval code) that has no closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCallee {
    Function(ObjectRef),
    Code(CodeUnitRef),
}

impl FrameCallee {
    /// The code unit this callee executes, or `None` for native functions.
    pub fn code_unit(&self, heap: &Heap) -> Option<CodeUnitRef> {
        match self {
            FrameCallee::Function(obj) => heap
                .get(*obj)
                .and_then(|cell| cell.borrow().callable().and_then(|c| c.code_unit())),
            FrameCallee::Code(code_unit) => Some(*code_unit),
        }
    }
}

/// A code unit and the bytecode offset it is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPoint {
    pub code_unit: CodeUnitRef,
    pub offset: u32,
}

/// One activation record. The saved fields describe the caller: which code
/// unit and offset were active when this frame was pushed.
#[derive(Debug, Clone, Copy)]
pub struct StackFrame {
    callee: FrameCallee,
    saved: Option<ExecutionPoint>,
}

impl StackFrame {
    pub fn new(callee: FrameCallee, saved: Option<ExecutionPoint>) -> Self {
        Self { callee, saved }
    }

    pub fn callee(&self) -> FrameCallee {
        self.callee
    }

    pub fn callee_code_unit(&self, heap: &Heap) -> Option<CodeUnitRef> {
        self.callee.code_unit(heap)
    }

    pub fn saved_point(&self) -> Option<ExecutionPoint> {
        self.saved
    }

    pub fn saved_code_unit(&self) -> Option<CodeUnitRef> {
        self.saved.map(|point| point.code_unit)
    }

    pub fn saved_offset(&self) -> u32 {
        self.saved.map_or(0, |point| point.offset)
    }
}

impl Trace for StackFrame {
    fn trace(&self, tracer: &mut Tracer) {
        match self.callee {
            FrameCallee::Function(obj) => tracer.mark(obj),
            FrameCallee::Code(code_unit) => tracer.mark(code_unit),
        }
        if let Some(point) = self.saved {
            tracer.mark(point.code_unit);
        }
    }
}
