mod call_frame;
mod stack;

pub use call_frame::{ExecutionPoint, FrameCallee, StackFrame};
pub use stack::{FrameStack, StackWalker};

use crate::context::Context;
use crate::errors::RuntimeError;

/// Hooks the interpreter loop drives as it enters and leaves functions.
impl Context {
    /// Pushes a frame for `callee`, saving the current execution point as
    /// the caller. Script callees start executing at offset 0.
    pub fn push_frame(&mut self, callee: FrameCallee) -> Result<(), RuntimeError> {
        let frame = StackFrame::new(callee, self.current);
        self.frames.push(frame)?;
        self.current = callee
            .code_unit(&self.heap)
            .map(|code_unit| ExecutionPoint {
                code_unit,
                offset: 0,
            });
        Ok(())
    }

    /// Pops the newest frame and resumes its caller.
    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        let frame = self.frames.pop()?;
        self.current = frame.saved_point();
        Some(frame)
    }

    /// Records the offset the active script frame is executing. Ignored while
    /// a native frame is on top.
    pub fn set_offset(&mut self, offset: u32) {
        if let Some(point) = self.current.as_mut() {
            point.offset = offset;
        }
    }

    pub fn current_point(&self) -> Option<ExecutionPoint> {
        self.current
    }

    pub fn stack_frames(&self) -> StackWalker<'_> {
        self.frames.walk()
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }
}
