use std::iter::Rev;
use std::slice;

use super::call_frame::StackFrame;
use crate::errors::RuntimeError;
use crate::runtime::gc::{Trace, Tracer};

pub struct FrameStack {
    frames: Vec<StackFrame>,
    max_frames: usize,
}

impl FrameStack {
    pub fn new(max_frames: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_frames,
        }
    }

    pub fn push(&mut self, frame: StackFrame) -> Result<(), RuntimeError> {
        if self.frames.len() >= self.max_frames {
            return Err(RuntimeError::RangeError {
                message: "Maximum call stack size exceeded".to_string(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame `depth` activations below the newest one.
    pub fn from_top(&self, depth: usize) -> Option<&StackFrame> {
        let index = self.frames.len().checked_sub(depth + 1)?;
        self.frames.get(index)
    }

    pub fn walk(&self) -> StackWalker<'_> {
        StackWalker {
            inner: self.frames.iter().rev(),
        }
    }
}

impl Trace for FrameStack {
    fn trace(&self, tracer: &mut Tracer) {
        self.frames.trace(tracer);
    }
}

/// Live frames, newest first, ending at the outermost activation. Walking
/// never allocates.
#[derive(Clone)]
pub struct StackWalker<'a> {
    inner: Rev<slice::Iter<'a, StackFrame>>,
}

impl<'a> Iterator for StackWalker<'a> {
    type Item = &'a StackFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StackWalker<'_> {}
