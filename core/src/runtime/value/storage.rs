use crate::runtime::gc::{Trace, Tracer};

/// Growable element storage living on the heap. Growth is charged against
/// the heap limit through `Context::storage_push`.
#[derive(Debug, Clone, Default)]
pub struct ArrayStorage<T> {
    elements: Vec<T>,
}

impl<T> ArrayStorage<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub(crate) fn push(&mut self, value: T) {
        self.elements.push(value);
    }
}

impl<T: Trace> Trace for ArrayStorage<T> {
    fn trace(&self, tracer: &mut Tracer) {
        self.elements.trace(tracer);
    }
}
