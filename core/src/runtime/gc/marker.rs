use super::heap::{ErasedGc, Heap};
use super::trace::Tracer;

/// Marks everything reachable from `roots`. Returns the number of cells
/// marked.
pub fn mark_from_roots(heap: &mut Heap, roots: &[ErasedGc]) -> usize {
    let mut worklist: Vec<ErasedGc> = Vec::with_capacity(roots.len());
    let mut marked = 0;

    for &root in roots {
        if heap.exists(root) && !heap.is_marked(root) {
            heap.mark(root);
            worklist.push(root);
            marked += 1;
        }
    }

    let mut tracer = Tracer::new();
    while let Some(index) = worklist.pop() {
        heap.trace_index(index, &mut tracer);
        for child in tracer.drain() {
            if heap.exists(child) && !heap.is_marked(child) {
                heap.mark(child);
                worklist.push(child);
                marked += 1;
            }
        }
    }
    marked
}
