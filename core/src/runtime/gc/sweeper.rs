use super::heap::Heap;

pub fn sweep(heap: &mut Heap) -> (usize, usize) {
    heap.sweep_unmarked()
}
