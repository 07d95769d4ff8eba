//! Fixed-size batching.

use std::num::NonZeroUsize;

/// Splits a slice into contiguous, order-preserving batches.
///
/// Every batch holds `size` items except possibly the last. An empty slice
/// yields no batches. Iteration borrows the input and can be restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    size: NonZeroUsize,
}

impl Batcher {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn batches<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        items.chunks(self.size.get())
    }
}
