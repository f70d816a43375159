//! Owning iterator over the elements of an [`Array`](crate::Array).

use std::marker::PhantomData;
use std::ptr;

use blockarray_alloc::{Block, BlockAllocator};

/// Moves elements out of an array, front to back.
///
/// The backing block is released once the iterator is dropped; any elements
/// not yet yielded are dropped with it.
pub struct IntoIter<T, A: BlockAllocator> {
    block: Block,
    alloc: A,
    /// Next element to yield from the front.
    head: usize,
    /// One past the next element to yield from the back.
    tail: usize,
    _marker: PhantomData<T>,
}

impl<T, A: BlockAllocator> IntoIter<T, A> {
    /// The first `len` slots of `block` must hold initialized values owned by
    /// the iterator from here on.
    pub(crate) fn new(block: Block, len: usize, alloc: A) -> Self {
        IntoIter {
            block,
            alloc,
            head: 0,
            tail: len,
            _marker: PhantomData,
        }
    }

    /// Elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `head..tail` are initialized and owned by the iterator.
        unsafe {
            std::slice::from_raw_parts(self.base().add(self.head), self.tail - self.head)
        }
    }

    #[inline]
    fn base(&self) -> *mut T {
        self.block.cast::<T>().as_ptr()
    }
}

impl<T, A: BlockAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        let index = self.head;
        self.head += 1;
        // SAFETY: `index` was inside `head..tail` and is now excluded from it.
        Some(unsafe { self.base().add(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.tail - self.head;
        (n, Some(n))
    }
}

impl<T, A: BlockAllocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        // SAFETY: the old `tail - 1` was inside `head..tail`.
        Some(unsafe { self.base().add(self.tail).read() })
    }
}

impl<T, A: BlockAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: BlockAllocator> std::iter::FusedIterator for IntoIter<T, A> {}

impl<T, A: BlockAllocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: `head <= tail` and both are within the block.
            unsafe { self.base().add(self.head) },
            self.tail - self.head,
        );
        self.head = self.tail;
        let block = std::mem::take(&mut self.block);
        // SAFETY: the remaining slots are initialized; after dropping them the
        // block holds no live values and came from `alloc`.
        unsafe {
            ptr::drop_in_place(remaining);
            self.alloc.release(block);
        }
    }
}

impl<T: std::fmt::Debug, A: BlockAllocator> std::fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
