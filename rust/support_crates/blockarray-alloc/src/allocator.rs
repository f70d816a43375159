//! The `BlockAllocator` trait and the global-heap implementation.

use std::alloc::Layout;
use std::ptr::NonNull;

use blockarray_common::{Error, Result, verify_arg};

use crate::block::Block;

/// A source of raw, aligned memory blocks.
///
/// The two operations are the whole contract: [`allocate`](Self::allocate)
/// hands out a fresh, uninitialized block of exactly the requested byte size
/// and [`release`](Self::release) takes it back. Allocators never construct or
/// destroy values inside a block.
///
/// Allocation failure is reported as
/// [`ErrorKind::AllocationFailed`](blockarray_common::ErrorKind::AllocationFailed)
/// and is never retried.
///
/// # Safety
///
/// Implementors must guarantee that every non-empty block returned by
/// `allocate` is valid for reads and writes of `block.size()` bytes, is
/// aligned to the requested alignment, and is not handed out again before it
/// has been released.
pub unsafe trait BlockAllocator {
    /// Allocates an uninitialized block of `byte_size` bytes aligned to
    /// `alignment`.
    ///
    /// A `byte_size` of zero yields an empty block. `alignment` must be a
    /// power of two.
    fn allocate(&self, byte_size: usize, alignment: usize) -> Result<Block>;

    /// Returns a block to the allocator.
    ///
    /// Releasing an empty block is a no-op.
    ///
    /// # Safety
    ///
    /// `block` must have been obtained from `allocate` on this allocator, and
    /// any values stored in it must already have been dropped or moved out.
    unsafe fn release(&self, block: Block);

    /// Allocates a block sized for `count` values of `T`.
    fn allocate_for<T>(&self, count: usize, alignment: usize) -> Result<Block>
    where
        Self: Sized,
    {
        let byte_size = std::mem::size_of::<T>()
            .checked_mul(count)
            .ok_or_else(Error::capacity_overflow)?;
        self.allocate(byte_size, alignment)
    }
}

unsafe impl<A> BlockAllocator for &A
where
    A: BlockAllocator + ?Sized,
{
    #[inline]
    fn allocate(&self, byte_size: usize, alignment: usize) -> Result<Block> {
        (**self).allocate(byte_size, alignment)
    }

    #[inline]
    unsafe fn release(&self, block: Block) {
        unsafe { (**self).release(block) }
    }
}

/// Allocates blocks from the global heap with a caller-chosen alignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlignedAllocator;

impl AlignedAllocator {
    pub fn new() -> AlignedAllocator {
        AlignedAllocator
    }
}

unsafe impl BlockAllocator for AlignedAllocator {
    fn allocate(&self, byte_size: usize, alignment: usize) -> Result<Block> {
        verify_arg!(alignment, alignment.is_power_of_two());
        if byte_size == 0 {
            return Ok(Block::dangling(alignment));
        }

        let layout = Layout::from_size_align(byte_size, alignment)?;
        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { std::alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            log::debug!("heap allocation of {byte_size} bytes (alignment {alignment}) failed");
            return Err(Error::allocation_failed(byte_size, alignment));
        };
        log::trace!("allocated {byte_size} bytes at {ptr:p} (alignment {alignment})");

        // SAFETY: the region is freshly allocated with this size and alignment.
        Ok(unsafe { Block::from_raw_parts(ptr, byte_size, alignment) })
    }

    unsafe fn release(&self, block: Block) {
        let (ptr, size, alignment) = block.into_raw_parts();
        if size == 0 {
            return;
        }
        log::trace!("released {size} bytes at {ptr:p}");
        // SAFETY: the caller guarantees the block came from `allocate`, which
        // used exactly this layout.
        unsafe {
            let layout = Layout::from_size_align_unchecked(size, alignment);
            std::alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}
