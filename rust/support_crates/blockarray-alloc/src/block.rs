//! `Block`: an owning handle to a raw, alignment-tagged span of memory.

use std::mem::ManuallyDrop;
use std::ptr::NonNull;

/// An owning handle to an uninitialized, aligned region of memory.
///
/// A `Block` is produced by a [`BlockAllocator`](crate::BlockAllocator) and is
/// owned by exactly one party at a time. It is neither `Clone` nor `Copy`, so
/// safe code cannot alias one block from two owners, and handing it back via
/// [`release`](crate::BlockAllocator::release) consumes it.
///
/// A block never knows what is stored in it. Whoever writes values into the
/// block is responsible for dropping them before the block is released.
///
/// Dropping a non-empty block without releasing it leaks the memory; this is
/// reported through `log::warn!`.
pub struct Block {
    /// Start of the region. Dangling (but aligned) for empty blocks.
    ptr: NonNull<u8>,
    /// Size of the region in bytes.
    size: usize,
    /// Alignment the region was allocated with.
    alignment: usize,
}

// A `Block` is plain memory with a single owner.
unsafe impl Send for Block {}

unsafe impl Sync for Block {}

impl Block {
    /// Returns a block that holds no memory.
    pub const fn empty() -> Block {
        Block {
            ptr: NonNull::dangling(),
            size: 0,
            alignment: 1,
        }
    }

    /// Returns a zero-sized block whose pointer satisfies `alignment`.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn dangling(alignment: usize) -> Block {
        assert!(alignment.is_power_of_two());
        let ptr = NonNull::new(std::ptr::without_provenance_mut::<u8>(alignment))
            .unwrap_or(NonNull::dangling());
        Block {
            ptr,
            size: 0,
            alignment,
        }
    }

    /// Wraps a raw region into a block handle.
    ///
    /// # Safety
    ///
    /// - `ptr` must be valid for reads and writes of `size` bytes and aligned
    ///   to `alignment`, which must be a power of two.
    /// - The region must not be owned by any other `Block` (no aliasing).
    /// - The region must be releasable by the allocator the block will
    ///   eventually be returned to.
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, size: usize, alignment: usize) -> Block {
        debug_assert!(alignment.is_power_of_two());
        debug_assert!(crate::align::is_aligned_ptr(ptr.as_ptr(), alignment));
        Block {
            ptr,
            size,
            alignment,
        }
    }

    /// Consumes the handle and returns `(ptr, size, alignment)` without
    /// freeing anything. Used by allocators on release.
    pub fn into_raw_parts(self) -> (NonNull<u8>, usize, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.size, this.alignment)
    }

    /// Size of the block in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the block in bytes.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Returns `true` if the block holds no memory.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the start of the block.
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Returns the start of the block, typed as `T`.
    ///
    /// The caller is responsible for `T`'s alignment being satisfied by
    /// [`alignment`](Self::alignment), which is checked in debug builds.
    #[inline]
    pub fn cast<T>(&self) -> NonNull<T> {
        debug_assert!(
            self.size == 0 || crate::align::is_aligned_ptr(self.as_ptr(), std::mem::align_of::<T>())
        );
        self.ptr.cast()
    }

    /// Number of whole `T` values that fit into the block.
    ///
    /// Zero-sized types fit without limit.
    #[inline]
    pub fn capacity_for<T>(&self) -> usize {
        match std::mem::size_of::<T>() {
            0 => usize::MAX,
            n => self.size / n,
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::empty()
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        if self.size != 0 {
            log::warn!(
                "block of {} bytes at {:p} dropped without release, memory leaked",
                self.size,
                self.ptr
            );
        }
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("ptr", &self.ptr)
            .field("size", &self.size)
            .field("alignment", &self.alignment)
            .finish()
    }
}
