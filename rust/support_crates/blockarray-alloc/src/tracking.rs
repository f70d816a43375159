//! `TrackingAllocator`: an allocator wrapper that keeps per-block bookkeeping.
//!
//! Every live block is recorded by address together with its size and
//! alignment, and aggregate statistics are maintained for allocations and
//! releases. The tracker is an ordinary value: pass it (or a reference to it,
//! since `&TrackingAllocator` is itself a [`BlockAllocator`]) to whichever
//! containers should be accounted together.
//!
//! The tracker uses `Cell`/`RefCell` for its bookkeeping and is therefore not
//! `Sync`.

use std::cell::{Cell, RefCell};

use ahash::AHashMap;
use blockarray_common::Result;

use crate::allocator::{AlignedAllocator, BlockAllocator};
use crate::block::Block;

/// Size and alignment of a live block, keyed by its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub size: usize,
    pub alignment: usize,
}

/// Aggregate allocation statistics.
///
/// Only non-empty blocks are counted; zero-byte requests never reach the
/// underlying allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocStats {
    /// Number of successful non-empty allocations.
    pub allocations: u64,
    /// Number of releases of tracked blocks.
    pub releases: u64,
    /// Number of failed allocation attempts.
    pub failures: u64,
    /// Number of blocks currently live.
    pub live_blocks: usize,
    /// Bytes currently live.
    pub live_bytes: usize,
    /// Highest value `live_bytes` has reached.
    pub peak_bytes: usize,
    /// Sum of the sizes of all successful allocations.
    pub total_bytes: u64,
}

pub struct TrackingAllocator<A = AlignedAllocator> {
    inner: A,
    live: RefCell<AHashMap<usize, BlockInfo>>,
    stats: Cell<AllocStats>,
}

impl TrackingAllocator<AlignedAllocator> {
    /// Creates a tracker over the global heap.
    pub fn new() -> Self {
        Self::with_allocator(AlignedAllocator)
    }
}

impl<A> TrackingAllocator<A> {
    /// Creates a tracker over the given allocator.
    pub fn with_allocator(inner: A) -> Self {
        TrackingAllocator {
            inner,
            live: RefCell::new(AHashMap::new()),
            stats: Cell::new(AllocStats::default()),
        }
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> AllocStats {
        self.stats.get()
    }

    /// Number of successful non-empty allocations so far.
    pub fn allocations(&self) -> u64 {
        self.stats.get().allocations
    }

    pub fn live_blocks(&self) -> usize {
        self.stats.get().live_blocks
    }

    pub fn live_bytes(&self) -> usize {
        self.stats.get().live_bytes
    }

    /// Returns the bookkeeping entry for a live block starting at `ptr`.
    pub fn block_info(&self, ptr: *const u8) -> Option<BlockInfo> {
        self.live.borrow().get(&ptr.addr()).copied()
    }

    /// Returns `true` if `block` is live and was allocated through this tracker.
    pub fn owns(&self, block: &Block) -> bool {
        !block.is_empty() && self.block_info(block.as_ptr()).is_some()
    }

    /// Returns the underlying allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn update(&self, f: impl FnOnce(&mut AllocStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

impl Default for TrackingAllocator<AlignedAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<A: BlockAllocator> BlockAllocator for TrackingAllocator<A> {
    fn allocate(&self, byte_size: usize, alignment: usize) -> Result<Block> {
        let block = match self.inner.allocate(byte_size, alignment) {
            Ok(block) => block,
            Err(e) => {
                if e.is_allocation_failure() {
                    self.update(|s| s.failures += 1);
                }
                return Err(e);
            }
        };
        if block.is_empty() {
            return Ok(block);
        }

        let info = BlockInfo {
            size: block.size(),
            alignment: block.alignment(),
        };
        let previous = self.live.borrow_mut().insert(block.as_ptr().addr(), info);
        debug_assert!(previous.is_none(), "allocator returned a live block twice");
        self.update(|s| {
            s.allocations += 1;
            s.live_blocks += 1;
            s.live_bytes += info.size;
            s.peak_bytes = s.peak_bytes.max(s.live_bytes);
            s.total_bytes += info.size as u64;
        });
        Ok(block)
    }

    unsafe fn release(&self, block: Block) {
        if !block.is_empty() {
            let removed = self.live.borrow_mut().remove(&block.as_ptr().addr());
            match removed {
                Some(info) => {
                    debug_assert_eq!(info.size, block.size());
                    self.update(|s| {
                        s.releases += 1;
                        s.live_blocks -= 1;
                        s.live_bytes -= info.size;
                    });
                }
                None => {
                    log::warn!(
                        "release of untracked block at {:p} ({} bytes)",
                        block.as_ptr(),
                        block.size()
                    );
                }
            }
        }
        unsafe { self.inner.release(block) }
    }
}

impl<A> Drop for TrackingAllocator<A> {
    fn drop(&mut self) {
        let live = self.live.get_mut();
        if !live.is_empty() {
            log::warn!(
                "tracking allocator dropped with {} live blocks ({} bytes)",
                live.len(),
                live.values().map(|info| info.size).sum::<usize>()
            );
        }
    }
}

impl<A> std::fmt::Debug for TrackingAllocator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingAllocator")
            .field("stats", &self.stats.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_counts() {
        let alloc = TrackingAllocator::new();
        let a = alloc.allocate(64, 8).unwrap();
        let b = alloc.allocate(32, 16).unwrap();
        assert_eq!(alloc.live_blocks(), 2);
        assert_eq!(alloc.live_bytes(), 96);
        assert!(alloc.owns(&a));
        assert_eq!(
            alloc.block_info(b.as_ptr()),
            Some(BlockInfo {
                size: 32,
                alignment: 16
            })
        );

        unsafe { alloc.release(a) };
        let stats = alloc.stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.live_blocks, 1);
        assert_eq!(stats.live_bytes, 32);
        assert_eq!(stats.peak_bytes, 96);
        assert_eq!(stats.total_bytes, 96);

        unsafe { alloc.release(b) };
        assert_eq!(alloc.live_blocks(), 0);
        assert_eq!(alloc.live_bytes(), 0);
    }

    #[test]
    fn test_zero_sized_requests_are_not_counted() {
        let alloc = TrackingAllocator::new();
        let block = alloc.allocate(0, 8).unwrap();
        assert!(!alloc.owns(&block));
        unsafe { alloc.release(block) };
        assert_eq!(alloc.stats(), AllocStats::default());
    }

    #[test]
    fn test_shared_by_reference() {
        let alloc = TrackingAllocator::new();
        let by_ref = &alloc;
        let block = by_ref.allocate(10, 2).unwrap();
        assert_eq!(alloc.allocations(), 1);
        unsafe { by_ref.release(block) };
        assert_eq!(alloc.live_blocks(), 0);
    }

    #[test]
    fn test_failures_are_counted() {
        let alloc = TrackingAllocator::new();
        assert!(alloc.allocate(isize::MAX as usize, 8).is_err());
        // Argument errors are not allocation failures.
        assert!(alloc.allocate(8, 3).is_err());
        assert_eq!(alloc.stats().failures, 1);
        assert_eq!(alloc.allocations(), 0);
    }
}
