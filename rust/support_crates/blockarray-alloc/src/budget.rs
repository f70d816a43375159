//! `BudgetAllocator`: an allocator wrapper with a hard limit on live bytes.

use std::sync::atomic::{AtomicU64, Ordering};

use blockarray_common::{Error, Result};

use crate::align::align_up;
use crate::allocator::{AlignedAllocator, BlockAllocator};
use crate::block::Block;

/// A thread-safe counter that allows withdrawing (if possible) and depositing
/// specific amounts, keeping the value non-negative.
///
/// Every update is a single atomic operation, so a `Counter` can be shared
/// between threads that charge against the same budget.
pub struct Counter(AtomicU64);

impl Counter {
    /// Creates a new `Counter` with the given initial amount.
    ///
    /// # Arguments
    ///
    /// * `amount` - Starting value of the counter.
    pub fn new(amount: u64) -> Counter {
        Counter(AtomicU64::new(amount))
    }

    /// Attempts to withdraw the specified `amount` from the counter.
    ///
    /// If the current value is at least `amount`, it is subtracted. Otherwise
    /// the counter is left as it was. Concurrent withdrawals are resolved with
    /// a compare-and-exchange loop, so the value never drops below zero.
    ///
    /// # Arguments
    ///
    /// * `amount` - Amount to take from the counter.
    ///
    /// # Returns
    ///
    /// `true` if the amount was withdrawn, `false` if it was not available.
    pub fn withdraw(&self, amount: u64) -> bool {
        let mut current = self.0.load(Ordering::Relaxed);
        while current >= amount {
            match self.0.compare_exchange_weak(
                current,
                current - amount,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated) => current = updated,
            }
        }
        false
    }

    /// Deposits the specified `amount` into the counter.
    ///
    /// # Arguments
    ///
    /// * `amount` - Amount to add back, typically an earlier withdrawal.
    pub fn deposit(&self, amount: u64) {
        self.0.fetch_add(amount, Ordering::Release);
    }

    /// Returns the current counter value.
    ///
    /// The value may already be stale when other threads update the counter.
    pub fn read(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Wraps an allocator and fails any allocation that would push the total of
/// live bytes above a fixed budget.
///
/// Each block is charged its size rounded up to its alignment. A refused
/// request surfaces as
/// [`ErrorKind::AllocationFailed`](blockarray_common::ErrorKind::AllocationFailed),
/// exactly like heap exhaustion.
pub struct BudgetAllocator<A = AlignedAllocator> {
    inner: A,
    budget: Counter,
    limit: u64,
}

impl BudgetAllocator<AlignedAllocator> {
    /// Creates a budgeted allocator over the global heap.
    pub fn new(limit: u64) -> Self {
        Self::with_allocator(AlignedAllocator, limit)
    }
}

impl<A> BudgetAllocator<A> {
    pub fn with_allocator(inner: A, limit: u64) -> Self {
        BudgetAllocator {
            inner,
            budget: Counter::new(limit),
            limit,
        }
    }

    /// Bytes that can still be allocated.
    pub fn remaining(&self) -> u64 {
        self.budget.read()
    }

    /// The configured limit in bytes.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Bytes currently charged against the budget.
    pub fn used(&self) -> u64 {
        self.limit - self.remaining()
    }

    fn charge(byte_size: usize, alignment: usize) -> Option<u64> {
        align_up(byte_size, alignment).map(|n| n as u64)
    }
}

unsafe impl<A: BlockAllocator> BlockAllocator for BudgetAllocator<A> {
    fn allocate(&self, byte_size: usize, alignment: usize) -> Result<Block> {
        if byte_size == 0 || !alignment.is_power_of_two() {
            return self.inner.allocate(byte_size, alignment);
        }

        let charge = Self::charge(byte_size, alignment).ok_or_else(Error::capacity_overflow)?;
        if !self.budget.withdraw(charge) {
            log::debug!(
                "budget refused {byte_size} bytes: {} of {} bytes remaining",
                self.remaining(),
                self.limit
            );
            return Err(Error::allocation_failed(byte_size, alignment));
        }

        self.inner.allocate(byte_size, alignment).inspect_err(|_| {
            self.budget.deposit(charge);
        })
    }

    unsafe fn release(&self, block: Block) {
        if !block.is_empty() {
            if let Some(charge) = Self::charge(block.size(), block.alignment()) {
                self.budget.deposit(charge);
            }
        }
        unsafe { self.inner.release(block) }
    }
}
