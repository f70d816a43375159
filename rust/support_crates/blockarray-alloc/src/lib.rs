//! Raw, alignment-aware block allocation for the blockarray containers.
//!
//! A [`Block`] is an owning handle to an untyped span of memory. Blocks are
//! produced by a [`BlockAllocator`] and must be handed back to the same
//! allocator through [`BlockAllocator::release`]; the allocator never runs
//! element destructors.
//!
//! # Modules
//!
//! - [`align`]: alignment arithmetic helpers
//! - [`block`]: the [`Block`] handle
//! - [`allocator`]: the [`BlockAllocator`] trait and the global-heap [`AlignedAllocator`]
//! - [`tracking`]: [`TrackingAllocator`], per-block bookkeeping and statistics
//! - [`budget`]: [`BudgetAllocator`], an allocator with a hard byte limit

pub mod align;
pub mod allocator;
pub mod block;
pub mod budget;
pub mod tracking;

pub use allocator::{AlignedAllocator, BlockAllocator};
pub use block::Block;
pub use budget::{BudgetAllocator, Counter};
pub use tracking::{AllocStats, TrackingAllocator};
