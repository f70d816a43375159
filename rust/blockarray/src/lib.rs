//! Growable and fixed-length arrays over explicit, byte-aligned block
//! allocators.
//!
//! [`Array`] keeps its elements in a single [`Block`] obtained from a
//! [`BlockAllocator`]. The default allocator, [`AlignedAllocator`], serves
//! blocks from the global heap with a caller-chosen alignment; wrappers such as
//! [`TrackingAllocator`] and [`BudgetAllocator`] add bookkeeping or limits and
//! can be shared between arrays by reference.
//!
//! Indexing accepts signed positions: `-1` is the last element, `-len` the
//! first.
//!
//! ```
//! use blockarray::{array, Array, TrackingAllocator};
//!
//! let mut a = array![1, 2, 3];
//! a.push_front(0).unwrap();
//! assert_eq!(a[-1], 3);
//!
//! let tracker = TrackingAllocator::new();
//! let mut b = Array::new_in(&tracker);
//! b.extend_by(8).unwrap();
//! b.push_back("x").unwrap();
//! assert_eq!(tracker.live_blocks(), 1);
//! ```

pub mod array;
pub mod cursor;
pub mod index;
pub mod into_iter;
pub mod options;
pub mod static_array;

pub use array::Array;
pub use cursor::{Cursor, CursorMut, ReverseCursor};
pub use into_iter::IntoIter;
pub use options::{ArrayOptions, GrowthPolicy};
pub use static_array::StaticArray;

pub use blockarray_alloc::{
    AlignedAllocator, AllocStats, Block, BlockAllocator, BudgetAllocator, TrackingAllocator,
};
pub use blockarray_common::{Error, ErrorKind, Result};

/// Creates an [`Array`] on the global heap, in the manner of `vec!`.
///
/// ```
/// use blockarray::array;
///
/// let a = array![7u8; 3];
/// assert_eq!(a, [7, 7, 7]);
/// let b = array!["x", "y"];
/// assert_eq!(b.len(), 2);
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($elem:expr; $n:expr) => {
        <$crate::Array<_> as ::std::convert::From<_>>::from(::std::vec![$elem; $n])
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::Array<_> as ::std::convert::From<_>>::from([$($x),+])
    };
}

#[cfg(test)]
mod tests;
