//! Position-based cursors over the elements of an array.
//!
//! A cursor is a position in `[0, len]` over a borrowed slice, where `len`
//! is the past-the-end position. Moving a cursor clamps it to that range, so
//! a cursor can never point outside the sequence it was created from.
//! Cursors borrow the array, which keeps them from outliving a reallocation:
//!
//! ```compile_fail,E0502
//! use blockarray::Array;
//!
//! let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
//! let first = a.begin();
//! a.push_back(4).unwrap();
//! assert_eq!(first.get(), Some(&1));
//! ```
//!
//! # Comparing cursors
//!
//! Cursors compare by position, and only cursors over the same sequence are
//! ordered. The sequence is identified by its start address and length. Empty
//! arrays, and arrays of zero-sized elements with equal lengths, have no
//! storage of their own: their cursors are indistinguishable and compare by
//! position alone.
//!
//! [`Cursor`] and [`ReverseCursor`] are also iterators, so the method forms
//! `c.eq(..)` and `c.partial_cmp(..)` resolve to the element-wise
//! [`Iterator::eq`] and [`Iterator::partial_cmp`]. Use the `==` and `<`
//! operators to compare positions.

use std::cmp::Ordering;

/// Returns `true` if both slices are the same sequence.
#[inline]
fn same_sequence<T>(a: &[T], b: &[T]) -> bool {
    std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
}

/// Moves `pos` by `delta`, clamped to `[0, len]`.
#[inline]
fn shift(pos: usize, delta: isize, len: usize) -> usize {
    if delta < 0 {
        pos.saturating_sub(delta.unsigned_abs())
    } else {
        pos.saturating_add(delta as usize).min(len)
    }
}

/// A forward cursor over a shared slice.
///
/// Compare cursors with `==`, `<` and friends; see the
/// [module documentation](crate::cursor) for why the method forms differ.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], pos: usize) -> Self {
        Cursor {
            slice,
            pos: pos.min(slice.len()),
        }
    }

    /// Current position, `len` when past the end.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Element under the cursor, `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.pos)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.slice.len()
    }

    /// Moves one position forward, stopping at the end.
    pub fn advance(&mut self) -> &mut Self {
        self.pos = shift(self.pos, 1, self.slice.len());
        self
    }

    /// Moves one position back, stopping at the start.
    pub fn retreat(&mut self) -> &mut Self {
        self.pos = shift(self.pos, -1, self.slice.len());
        self
    }

    /// Returns a cursor moved by `delta` positions, clamped to `[0, len]`.
    pub fn offset(&self, delta: isize) -> Self {
        Cursor::new(self.slice, shift(self.pos, delta, self.slice.len()))
    }

    /// Signed number of positions from `self` to `other`.
    pub fn distance_to(&self, other: &Cursor<'_, T>) -> isize {
        other.pos as isize - self.pos as isize
    }

    /// Elements from the cursor to the end.
    pub fn remaining(&self) -> &'a [T] {
        &self.slice[self.pos..]
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        same_sequence(self.slice, other.slice) && self.pos == other.pos
    }
}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        same_sequence(self.slice, other.slice).then(|| self.pos.cmp(&other.pos))
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.get()?;
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.slice.len() - self.pos;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

/// A forward cursor that can modify the element under it.
///
/// A second cursor over the same array cannot coexist with a `CursorMut`, so
/// distances are measured to a position, and comparisons go through
/// [`as_cursor`](Self::as_cursor).
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    pos: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T], pos: usize) -> Self {
        let pos = pos.min(slice.len());
        CursorMut { slice, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == self.slice.len()
    }

    pub fn get(&self) -> Option<&T> {
        self.slice.get(self.pos)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slice.get_mut(self.pos)
    }

    /// Replaces the element under the cursor, returning the previous value.
    /// Returns `Err(value)` at the end.
    pub fn set(&mut self, value: T) -> Result<T, T> {
        match self.slice.get_mut(self.pos) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    pub fn advance(&mut self) -> &mut Self {
        self.pos = shift(self.pos, 1, self.slice.len());
        self
    }

    pub fn retreat(&mut self) -> &mut Self {
        self.pos = shift(self.pos, -1, self.slice.len());
        self
    }

    /// Moves the cursor by `delta` positions, clamped to `[0, len]`.
    pub fn seek(&mut self, delta: isize) -> &mut Self {
        self.pos = shift(self.pos, delta, self.slice.len());
        self
    }

    /// Consumes the cursor and returns it moved by `delta` positions.
    pub fn offset(mut self, delta: isize) -> Self {
        self.seek(delta);
        self
    }

    /// Signed number of positions from the cursor to `position`.
    pub fn distance_to(&self, position: usize) -> isize {
        position as isize - self.pos as isize
    }

    /// Read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.slice, self.pos)
    }
}

/// A cursor walking the slice from the back.
///
/// Position `len` refers to the last element and position 0 is the
/// before-the-start end. Arithmetic and ordering follow the direction of
/// travel: `offset(1)` moves towards the front, and [`rbegin`] orders before
/// [`rend`].
///
/// [`rbegin`]: crate::Array::rbegin
/// [`rend`]: crate::Array::rend
#[derive(Debug)]
pub struct ReverseCursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<T> Clone for ReverseCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReverseCursor<'_, T> {}

impl<'a, T> ReverseCursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], pos: usize) -> Self {
        ReverseCursor {
            slice,
            pos: pos.min(slice.len()),
        }
    }

    /// Index of the element under the cursor, `None` at the end.
    pub fn index(&self) -> Option<usize> {
        self.pos.checked_sub(1)
    }

    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index()?)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos == 0
    }

    /// Moves one element towards the front, stopping at the end.
    pub fn advance(&mut self) -> &mut Self {
        self.pos = shift(self.pos, -1, self.slice.len());
        self
    }

    /// Moves one element towards the back, stopping at the last element.
    pub fn retreat(&mut self) -> &mut Self {
        self.pos = shift(self.pos, 1, self.slice.len());
        self
    }

    /// Returns a cursor moved `delta` steps in the direction of travel,
    /// clamped between the last element and the end.
    pub fn offset(&self, delta: isize) -> Self {
        let delta = delta.checked_neg().unwrap_or(isize::MAX);
        ReverseCursor::new(self.slice, shift(self.pos, delta, self.slice.len()))
    }

    /// Signed number of steps from `self` to `other` in the direction of
    /// travel.
    pub fn distance_to(&self, other: &ReverseCursor<'_, T>) -> isize {
        self.pos as isize - other.pos as isize
    }
}

impl<T> PartialEq for ReverseCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        same_sequence(self.slice, other.slice) && self.pos == other.pos
    }
}

impl<T> PartialOrd for ReverseCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        same_sequence(self.slice, other.slice).then(|| other.pos.cmp(&self.pos))
    }
}

impl<'a, T> Iterator for ReverseCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.get()?;
        self.pos -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pos, Some(self.pos))
    }
}

impl<T> ExactSizeIterator for ReverseCursor<'_, T> {}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::Array;

    #[test]
    fn test_forward_cursor() {
        let a = Array::from_slice(&[1, 2, 3]).unwrap();
        let mut c = a.begin();
        assert_eq!(c.get(), Some(&1));
        c.advance().advance();
        assert_eq!(c.get(), Some(&3));
        c.advance().advance();
        assert!(c.is_end());
        assert_eq!(c, a.end());
        assert_eq!(c.get(), None);
        c.retreat();
        assert_eq!(c.get(), Some(&3));
        assert_eq!(a.begin().distance_to(&a.end()), 3);
        assert!(a.begin() < a.end());
    }

    #[test]
    fn test_cursor_offset_clamps() {
        let a = Array::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(a.begin().offset(-4).position(), 0);
        assert_eq!(a.begin().offset(10).position(), 3);
        assert_eq!(a.begin().offset(isize::MAX).position(), 3);
        assert_eq!(a.end().offset(-2).get(), Some(&2));
        assert_eq!(a.begin().offset(1).remaining(), &[2, 3]);
    }

    #[test]
    fn test_cursor_iterates() {
        let a = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        let collected: Vec<i32> = a.begin().offset(1).copied().collect();
        assert_eq!(collected, vec![2, 3, 4]);
        assert_eq!(a.begin().len(), 4);
        assert_eq!(a.end().count(), 0);
    }

    #[test]
    fn test_cursor_operators_compare_positions() {
        let a = Array::from_slice(&[5, 5, 5]).unwrap();
        let first = a.begin();
        let second = a.begin().offset(1);
        // Element-wise the remaining sequences differ only in length, so the
        // iterator methods and the operators disagree.
        assert!(first != second);
        assert!(first < second);
        assert_eq!(PartialOrd::partial_cmp(&first, &second), Some(Ordering::Less));
        assert_eq!(Iterator::partial_cmp(first, second), Some(Ordering::Greater));
    }

    #[test]
    fn test_cursors_of_different_sequences_are_unordered() {
        let a = Array::from_elem(3, ()).unwrap();
        let b = Array::from_elem(5, ()).unwrap();
        assert_eq!(a.as_ptr(), b.as_ptr());
        assert!(a.begin() != b.begin());
        assert_eq!(PartialOrd::partial_cmp(&a.begin(), &b.end()), None);
        assert_eq!(PartialOrd::partial_cmp(&a.rbegin(), &b.rend()), None);

        let c = Array::from_slice(&[1, 2]).unwrap();
        let d = Array::from_slice(&[1, 2]).unwrap();
        assert!(c.begin() != d.begin());
        assert_eq!(PartialOrd::partial_cmp(&c.begin(), &d.end()), None);
    }

    #[test]
    fn test_cursor_mut() {
        let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
        {
            let mut c = a.begin_mut();
            while let Some(v) = c.get_mut() {
                *v *= 10;
                c.advance();
            }
            assert!(c.is_end());
            assert_eq!(c.set(7), Err(7));
            c.retreat();
            assert_eq!(c.set(99), Ok(30));
        }
        assert_eq!(a, [10, 20, 99]);
    }

    #[test]
    fn test_cursor_mut_arithmetic() {
        let mut a = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        {
            let mut c = a.begin_mut().offset(2);
            assert_eq!(c.get(), Some(&3));
            assert_eq!(c.distance_to(0), -2);
            assert_eq!(c.distance_to(4), 2);

            c.seek(-10);
            assert_eq!(c.position(), 0);
            c.seek(10);
            assert!(c.is_end());
            c.seek(-1);
            *c.get_mut().unwrap() = 40;
            assert_eq!(c.as_cursor().position(), 3);
            assert_eq!(c.as_cursor().get(), Some(&40));
        }
        assert_eq!(a, [1, 2, 3, 40]);
    }

    #[test]
    fn test_reverse_cursor() {
        let a = Array::from_slice(&[1, 2, 3]).unwrap();
        let mut r = a.rbegin();
        assert_eq!(r.get(), Some(&3));
        assert_eq!(r.index(), Some(2));
        r.advance();
        assert_eq!(r.get(), Some(&2));
        r.advance().advance();
        assert!(r.is_end());
        assert_eq!(r, a.rend());
        r.retreat();
        assert_eq!(r.get(), Some(&1));

        let reversed: Vec<i32> = a.rbegin().copied().collect();
        assert_eq!(reversed, vec![3, 2, 1]);
    }

    #[test]
    fn test_reverse_cursor_arithmetic() {
        let a = Array::from_slice(&[1, 2, 3, 4]).unwrap();
        let r = a.rbegin();
        assert_eq!(r.offset(1).get(), Some(&3));
        assert_eq!(r.offset(3).get(), Some(&1));
        assert!(r.offset(4).is_end());
        assert!(r.offset(100).is_end());
        assert!(r.offset(isize::MIN).get() == Some(&4));
        assert_eq!(a.rend().offset(-2).get(), Some(&2));

        assert_eq!(r.distance_to(&a.rend()), 4);
        assert_eq!(a.rend().distance_to(&r), -4);
        assert_eq!(r.distance_to(&r.offset(2)), 2);

        assert!(r < a.rend());
        assert!(r.offset(1) > r);
        assert!(r <= r.offset(0));
        assert_eq!(
            PartialOrd::partial_cmp(&a.rend(), &r),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_cursors_on_empty_array() {
        let a = Array::<u8>::new();
        assert_eq!(a.begin(), a.end());
        assert!(a.rbegin().is_end());
        assert_eq!(a.rbegin().next(), None);
    }
}
