//! `Array`: a growable, contiguous sequence stored in a single allocator block.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Index, IndexMut};
use std::ptr;

use blockarray_alloc::{AlignedAllocator, Block, BlockAllocator};
use blockarray_common::{Error, Result};

use crate::cursor::{Cursor, CursorMut, ReverseCursor};
use crate::index::resolve_index;
use crate::into_iter::IntoIter;
use crate::options::ArrayOptions;

/// A growable, contiguous, random-access sequence of `T`.
///
/// The elements live in one [`Block`] obtained from the allocator `A`. The
/// array tracks three positions inside that block: its start, the write
/// cursor one past the last element (`len`), and the end of the allocated
/// slots (`capacity`), with `0 <= len <= capacity` at all times.
///
/// An empty array created by [`new`](Array::new) or from zero elements holds
/// no block at all. The block is released by [`clear`](Array::clear) and on
/// drop.
///
/// # Growth
///
/// Insertions into a full array grow it by the configured
/// [`GrowthPolicy`](crate::GrowthPolicy): linearly by one slot by default.
/// Growth allocates a new block, moves the elements over and releases the old
/// block. If the allocator fails, the error is returned and the array is left
/// exactly as it was.
///
/// # Element shifting
///
/// `push_front`, `pop_front` and `remove` move elements with a bitwise copy
/// (`memmove`). Every Rust type can be relocated that way, so `T` carries no
/// extra bounds; each element is dropped exactly once.
///
/// # Cursors
///
/// [`Cursor`], [`CursorMut`] and [`ReverseCursor`] borrow the array. Any
/// operation that may reallocate or shift elements takes `&mut self`, so an
/// outstanding cursor can never observe a stale block: holding
/// [`begin`](Array::begin) across [`push_back`](Array::push_back) is a borrow
/// error (see the [`cursor`](crate::cursor) module).
///
/// # Examples
///
/// ```
/// use blockarray::Array;
///
/// let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
/// a.push_back(4).unwrap();
/// assert_eq!(a.pop_front().unwrap(), 1);
/// a.remove(1).unwrap();
/// assert_eq!(a, [2, 4]);
/// assert_eq!(a.find(&4), Some(1));
/// assert_eq!(a[-1], 4);
/// ```
pub struct Array<T, A: BlockAllocator = AlignedAllocator> {
    /// Backing storage; a dangling, aligned block while the array has no
    /// capacity.
    block: Block,
    /// Number of initialized elements at the start of the block.
    len: usize,
    /// Number of element slots backed by the block.
    cap: usize,
    /// Resolved block alignment.
    alignment: usize,
    options: ArrayOptions,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T> Array<T> {
    /// Creates an empty array on the global heap. Does not allocate.
    pub fn new() -> Self {
        Self::new_in(AlignedAllocator)
    }

    /// Creates an empty array with the given options.
    pub fn with_options(options: ArrayOptions) -> Result<Self> {
        Self::with_options_in(options, AlignedAllocator)
    }

    /// Creates an array of `size` copies of `value`, with capacity `size`.
    pub fn from_elem(size: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_elem_in(size, value, AlignedAllocator)
    }

    /// Creates an array holding clones of `values`, in order.
    pub fn from_slice(values: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_slice_in(values, AlignedAllocator)
    }

    /// Moves the elements of `vec` into a new array with capacity `vec.len()`.
    pub fn from_vec(vec: Vec<T>) -> Result<Self> {
        Self::from_vec_in(vec, AlignedAllocator)
    }
}

impl<T, A: BlockAllocator> Array<T, A> {
    /// Creates an empty array that will allocate from `alloc`. Does not
    /// allocate.
    pub fn new_in(alloc: A) -> Self {
        let options = ArrayOptions::default();
        let alignment = options.resolve_alignment::<T>();
        Array {
            block: Block::dangling(alignment),
            len: 0,
            cap: 0,
            alignment,
            options,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Creates an empty array with the given options, allocating from `alloc`.
    pub fn with_options_in(options: ArrayOptions, alloc: A) -> Result<Self> {
        options.validate::<T>()?;
        let alignment = options.resolve_alignment::<T>();
        Ok(Array {
            block: Block::dangling(alignment),
            len: 0,
            cap: 0,
            alignment,
            options,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Creates an array of `size` copies of `value` in `alloc`.
    ///
    /// A `size` of zero yields an empty array without a block.
    pub fn from_elem_in(size: usize, value: T, alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut array = Self::new_in(alloc);
        if size == 0 {
            return Ok(array);
        }
        let mut fill = BlockFill::<T, A>::new(&array.alloc, size, array.alignment)?;
        for _ in 1..size {
            fill.push(value.clone());
        }
        fill.push(value);
        let block = fill.finish();
        array.install(block, size, size);
        Ok(array)
    }

    /// Creates an array holding clones of `values` in `alloc`.
    pub fn from_slice_in(values: &[T], alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let mut array = Self::new_in(alloc);
        array.assign_slice(values)?;
        Ok(array)
    }

    /// Moves the elements of `vec` into a new array in `alloc`.
    pub fn from_vec_in(mut vec: Vec<T>, alloc: A) -> Result<Self> {
        let mut array = Self::new_in(alloc);
        let len = vec.len();
        if len == 0 {
            return Ok(array);
        }
        let block = array.alloc.allocate_for::<T>(len, array.alignment)?;
        // SAFETY: the block holds `len` slots and does not overlap `vec`.
        // Setting the length to zero hands ownership of the elements over
        // to the block before `vec` frees its buffer.
        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), block.cast::<T>().as_ptr(), len);
            vec.set_len(0);
        }
        array.install(block, len, len);
        Ok(array)
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the array can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Size of one element in bytes.
    #[inline]
    pub const fn type_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Largest capacity an array of `T` could ever be given.
    #[inline]
    pub const fn max_capacity(&self) -> usize {
        let size = std::mem::size_of::<T>();
        if size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / size
        }
    }

    /// Alignment of the backing block in bytes.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Options the array was created with.
    pub fn options(&self) -> &ArrayOptions {
        &self.options
    }

    /// Allocator the backing block comes from.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns `true` if the array currently owns a block.
    #[inline]
    pub fn has_block(&self) -> bool {
        !self.block.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized, and the pointer is
        // aligned and non-null even without a block.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with unique access through `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns a pointer to the first slot of the block.
    ///
    /// The pointer is dangling, but aligned, while the array has no block.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.block.cast::<T>().as_ptr()
    }

    /// Mutable counterpart of [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.block.cast::<T>().as_ptr()
    }

    /// Returns the elements as raw bytes, `len * type_size` of them.
    pub fn as_bytes(&self) -> &[u8]
    where
        T: bytemuck::NoUninit,
    {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Iterates over the elements front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over mutable references to the elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Cursor positioned at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor positioned one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Mutable cursor positioned at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    /// Reverse cursor positioned at the last element.
    pub fn rbegin(&self) -> ReverseCursor<'_, T> {
        ReverseCursor::new(self.as_slice(), self.len)
    }

    /// Reverse cursor positioned one before the first element.
    pub fn rend(&self) -> ReverseCursor<'_, T> {
        ReverseCursor::new(self.as_slice(), 0)
    }

    /// Returns `true` if `index` resolves to an element (negative indices
    /// count from the back).
    #[inline]
    pub fn is_valid_index(&self, index: isize) -> bool {
        resolve_index(index, self.len).is_some()
    }

    /// Returns the element at `index`, or `None` if it is out of range.
    #[inline]
    pub fn get(&self, index: isize) -> Option<&T> {
        let index = resolve_index(index, self.len)?;
        Some(&self.as_slice()[index])
    }

    /// Mutable counterpart of [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        let index = resolve_index(index, self.len)?;
        Some(&mut self.as_mut_slice()[index])
    }

    /// Returns the element at `index`, where a negative index `i` resolves to
    /// `len + i`.
    pub fn at(&self, index: isize) -> Result<&T> {
        let len = self.len;
        self.get(index)
            .ok_or_else(|| Error::out_of_bounds(index, len))
    }

    /// Mutable counterpart of [`at`](Self::at).
    pub fn at_mut(&mut self, index: isize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(index)
            .ok_or_else(|| Error::out_of_bounds(index, len))
    }

    /// Returns the address of the element at `index`.
    pub fn location(&self, index: isize) -> Result<*const T> {
        self.at(index).map(|value| value as *const T)
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Empty`](blockarray_common::ErrorKind::Empty) if the array
    /// has no elements; the same holds for `front_mut`, `back` and `back_mut`.
    ///
    /// ```
    /// use blockarray::Array;
    ///
    /// let mut a = Array::from_slice(&[1, 2, 3]).unwrap();
    /// assert_eq!(a.front().unwrap(), &1);
    /// *a.back_mut().unwrap() = 30;
    /// assert_eq!(a.as_slice(), &[1, 2, 30]);
    /// assert!(Array::<u8>::new().back().is_err());
    /// ```
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or_else(|| Error::empty("front"))
    }

    /// Returns the first element for modification.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .first_mut()
            .ok_or_else(|| Error::empty("front_mut"))
    }

    /// Returns the last element.
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or_else(|| Error::empty("back"))
    }

    /// Returns the last element for modification.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .last_mut()
            .ok_or_else(|| Error::empty("back_mut"))
    }

    /// Returns the index of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns the number of elements equal to `value`.
    pub fn occurrence(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|v| *v == value).count()
    }

    /// Grows the capacity by one step of the growth policy.
    ///
    /// With the default policy this adds exactly one slot.
    pub fn extend(&mut self) -> Result<()> {
        self.extend_by(self.options.growth.grow_by(self.cap))
    }

    /// Grows the capacity by exactly `amount` slots, keeping every element in
    /// place.
    ///
    /// A new block of `capacity + amount` slots is allocated, the elements are
    /// moved into it and the old block is released. On failure the array is
    /// unchanged.
    pub fn extend_by(&mut self, amount: usize) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let new_cap = self
            .cap
            .checked_add(amount)
            .ok_or_else(Error::capacity_overflow)?;
        let block = self.alloc.allocate_for::<T>(new_cap, self.alignment)?;
        // SAFETY: the new block holds `new_cap >= len` slots and is distinct
        // from the current one. Elements are moved, not duplicated: the old
        // block is released without dropping anything.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), block.cast::<T>().as_ptr(), self.len);
        }
        let old = std::mem::replace(&mut self.block, block);
        log::debug!(
            "array grown from {} to {} slots ({} bytes)",
            self.cap,
            new_cap,
            self.block.size()
        );
        self.cap = new_cap;
        // SAFETY: `old` came from `self.alloc` and its elements were moved out.
        unsafe { self.alloc.release(old) };
        Ok(())
    }

    /// Appends `value` to the back of the array, growing it if full.
    ///
    /// On allocation failure the array is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        // SAFETY: `len < cap` after `reserve_one`.
        unsafe { self.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::empty("pop_back"));
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is initialized and no longer
        // counted as part of the array.
        Ok(unsafe { self.as_ptr().add(self.len).read() })
    }

    /// Inserts `value` at the front, shifting every element one slot to the
    /// right. O(n).
    pub fn push_front(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        let p = self.as_mut_ptr();
        // SAFETY: `len < cap`, so slots `1..=len` are inside the block.
        unsafe {
            ptr::copy(p, p.add(1), self.len);
            p.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the first element, shifting the rest one slot to
    /// the left. O(n).
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::empty("pop_front"));
        }
        let p = self.as_mut_ptr();
        self.len -= 1;
        // SAFETY: slot 0 is initialized; after reading it the remaining
        // `len` elements are moved down over it.
        unsafe {
            let value = p.read();
            ptr::copy(p.add(1), p, self.len);
            Ok(value)
        }
    }

    /// Removes and returns the element at `index`, shifting the trailing
    /// elements one slot to the left. Negative indices count from the back.
    pub fn remove(&mut self, index: isize) -> Result<T> {
        let Some(index) = resolve_index(index, self.len) else {
            return Err(Error::out_of_bounds(index, self.len));
        };
        let p = self.as_mut_ptr();
        let tail = self.len - index - 1;
        self.len -= 1;
        // SAFETY: `index < len`; the tail is moved over the removed slot.
        unsafe {
            let value = p.add(index).read();
            ptr::copy(p.add(index + 1), p.add(index), tail);
            Ok(value)
        }
    }

    /// Replaces the whole content with `size` copies of `value` in a freshly
    /// allocated block of exactly `size` slots.
    ///
    /// This does not preserve existing elements: everything previously held
    /// is dropped. A `size` of zero is a no-op that keeps the current content.
    /// On allocation failure the array is unchanged.
    pub fn resize(&mut self, size: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        if size == 0 {
            return Ok(());
        }
        let mut fill = BlockFill::<T, A>::new(&self.alloc, size, self.alignment)?;
        for _ in 1..size {
            fill.push(value.clone());
        }
        fill.push(value);
        let block = fill.finish();
        log::trace!("array contents replaced with {size} elements");
        self.clear();
        self.install(block, size, size);
        Ok(())
    }

    /// Drops every element and releases the block. Calling it on an empty
    /// array does nothing.
    pub fn clear(&mut self) {
        let len = std::mem::replace(&mut self.len, 0);
        // SAFETY: the first `len` slots were initialized; `self.len` is
        // already zero so a panicking destructor cannot cause a double drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len));
        }
        self.cap = 0;
        let block = std::mem::replace(&mut self.block, Block::dangling(self.alignment));
        // SAFETY: the block came from `self.alloc` and holds no live values.
        unsafe { self.alloc.release(block) };
    }

    /// Replaces the content with clones of `values` in a block of exactly
    /// `values.len()` slots. An empty `values` clears the array.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        if values.is_empty() {
            self.clear();
            return Ok(());
        }
        let mut fill = BlockFill::<T, A>::new(&self.alloc, values.len(), self.alignment)?;
        for value in values {
            fill.push(value.clone());
        }
        let block = fill.finish();
        self.clear();
        self.install(block, values.len(), values.len());
        Ok(())
    }

    /// Replaces the content with a deep copy of `other`.
    ///
    /// Assigning from an empty array clears this one.
    pub fn assign_from<B: BlockAllocator>(&mut self, other: &Array<T, B>) -> Result<()>
    where
        T: Clone,
    {
        self.assign_slice(other.as_slice())
    }

    /// Deep copy with a new block sized to `len` (not `capacity`).
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        A: Clone,
    {
        let mut array = Array::new_in(self.alloc.clone());
        array.alignment = self.alignment;
        array.options = self.options;
        array.block = Block::dangling(self.alignment);
        array.assign_slice(self.as_slice())?;
        Ok(array)
    }

    /// Moves the content out into a new array, leaving this one empty and
    /// without a block. O(1).
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let block = std::mem::replace(&mut self.block, Block::dangling(self.alignment));
        let len = std::mem::replace(&mut self.len, 0);
        let cap = std::mem::replace(&mut self.cap, 0);
        Array {
            block,
            len,
            cap,
            alignment: self.alignment,
            options: self.options,
            alloc: self.alloc.clone(),
            _marker: PhantomData,
        }
    }

    fn reserve_one(&mut self) -> Result<()> {
        if self.len == self.cap {
            self.extend()?;
        }
        debug_assert!(self.len < self.cap);
        Ok(())
    }

    /// Takes ownership of a block whose first `len` slots are initialized.
    /// The array must not own a block when this is called.
    fn install(&mut self, block: Block, len: usize, cap: usize) {
        debug_assert!(!self.has_block() && self.len == 0);
        debug_assert!(len <= cap && cap <= block.capacity_for::<T>());
        self.block = block;
        self.len = len;
        self.cap = cap;
    }

    pub(crate) fn into_raw_parts(self) -> (Block, usize, A) {
        let mut this = ManuallyDrop::new(self);
        let block = std::mem::take(&mut this.block);
        // SAFETY: `this` is never used or dropped after the allocator is read
        // out of it.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (block, this.len, alloc)
    }
}

/// Writes values into a freshly allocated block. If dropped before
/// [`finish`](BlockFill::finish), the written values are dropped and the
/// block is released.
struct BlockFill<'a, T, A: BlockAllocator> {
    alloc: &'a A,
    block: Option<Block>,
    written: usize,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<'a, T, A: BlockAllocator> BlockFill<'a, T, A> {
    fn new(alloc: &'a A, capacity: usize, alignment: usize) -> Result<Self> {
        let block = alloc.allocate_for::<T>(capacity, alignment)?;
        Ok(BlockFill {
            alloc,
            block: Some(block),
            written: 0,
            capacity,
            _marker: PhantomData,
        })
    }

    fn push(&mut self, value: T) {
        assert!(self.written < self.capacity);
        if let Some(block) = &self.block {
            // SAFETY: `written < capacity` slots of the block are in use.
            unsafe { block.cast::<T>().as_ptr().add(self.written).write(value) };
            self.written += 1;
        }
    }

    fn finish(mut self) -> Block {
        debug_assert_eq!(self.written, self.capacity);
        self.block.take().unwrap_or_default()
    }
}

impl<T, A: BlockAllocator> Drop for BlockFill<'_, T, A> {
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            // SAFETY: exactly `written` values were written to the block,
            // which came from `alloc`.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    block.cast::<T>().as_ptr(),
                    self.written,
                ));
                self.alloc.release(block);
            }
        }
    }
}

/// Reports a fatal allocation failure from a context that cannot return an
/// error.
#[cold]
fn alloc_failure<T>(err: Error, count: usize, alignment: usize) -> ! {
    if !err.is_allocation_failure() {
        panic!("{err}");
    }
    let layout = std::mem::size_of::<T>()
        .checked_mul(count)
        .and_then(|size| Layout::from_size_align(size, alignment).ok());
    match layout {
        Some(layout) => std::alloc::handle_alloc_error(layout),
        None => panic!("{err}"),
    }
}

impl<T, A: BlockAllocator> Drop for Array<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: BlockAllocator + Clone> Clone for Array<T, A> {
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|e| alloc_failure::<T>(e, self.len, self.alignment))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.assign_from(source) {
            alloc_failure::<T>(e, source.len, self.alignment)
        }
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(vec: Vec<T>) -> Self {
        let len = vec.len();
        Array::from_vec(vec)
            .unwrap_or_else(|e| alloc_failure::<T>(e, len, std::mem::align_of::<T>()))
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        Array::from(Vec::from(values))
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, A: BlockAllocator> IntoIterator for Array<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (block, len, alloc) = self.into_raw_parts();
        IntoIter::new(block, len, alloc)
    }
}

impl<'a, T, A: BlockAllocator> IntoIterator for &'a Array<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: BlockAllocator> IntoIterator for &'a mut Array<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: BlockAllocator> Index<isize> for Array<T, A> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` does not resolve to an element.
    fn index(&self, index: isize) -> &T {
        self.at(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, A: BlockAllocator> IndexMut<isize> for Array<T, A> {
    fn index_mut(&mut self, index: isize) -> &mut T {
        self.at_mut(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, A: BlockAllocator> AsRef<[T]> for Array<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: BlockAllocator> AsMut<[T]> for Array<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, U, A, B> PartialEq<Array<U, B>> for Array<T, A>
where
    T: PartialEq<U>,
    A: BlockAllocator,
    B: BlockAllocator,
{
    fn eq(&self, other: &Array<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: BlockAllocator> Eq for Array<T, A> {}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<[U]> for Array<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<&[U]> for Array<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator, const N: usize> PartialEq<[U; N]> for Array<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: BlockAllocator> PartialEq<Vec<U>> for Array<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: std::hash::Hash, A: BlockAllocator> std::hash::Hash for Array<T, A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T: std::fmt::Debug, A: BlockAllocator> std::fmt::Debug for Array<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
