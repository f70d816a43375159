//! `StaticArray`: a fixed-length inline array with the same signed indexing
//! as [`Array`](crate::Array).

use std::ops::{Index, IndexMut};

use blockarray_common::{Error, Result, verify_arg};

use crate::index::resolve_index;

/// `N` values of `T` stored inline. The length never changes and no
/// allocator is involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticArray<T, const N: usize> {
    values: [T; N],
}

impl<T: Default, const N: usize> StaticArray<T, N> {
    /// Creates an array of `N` default values.
    pub fn new() -> Self {
        StaticArray {
            values: std::array::from_fn(|_| T::default()),
        }
    }

    /// Creates an array from the leading `values`; slots past `values.len()`
    /// hold `T::default()`.
    ///
    /// Fails if `values` has more than `N` elements.
    pub fn from_slice(values: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        verify_arg!(values, values.len() <= N);
        Ok(StaticArray {
            values: std::array::from_fn(|i| values.get(i).cloned().unwrap_or_default()),
        })
    }

    /// Moves the values out, leaving defaults behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<T, const N: usize> StaticArray<T, N> {
    pub const fn from_array(values: [T; N]) -> Self {
        StaticArray { values }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub const fn type_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    pub fn get(&self, index: isize) -> Option<&T> {
        resolve_index(index, N).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        resolve_index(index, N).map(|i| &mut self.values[i])
    }

    /// Element at `index`; negative indices count from the back.
    pub fn at(&self, index: isize) -> Result<&T> {
        self.get(index).ok_or_else(|| Error::out_of_bounds(index, N))
    }

    pub fn at_mut(&mut self, index: isize) -> Result<&mut T> {
        self.get_mut(index)
            .ok_or_else(|| Error::out_of_bounds(index, N))
    }

    /// Sets every element to a clone of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.values.fill(value);
    }

    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values.iter().position(|v| v == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn into_inner(self) -> [T; N] {
        self.values
    }
}

impl<T: Default, const N: usize> Default for StaticArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for StaticArray<T, N> {
    fn from(values: [T; N]) -> Self {
        Self::from_array(values)
    }
}

impl<T, const N: usize> Index<isize> for StaticArray<T, N> {
    type Output = T;

    fn index(&self, index: isize) -> &T {
        self.at(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, const N: usize> IndexMut<isize> for StaticArray<T, N> {
    fn index_mut(&mut self, index: isize) -> &mut T {
        self.at_mut(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, const N: usize> AsRef<[T]> for StaticArray<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.values
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticArray<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T, const N: usize> IntoIterator for StaticArray<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_default_filled() {
        let a = StaticArray::<u32, 4>::new();
        assert_eq!(a.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(a.len(), 4);
        assert_eq!(a.type_size(), 4);
    }

    #[test]
    fn test_from_slice() {
        let a = StaticArray::<i32, 4>::from_slice(&[1, 2]).unwrap();
        assert_eq!(a.into_inner(), [1, 2, 0, 0]);
        assert!(StaticArray::<i32, 2>::from_slice(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_signed_indexing() {
        let mut a = StaticArray::from_array([10, 20, 30]);
        assert_eq!(a[-1], 30);
        assert_eq!(a[0], 10);
        a[-3] = 11;
        assert_eq!(*a.at(0).unwrap(), 11);
        assert!(a.at(3).is_err());
        assert!(a.at(-4).is_err());
        assert_eq!(a.find(&20), Some(1));
    }

    #[test]
    fn test_fill_and_take() {
        let mut a = StaticArray::<String, 2>::new();
        a.fill(String::from("x"));
        let b = a.take();
        assert_eq!(b.as_slice(), &["x", "x"]);
        assert_eq!(a.as_slice(), &["", ""]);
    }

    #[test]
    fn test_zero_length() {
        let a = StaticArray::<u8, 0>::new();
        assert!(a.is_empty());
        assert!(a.at(0).is_err());
        assert_eq!(a.iter().count(), 0);
    }
}
