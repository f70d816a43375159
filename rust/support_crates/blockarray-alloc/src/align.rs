/// Aligns a number up to the next multiple of the specified alignment.
///
/// If the input is already aligned, it is returned unchanged.
///
/// # Examples
///
/// ```
/// use blockarray_alloc::align::align_up;
///
/// assert_eq!(align_up(0, 8), Some(0));
/// assert_eq!(align_up(1, 8), Some(8));
/// assert_eq!(align_up(8, 8), Some(8));
/// assert_eq!(align_up(9, 8), Some(16));
/// ```
///
/// Returns `None` if the rounded value does not fit in `usize`.
///
/// # Panics
///
/// Panics in debug builds if `alignment` is not a non-zero power of two.
#[inline]
pub fn align_up(n: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    Some(n.checked_add(alignment - 1)? & !(alignment - 1))
}

/// Checks if a number is a multiple of the specified alignment.
///
/// ```
/// use blockarray_alloc::align::is_aligned;
///
/// assert!(is_aligned(0, 8));
/// assert!(!is_aligned(7, 8));
/// assert!(is_aligned(16, 8));
/// ```
#[inline]
pub fn is_aligned(n: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    (n & (alignment - 1)) == 0
}

/// Checks if a pointer address satisfies the specified alignment.
///
/// Unlike [`is_aligned`], a non power-of-two alignment simply yields `false`.
#[inline]
pub fn is_aligned_ptr<T>(ptr: *const T, alignment: usize) -> bool {
    alignment.is_power_of_two() && (ptr.addr() & (alignment - 1)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 64), Some(0));
        assert_eq!(align_up(1, 64), Some(64));
        assert_eq!(align_up(63, 64), Some(64));
        assert_eq!(align_up(65, 64), Some(128));
        assert_eq!(align_up(usize::MAX, 2), None);
    }

    #[test]
    fn test_is_aligned_ptr() {
        assert!(is_aligned_ptr(64 as *const u8, 64));
        assert!(!is_aligned_ptr(65 as *const u8, 64));
        assert!(!is_aligned_ptr(64 as *const u8, 48));
    }
}
