//! Signed index resolution shared by the containers.

/// Resolves a possibly negative index against a container of length `len`.
///
/// A negative `index` counts from the back: `-1` is the last element and
/// `-(len as isize)` the first. Returns `None` when the index does not land
/// inside `[0, len)`.
///
/// ```
/// use blockarray::index::resolve_index;
///
/// assert_eq!(resolve_index(0, 5), Some(0));
/// assert_eq!(resolve_index(-1, 5), Some(4));
/// assert_eq!(resolve_index(-5, 5), Some(0));
/// assert_eq!(resolve_index(-6, 5), None);
/// assert_eq!(resolve_index(5, 5), None);
/// ```
#[inline]
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        let index = index as usize;
        (index < len).then_some(index)
    }
}
