//! Word-size and alignment arithmetic.
//!
//! Bump allocation hands out word-aligned spans by default; the buffer's
//! aligned reserve pads to an 8-byte boundary. Both reduce to [`align_up`].

/// Default allocation alignment: the platform word size in bytes.
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Round `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. The result equals `value` when it is
/// already aligned.
///
/// # Panics
///
/// Debug builds panic when `alignment` is not a power of two.
#[inline]
pub fn align_up(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}
