//! The crate's only unsafe code: block storage and span handout.
//!
//! Everything here is `pub(crate)` and safe to *call* only because the
//! region upholds the contracts stated on each function:
//!
//! - a byte range of a live block is carved into a span at most once
//!   between bulk reclamations, and reclamation requires `&mut Region`,
//!   so no span outlives the storage behind it;
//! - block storage is allocated zeroed, so a carved span never exposes
//!   uninitialised memory (stale bytes after a reclamation are garbage,
//!   not undefined);
//! - owned blocks are released exactly once, by [`release_block`].
//!
//! Keeping the raw-pointer arithmetic in one module keeps the rest of the
//! crate `#![deny(unsafe_code)]`-clean.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use loam_core::WORD_SIZE;

use crate::block::Block;

/// Layout for a block of `capacity` bytes, word-aligned.
///
/// # Panics
///
/// Panics when `capacity` overflows the maximum layout size. Allocation
/// failure is not recoverable anywhere in loam, and neither is a request
/// the allocator could never satisfy.
fn block_layout(capacity: usize) -> Layout {
    match Layout::from_size_align(capacity, WORD_SIZE) {
        Ok(layout) => layout,
        Err(_) => panic!("region block of {capacity} bytes exceeds the maximum allocation size"),
    }
}

/// Obtain `capacity` zeroed bytes from the system allocator.
///
/// Aborts the process when the allocator cannot satisfy the request; a
/// region is infallible from its callers' point of view.
pub(crate) fn alloc_zeroed_block(capacity: usize) -> NonNull<u8> {
    debug_assert!(capacity > 0);
    let layout = block_layout(capacity);
    // SAFETY: layout has non-zero size.
    let ptr = unsafe { alloc::alloc_zeroed(layout) };
    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => alloc::handle_alloc_error(layout),
    }
}

/// Return a block's storage to the system allocator.
///
/// Carved blocks belong to a parent region and are abandoned, not
/// released. Contract: no span carved from `block` is still reachable.
pub(crate) fn release_block(block: Block) {
    if block.owned {
        // SAFETY: `ptr` came from `alloc_zeroed_block` with this exact
        // capacity, and the caller guarantees no outstanding spans.
        unsafe { alloc::dealloc(block.ptr.as_ptr(), block_layout(block.capacity)) };
    }
}

/// Carve the byte range `[offset, offset + len)` of a block into a span.
///
/// Contract: the range lies within the block's capacity, the block stays
/// live for `'a`, and the same range is never carved twice between bulk
/// reclamations.
pub(crate) fn carve_span<'a>(base: NonNull<u8>, offset: usize, len: usize) -> &'a mut [u8] {
    debug_assert!(len > 0);
    // SAFETY: in-bounds offset into a live allocation (caller contract);
    // the resulting span is disjoint from every other carved span and the
    // storage was zero-initialised.
    unsafe { std::slice::from_raw_parts_mut(base.as_ptr().add(offset), len) }
}

/// Reinterpret bytes copied from a `str` as a `str`.
///
/// Contract: `bytes` was copied verbatim from valid UTF-8.
pub(crate) fn assume_utf8(bytes: &[u8]) -> &str {
    debug_assert!(std::str::from_utf8(bytes).is_ok());
    // SAFETY: caller contract — the bytes are a verbatim copy of a `str`.
    unsafe { std::str::from_utf8_unchecked(bytes) }
}

/// Copy `src` into `span` and reinterpret it as a typed slice.
///
/// Contract: `span` is `size_of_val(src)` bytes and aligned for `T`.
pub(crate) fn fill_copied<'a, T: Copy>(span: &'a mut [u8], src: &[T]) -> &'a mut [T] {
    debug_assert_eq!(span.len(), std::mem::size_of_val(src));
    debug_assert_eq!(span.as_ptr() as usize % std::mem::align_of::<T>(), 0);
    let dst = span.as_mut_ptr().cast::<T>();
    // SAFETY: `dst` is aligned and sized for `src.len()` elements (caller
    // contract), the ranges cannot overlap (the span was just carved from
    // free region space), and `T: Copy` so a bitwise copy is a valid value.
    unsafe {
        std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
        std::slice::from_raw_parts_mut(dst, src.len())
    }
}

/// Fill `span` with `len` copies of `value` and reinterpret it.
///
/// Contract: `span` is `len * size_of::<T>()` bytes and aligned for `T`.
pub(crate) fn fill_value<'a, T: Copy>(span: &'a mut [u8], len: usize, value: T) -> &'a mut [T] {
    debug_assert_eq!(span.len(), len * std::mem::size_of::<T>());
    debug_assert_eq!(span.as_ptr() as usize % std::mem::align_of::<T>(), 0);
    let dst = span.as_mut_ptr().cast::<T>();
    // SAFETY: as in `fill_copied`; every slot is written before the slice
    // is formed.
    unsafe {
        for i in 0..len {
            dst.add(i).write(value);
        }
        std::slice::from_raw_parts_mut(dst, len)
    }
}
