//! Block descriptors.
//!
//! A block is one contiguous chunk of zero-initialised backing storage.
//! The region keeps blocks as plain descriptors in a growable list; the
//! storage itself never moves, so spans handed out from a block stay valid
//! while the list reallocates.

use std::ptr::NonNull;

/// Descriptor for one contiguous chunk of region storage.
///
/// `owned` blocks were obtained from the system allocator and must be
/// returned to it; carved blocks live inside a parent region and are
/// simply abandoned when this region lets go of them. Release goes through
/// [`raw::release_block`](crate::raw::release_block) — `Block` has no drop
/// glue of its own.
pub(crate) struct Block {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) capacity: usize,
    pub(crate) owned: bool,
}

impl Block {
    /// Descriptor for storage obtained from the system allocator.
    pub(crate) fn owned(ptr: NonNull<u8>, capacity: usize) -> Self {
        Self {
            ptr,
            capacity,
            owned: true,
        }
    }

    /// Descriptor for storage carved out of a parent region.
    pub(crate) fn carved(ptr: NonNull<u8>, capacity: usize) -> Self {
        Self {
            ptr,
            capacity,
            owned: false,
        }
    }
}
