//! The region allocator: bump allocation over a growable block chain.
//!
//! A [`Region`] owns an ordered list of block descriptors, oldest first;
//! the last block is the one being filled. Allocation bumps a cursor within the
//! current block and grows the chain when the request does not fit.
//! Reclamation is bulk-only: [`Region::clear`], [`Region::restore`], or
//! drop. Individual spans are never released.
//!
//! Footprint accounting is deliberately coarse: `used()` is charged with
//! the first block at creation, with each allocation's padded size on the
//! in-block path, and with each new block's full capacity on growth. It
//! never decreases except through `clear`/`restore`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ptr::NonNull;

use smallvec::SmallVec;

use loam_core::{align_up, Describe, WORD_SIZE};

use crate::block::Block;
use crate::config::RegionConfig;
use crate::raw;

/// Saved allocation state of a [`Region`], for stack-style rollback.
///
/// Markers obey stack discipline: within one region, restore them in
/// reverse order of creation. Restoring an outer marker while an inner one
/// is unrestored implicitly discards the inner one. Out-of-order restores
/// are checked by `debug_assert` only.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Marker {
    block_index: usize,
    cursor: usize,
    used: usize,
}

/// A bump allocator over a chain of zero-initialised blocks.
///
/// Spans are handed out through `&self`, so any number of allocations may
/// be live at once; everything is reclaimed together by [`clear`],
/// [`restore`], or drop, each of which takes `&mut self` and therefore
/// cannot run while any span is still borrowed.
///
/// A standalone region is `Region<'static>`. A [`subregion`] borrows its
/// parent and draws every block from it; clearing or dropping the
/// sub-region abandons that storage without returning it — only the
/// parent's own reclamation gets it back.
///
/// [`clear`]: Region::clear
/// [`restore`]: Region::restore
/// [`subregion`]: Region::subregion
pub struct Region<'p> {
    blocks: RefCell<SmallVec<[Block; 4]>>,
    /// Byte offset into the current (last) block.
    cursor: Cell<usize>,
    used: Cell<usize>,
    min_growth: Cell<usize>,
    parent: Option<&'p Region<'p>>,
}

impl Region<'static> {
    /// Create a standalone region whose first block holds
    /// `initial_capacity` bytes (rounded up to a word multiple).
    ///
    /// # Panics
    ///
    /// Panics if `initial_capacity` is zero. Aborts if the system
    /// allocator cannot satisfy the request.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_config(RegionConfig::new(initial_capacity))
    }

    /// Create a standalone region from a validated [`RegionConfig`].
    ///
    /// # Panics
    ///
    /// Panics if the config's initial capacity or growth floor is zero.
    pub fn with_config(config: RegionConfig) -> Self {
        Region::from_parts(None, config)
    }
}

impl<'p> Region<'p> {
    fn from_parts(parent: Option<&'p Region<'p>>, config: RegionConfig) -> Region<'p> {
        assert!(
            config.initial_capacity > 0,
            "a region with no initial capacity makes no sense"
        );
        assert!(
            config.min_growth > 0,
            "a region with a zero growth floor makes no sense"
        );
        let capacity = align_up(config.initial_capacity, WORD_SIZE);
        let first = match parent {
            None => Block::owned(raw::alloc_zeroed_block(capacity), capacity),
            Some(parent) => {
                let span = parent.alloc(capacity);
                let ptr = NonNull::new(span.as_mut_ptr())
                    .expect("a non-empty span never has a null pointer");
                Block::carved(ptr, capacity)
            }
        };
        let mut blocks = SmallVec::new();
        blocks.push(first);
        Region {
            blocks: RefCell::new(blocks),
            cursor: Cell::new(0),
            used: Cell::new(capacity),
            min_growth: Cell::new(config.min_growth),
            parent,
        }
    }

    /// Create a region whose storage is carved entirely out of `self`.
    ///
    /// The sub-region's first block and every block it grows are drawn
    /// from this region's allocation path. Clearing or dropping the
    /// sub-region never returns that storage; it is reclaimed when `self`
    /// is cleared, restored past, or dropped.
    ///
    /// # Panics
    ///
    /// Panics if `initial_capacity` is zero.
    pub fn subregion(&self, initial_capacity: usize) -> Region<'_> {
        Region::from_parts(Some(self), RegionConfig::new(initial_capacity))
    }

    /// Word-aligned bump allocation of `len` bytes.
    ///
    /// The returned span's contents are unspecified (zero on first use of
    /// a block, stale after reclamation); use [`alloc_zeroed`] when a
    /// clean span matters. A zero-length request returns an empty slice
    /// without touching the cursor.
    ///
    /// [`alloc_zeroed`]: Region::alloc_zeroed
    pub fn alloc(&self, len: usize) -> &mut [u8] {
        self.alloc_aligned(WORD_SIZE, len)
    }

    /// Bump allocation with no alignment padding.
    pub fn alloc_unaligned(&self, len: usize) -> &mut [u8] {
        self.alloc_aligned(1, len)
    }

    /// Word-aligned allocation, zero-filled.
    pub fn alloc_zeroed(&self, len: usize) -> &mut [u8] {
        let span = self.alloc(len);
        span.fill(0);
        span
    }

    /// Zero-filled allocation for `count` items of `item_len` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `count * item_len` overflows.
    pub fn alloc_zeroed_array(&self, count: usize, item_len: usize) -> &mut [u8] {
        let total = match count.checked_mul(item_len) {
            Some(total) => total,
            None => panic!("array of {count} items of {item_len} bytes overflows"),
        };
        self.alloc_zeroed(total)
    }

    /// Bump allocation whose span starts on an `alignment`-byte boundary.
    ///
    /// When the current block cannot satisfy the request, the region grows
    /// by `len + alignment - 1` bytes (or the growth floor, whichever is
    /// larger) and re-aligns within the fresh block.
    ///
    /// # Panics
    ///
    /// Debug builds panic when `alignment` is not a power of two.
    pub fn alloc_aligned(&self, alignment: usize, len: usize) -> &mut [u8] {
        debug_assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two"
        );
        if len == 0 {
            return &mut [];
        }
        let (base, capacity) = self.current_block();
        let cursor = self.cursor.get();
        let addr = base.as_ptr() as usize + cursor;
        let padding = align_up(addr, alignment) - addr;
        let remaining = capacity - cursor;
        if padding <= remaining && len <= remaining - padding {
            self.cursor.set(cursor + padding + len);
            self.used.set(self.used.get() + padding + len);
            return raw::carve_span(base, cursor + padding, len);
        }
        self.grow_aligned(alignment, len)
    }

    /// Allocate as much of the current block's remaining capacity as
    /// possible, bounded to `[min, max]`.
    ///
    /// Whenever the current block can supply at least `min` bytes the
    /// request is satisfied from it without growing, even if that yields
    /// less than `max`. Otherwise the region grows by at least `min` and
    /// the span comes from the fresh block. The span is unaligned; its
    /// length tells the caller how much was granted.
    pub fn alloc_min_max(&self, min: usize, max: usize) -> &mut [u8] {
        let max = max.max(min);
        let (base, capacity) = self.current_block();
        let cursor = self.cursor.get();
        let remaining = capacity - cursor;
        if remaining >= min && remaining > 0 {
            let take = remaining.min(max);
            if take == 0 {
                return &mut [];
            }
            self.cursor.set(cursor + take);
            self.used.set(self.used.get() + take);
            return raw::carve_span(base, cursor, take);
        }
        if min == 0 {
            return &mut [];
        }
        let capacity = min.max(self.min_growth.get());
        let base = self.push_block(capacity);
        let take = capacity.min(max);
        self.cursor.set(take);
        raw::carve_span(base, 0, take)
    }

    /// Copy `src` into a region-allocated slice aligned for `T`.
    ///
    /// One allocation, one copy pass. `T` must not be zero-sized.
    pub fn alloc_slice_copy<'a, T: Copy>(&'a self, src: &[T]) -> &'a mut [T] {
        debug_assert!(std::mem::size_of::<T>() > 0);
        if src.is_empty() {
            return &mut [];
        }
        let span = self.alloc_aligned(std::mem::align_of::<T>(), std::mem::size_of_val(src));
        raw::fill_copied(span, src)
    }

    /// Allocate a region-backed slice of `len` copies of `value`.
    ///
    /// `T` must not be zero-sized.
    ///
    /// # Panics
    ///
    /// Panics if the slice's byte size overflows.
    pub fn alloc_slice_fill<T: Copy>(&self, len: usize, value: T) -> &mut [T] {
        debug_assert!(std::mem::size_of::<T>() > 0);
        if len == 0 {
            return &mut [];
        }
        let bytes = match len.checked_mul(std::mem::size_of::<T>()) {
            Some(bytes) => bytes,
            None => panic!("slice of {len} items overflows"),
        };
        let span = self.alloc_aligned(std::mem::align_of::<T>(), bytes);
        raw::fill_value(span, len, value)
    }

    /// Snapshot the current allocation state.
    pub fn save(&self) -> Marker {
        Marker {
            block_index: self.blocks.borrow().len() - 1,
            cursor: self.cursor.get(),
            used: self.used.get(),
        }
    }

    /// Roll back to a previously saved [`Marker`].
    ///
    /// Every block created after the marker is released to the system
    /// allocator (abandoned, for a sub-region), and the cursor and
    /// footprint return to their snapshot values. Spans handed out after
    /// the save cannot still be borrowed — this method takes `&mut self`.
    pub fn restore(&mut self, marker: Marker) {
        let blocks = self.blocks.get_mut();
        debug_assert!(
            marker.block_index < blocks.len(),
            "marker must reference a live block"
        );
        debug_assert!(
            marker.block_index + 1 < blocks.len() || marker.cursor <= self.cursor.get(),
            "markers must be restored newest-first"
        );
        for block in blocks.drain(marker.block_index + 1..) {
            raw::release_block(block);
        }
        self.cursor.set(marker.cursor);
        self.used.set(marker.used);
    }

    /// Reclaim everything, returning to the post-creation state.
    ///
    /// All blocks but the first are released (abandoned, for a
    /// sub-region); the first block is kept and the cursor reset to its
    /// start.
    pub fn clear(&mut self) {
        let blocks = self.blocks.get_mut();
        for block in blocks.drain(1..) {
            raw::release_block(block);
        }
        let first_capacity = blocks[0].capacity;
        self.cursor.set(0);
        self.used.set(first_capacity);
    }

    /// Footprint counter: bytes drawn plus per-allocation charges.
    ///
    /// Monotonically non-decreasing between reclamations; reset by
    /// [`clear`](Region::clear) and [`restore`](Region::restore).
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Bytes immediately available in the current block without growth.
    pub fn available(&self) -> usize {
        let (_, capacity) = self.current_block();
        capacity - self.cursor.get()
    }

    /// Number of live blocks in the chain.
    pub fn block_count(&self) -> usize {
        self.blocks.borrow().len()
    }

    /// The growth floor: minimum capacity of any block added by growth.
    pub fn min_growth(&self) -> usize {
        self.min_growth.get()
    }

    /// Adjust the growth floor.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn set_min_growth(&self, size: usize) {
        assert!(size > 0, "a zero growth floor makes no sense");
        self.min_growth.set(size);
    }

    /// Whether this region's storage is carved from a parent region.
    pub fn is_subregion(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn current_block(&self) -> (NonNull<u8>, usize) {
        let blocks = self.blocks.borrow();
        let current = &blocks[blocks.len() - 1];
        (current.ptr, current.capacity)
    }

    pub(crate) fn cursor_offset(&self) -> usize {
        self.cursor.get()
    }

    /// Commit `len` bytes written directly into the current block's free
    /// tail (used by in-place formatting).
    pub(crate) fn commit_tail(&self, len: usize) {
        self.cursor.set(self.cursor.get() + len);
        self.used.set(self.used.get() + len);
    }

    fn grow_aligned(&self, alignment: usize, len: usize) -> &mut [u8] {
        let capacity = len.saturating_add(alignment - 1).max(self.min_growth.get());
        let base = self.push_block(capacity);
        let addr = base.as_ptr() as usize;
        let padding = align_up(addr, alignment) - addr;
        self.cursor.set(padding + len);
        raw::carve_span(base, padding, len)
    }

    /// Add a fresh block of exactly `capacity` bytes and make it current.
    ///
    /// Charges the footprint with the block's full capacity; the caller
    /// sets the cursor.
    fn push_block(&self, capacity: usize) -> NonNull<u8> {
        let block = match self.parent {
            None => Block::owned(raw::alloc_zeroed_block(capacity), capacity),
            Some(parent) => {
                let span = parent.alloc(capacity);
                let ptr = NonNull::new(span.as_mut_ptr())
                    .expect("a non-empty span never has a null pointer");
                Block::carved(ptr, capacity)
            }
        };
        let base = block.ptr;
        self.used.set(self.used.get() + capacity);
        self.blocks.borrow_mut().push(block);
        base
    }
}

impl Drop for Region<'_> {
    fn drop(&mut self) {
        for block in self.blocks.get_mut().drain(..) {
            raw::release_block(block);
        }
    }
}

impl fmt::Debug for Region<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("blocks", &self.block_count())
            .field("used", &self.used())
            .field("available", &self.available())
            .field("subregion", &self.is_subregion())
            .finish()
    }
}

impl Describe for Region<'_> {
    fn describe(&self, label: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "{label}: region blocks={} used={} available={}{}",
            self.block_count(),
            self.used(),
            self.available(),
            if self.is_subregion() {
                " (sub-region)"
            } else {
                ""
            }
        )
    }
}
