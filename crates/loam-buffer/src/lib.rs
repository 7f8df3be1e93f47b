//! Growable, always-terminated byte buffers.
//!
//! A [`Buffer`] is a contiguous byte sequence that keeps one invariant
//! through every public operation: the byte just past the logical length
//! is zero, even when the content itself is arbitrary binary. Storage is
//! either owned heap memory or a span carved from a
//! [`Region`](loam_region::Region), and the two differ only where
//! ownership semantics force them to: growth, shrinking, and
//! [`Buffer::detach`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;

pub use buffer::{Buffer, Detached};
