//! Core helpers and traits shared by the loam allocators.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! word-alignment arithmetic used by both the region allocator and the
//! terminated buffer, and the [`Describe`] hook through which an optional
//! diagnostic collaborator can ask any loam object for a one-line summary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod describe;

pub use align::{align_up, WORD_SIZE};
pub use describe::Describe;
