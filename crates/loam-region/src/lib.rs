//! Bump-allocated memory regions with bulk reclamation.
//!
//! A [`Region`] turns many short-lived allocations with a shared lifetime
//! into pointer bumps over a chain of blocks, reclaimed all at once by
//! [`Region::clear`], a [`Marker`] restore, or drop. This crate is the one
//! loam crate that may contain `unsafe` code, and all of it lives in
//! `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! Region
//! ├── SmallVec<Block>   (oldest first; the last block is "current")
//! │   └── Block         (zero-initialised storage; owned or carved)
//! ├── cursor            (byte offset into the current block)
//! ├── used / min_growth (footprint counter, growth floor)
//! └── parent            (Some(&Region) for sub-regions)
//! ```
//!
//! # Ownership and invalidation
//!
//! Spans are handed out through `&self`, so any number of live allocations
//! may coexist. Bulk reclamation (`clear`, `restore`) takes `&mut self`,
//! which means the borrow checker refuses to compile a use-after-reclaim
//! instead of leaving it undefined. A sub-region borrows its parent for
//! its whole lifetime, so the parent cannot be cleared out from under it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod block;
pub mod config;
mod dup;
#[allow(unsafe_code)]
mod raw;
pub mod region;

pub use config::RegionConfig;
pub use region::{Marker, Region};
