//! Loam: region allocation and always-terminated buffers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all loam sub-crates. For most users, adding `loam` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! // A region turns many short-lived allocations into pointer bumps,
//! // reclaimed in bulk.
//! let region = Region::new(1024);
//! let greeting = region.dup_str("hello");
//! let line = region.format(format_args!("{greeting}, region"));
//! assert_eq!(line, "hello, region");
//!
//! // Buffers keep a terminator after every operation and may borrow
//! // their storage from a region.
//! let mut buffer = Buffer::in_region(&region, 16);
//! buffer.append_str("a,b,,c,");
//! assert_eq!(buffer.as_bytes_with_nul().last(), Some(&0));
//!
//! // Tokenizing and base64 allocate their results from the region too.
//! let text = std::str::from_utf8(buffer.as_bytes()).unwrap();
//! let tokens = loam::codec::split(&region, b',', text);
//! assert_eq!(tokens, &["a", "b", "", "c", ""]);
//!
//! let encoded = loam::codec::base64_encode(&region, b"loam");
//! assert_eq!(encoded, "bG9hbQ==");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`region`] | `loam-region` | [`Region`], [`Marker`], [`RegionConfig`] |
//! | [`buffer`] | `loam-buffer` | [`Buffer`], [`Detached`] |
//! | [`codec`] | `loam-codec` | splitting, base64, array duplication |
//! | [`base`] | `loam-core` | [`Describe`], alignment helpers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use loam_buffer as buffer;
pub use loam_codec as codec;
pub use loam_core as base;
pub use loam_region as region;

pub use loam_buffer::{Buffer, Detached};
pub use loam_core::Describe;
pub use loam_region::{Marker, Region, RegionConfig};

/// The most common imports in one place.
pub mod prelude {
    pub use loam_buffer::{Buffer, Detached};
    pub use loam_codec::CodecError;
    pub use loam_core::Describe;
    pub use loam_region::{Marker, Region, RegionConfig};
}
