//! Region-allocated string helpers: tokenizing, base64, array duplication.
//!
//! Everything here is a free function over a caller-supplied
//! [`Region`](loam_region::Region); none of it keeps state. Results are
//! allocated from the region and live until it is reclaimed.
//!
//! Base64 decoding is the one operation in loam with a recoverable error
//! path — every other failure in the workspace is either a defined
//! degenerate result or fatal.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod base64;
pub mod dup;
pub mod error;
pub mod split;

pub use base64::{base64_decode, base64_encode};
pub use dup::{dup_opt_strs, dup_str_refs, dup_strs};
pub use error::CodecError;
pub use split::{
    split, split_escaped, split_escaped_fmt, split_escaped_non_empty,
    split_escaped_non_empty_fmt, split_fmt, split_non_empty, split_non_empty_fmt,
};
