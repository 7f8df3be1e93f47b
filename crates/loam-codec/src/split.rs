//! Delimiter-based tokenizing over region-owned copies.
//!
//! Every splitter duplicates its input into the region and returns a
//! region-allocated token array of subslices, so the tokens live exactly
//! as long as the region. Empty segments are preserved by the plain
//! variants and compacted away by the `_non_empty` ones; the escape-aware
//! variants additionally honour an escape byte and strip it in the same
//! pass.
//!
//! Delimiters and escapes must be ASCII so splitting can never fracture a
//! multi-byte character.

use std::fmt;

use smallvec::SmallVec;

use loam_region::Region;

/// Split `input` on `delim`, preserving empty segments.
///
/// `"a,b,,c,"` on `,` yields `["a", "b", "", "c", ""]`; the empty string
/// yields `[""]`. Joining the tokens with the delimiter reproduces the
/// input exactly.
pub fn split<'r>(region: &'r Region<'_>, delim: u8, input: &str) -> &'r [&'r str] {
    let owned = region.dup_str(input);
    split_owned(region, delim, owned)
}

/// Split `input` on `delim`, dropping empty segments.
pub fn split_non_empty<'r>(region: &'r Region<'_>, delim: u8, input: &str) -> &'r [&'r str] {
    let owned = region.dup_str(input);
    compact(split_owned(region, delim, owned))
}

/// Render `args` into the region, then split like [`split`].
pub fn split_fmt<'r>(
    region: &'r Region<'_>,
    delim: u8,
    args: fmt::Arguments<'_>,
) -> &'r [&'r str] {
    let owned = region.format(args);
    split_owned(region, delim, owned)
}

/// Render `args` into the region, then split like [`split_non_empty`].
pub fn split_non_empty_fmt<'r>(
    region: &'r Region<'_>,
    delim: u8,
    args: fmt::Arguments<'_>,
) -> &'r [&'r str] {
    let owned = region.format(args);
    compact(split_owned(region, delim, owned))
}

/// Split on `delim`, treating `escape` followed by any byte as that byte
/// taken literally. The escape byte itself is removed from the tokens.
///
/// `a\,b,c\\,d\,\,e` on `,` with escape `\` yields
/// `["a,b", "c\\", "d,,e"]`.
pub fn split_escaped<'r>(
    region: &'r Region<'_>,
    delim: u8,
    escape: u8,
    input: &str,
) -> &'r [&'r str] {
    split_escaped_owned(region, delim, escape, input)
}

/// Like [`split_escaped`], dropping empty segments after the fact.
pub fn split_escaped_non_empty<'r>(
    region: &'r Region<'_>,
    delim: u8,
    escape: u8,
    input: &str,
) -> &'r [&'r str] {
    compact(split_escaped_owned(region, delim, escape, input))
}

/// Render `args` into the region, then split like [`split_escaped`].
pub fn split_escaped_fmt<'r>(
    region: &'r Region<'_>,
    delim: u8,
    escape: u8,
    args: fmt::Arguments<'_>,
) -> &'r [&'r str] {
    let rendered = region.format(args);
    split_escaped_owned(region, delim, escape, rendered)
}

/// Render `args` into the region, then split like
/// [`split_escaped_non_empty`].
pub fn split_escaped_non_empty_fmt<'r>(
    region: &'r Region<'_>,
    delim: u8,
    escape: u8,
    args: fmt::Arguments<'_>,
) -> &'r [&'r str] {
    let rendered = region.format(args);
    compact(split_escaped_owned(region, delim, escape, rendered))
}

/// Split a region-owned string without copying it again.
fn split_owned<'r>(region: &'r Region<'_>, delim: u8, owned: &'r str) -> &'r mut [&'r str] {
    debug_assert!(delim.is_ascii(), "delimiters must be ASCII");
    let count = owned.bytes().filter(|&b| b == delim).count() + 1;
    let tokens = region.alloc_slice_fill(count, "");
    for (slot, token) in tokens.iter_mut().zip(owned.split(delim as char)) {
        *slot = token;
    }
    tokens
}

fn split_escaped_owned<'r>(
    region: &'r Region<'_>,
    delim: u8,
    escape: u8,
    input: &str,
) -> &'r mut [&'r str] {
    debug_assert!(delim.is_ascii(), "delimiters must be ASCII");
    debug_assert!(escape.is_ascii(), "escapes must be ASCII");

    // Work on a region-owned copy: escape removal compacts in place.
    let bytes = region.dup_unaligned(input.as_bytes());

    // First pass: count segments, honouring escapes.
    let mut count = 1usize;
    let mut escaped = false;
    for &b in bytes.iter() {
        if escaped {
            escaped = false;
        } else if b == escape {
            escaped = true;
        } else if b == delim {
            count += 1;
        }
    }

    // Second pass: strip escapes and record each segment's extent within
    // the compacted bytes. Compaction only ever moves bytes backward, so
    // recorded ranges stay valid.
    let mut ranges: SmallVec<[(usize, usize); 8]> = SmallVec::with_capacity(count);
    let mut write = 0usize;
    let mut seg_start = 0usize;
    let mut escaped = false;
    for read in 0..bytes.len() {
        let b = bytes[read];
        if escaped {
            escaped = false;
            bytes[write] = b;
            write += 1;
        } else if b == escape {
            escaped = true;
        } else if b == delim {
            ranges.push((seg_start, write));
            seg_start = write;
        } else {
            bytes[write] = b;
            write += 1;
        }
    }
    ranges.push((seg_start, write));
    debug_assert_eq!(ranges.len(), count);

    let bytes = &*bytes;
    let tokens = region.alloc_slice_fill(count, "");
    for (slot, &(start, end)) in tokens.iter_mut().zip(ranges.iter()) {
        *slot = std::str::from_utf8(&bytes[start..end])
            .expect("stripping ASCII escapes preserves UTF-8");
    }
    tokens
}

/// Shift non-empty tokens to the front, returning the kept prefix.
fn compact<'r>(tokens: &'r mut [&'r str]) -> &'r [&'r str] {
    let mut kept = 0;
    for i in 0..tokens.len() {
        if !tokens[i].is_empty() {
            tokens[kept] = tokens[i];
            kept += 1;
        }
    }
    &tokens[..kept]
}
