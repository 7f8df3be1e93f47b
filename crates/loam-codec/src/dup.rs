//! String-array duplication into a region.
//!
//! All three variants size their output up front: one byte-storage
//! allocation, one token-array allocation, one linear fill — never an
//! intermediate reallocation.

use loam_region::Region;

/// Deep-copy every string and the array itself into the region.
pub fn dup_strs<'r>(region: &'r Region<'_>, items: &[&str]) -> &'r [&'r str] {
    let total: usize = items.iter().map(|s| s.len()).sum();
    let storage = region.alloc_unaligned(total);
    let mut offset = 0;
    for s in items {
        storage[offset..offset + s.len()].copy_from_slice(s.as_bytes());
        offset += s.len();
    }

    let storage = &*storage;
    let tokens = region.alloc_slice_fill(items.len(), "");
    let mut offset = 0;
    for (slot, s) in tokens.iter_mut().zip(items) {
        let end = offset + s.len();
        *slot = std::str::from_utf8(&storage[offset..end])
            .expect("verbatim copies of strings are UTF-8");
        offset = end;
    }
    tokens
}

/// Deep-copy the first `items.len()` entries, preserving `None` holes.
pub fn dup_opt_strs<'r>(
    region: &'r Region<'_>,
    items: &[Option<&str>],
) -> &'r [Option<&'r str>] {
    let total: usize = items.iter().flatten().map(|s| s.len()).sum();
    let storage = region.alloc_unaligned(total);
    let mut offset = 0;
    for s in items.iter().flatten() {
        storage[offset..offset + s.len()].copy_from_slice(s.as_bytes());
        offset += s.len();
    }

    let storage = &*storage;
    let tokens = region.alloc_slice_fill(items.len(), None);
    let mut offset = 0;
    for (slot, item) in tokens.iter_mut().zip(items) {
        if let Some(s) = item {
            let end = offset + s.len();
            *slot = Some(
                std::str::from_utf8(&storage[offset..end])
                    .expect("verbatim copies of strings are UTF-8"),
            );
            offset = end;
        }
    }
    tokens
}

/// Shallow-copy only the reference array into the region.
///
/// The strings themselves are not copied, so they must outlive the region
/// borrow — which the signature enforces.
pub fn dup_str_refs<'r>(region: &'r Region<'_>, items: &[&'r str]) -> &'r [&'r str] {
    region.alloc_slice_copy(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dup_strs_deep_copies() {
        let region = Region::new(256);
        let copy = dup_strs(&region, &["a", "bb"]);
        assert_eq!(copy, &["a", "bb"]);
        // Deep: the copied bytes live in the region, not the originals.
        let original = "a";
        assert_ne!(copy[0].as_ptr(), original.as_ptr());
    }

    #[test]
    fn dup_strs_of_empty_array_is_empty() {
        let region = Region::new(64);
        assert!(dup_strs(&region, &[]).is_empty());
    }

    #[test]
    fn dup_opt_strs_preserves_holes() {
        let region = Region::new(256);
        let copy = dup_opt_strs(&region, &[Some("x"), None, Some("y"), None]);
        assert_eq!(copy, &[Some("x"), None, Some("y"), None]);
    }

    #[test]
    fn dup_str_refs_is_shallow() {
        let region = Region::new(256);
        let a = "x";
        let b = "y";
        let copy = dup_str_refs(&region, &[a, b]);
        assert_eq!(copy, &["x", "y"]);
        // Shallow: same string storage, new array.
        assert_eq!(copy[0].as_ptr(), a.as_ptr());
        assert_eq!(copy[1].as_ptr(), b.as_ptr());
    }

    #[test]
    fn copies_survive_later_region_use() {
        let region = Region::new(64);
        let copy = dup_strs(&region, &["keep", "these"]);
        for _ in 0..16 {
            region.alloc(64);
        }
        assert_eq!(copy, &["keep", "these"]);
    }
}
