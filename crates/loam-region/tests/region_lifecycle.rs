use loam_region::{Region, RegionConfig};

#[test]
fn mixed_allocation_kinds_coexist() {
    let region = Region::new(256);

    let counter = region.alloc_slice_fill(1, 0xDEAD_BEEFu32);
    assert_eq!(counter[0], 0xDEAD_BEEF);

    let unaligned = region.alloc_unaligned(3);
    unaligned.copy_from_slice(b"abc");

    let zeroed = region.alloc_zeroed(17);
    assert!(zeroed.iter().all(|&b| b == 0));

    let array = region.alloc_zeroed_array(10, 4);
    assert!(array.iter().all(|&b| b == 0));

    assert_eq!(unaligned, b"abc");
}

#[test]
fn save_restore_behaves_like_a_stack() {
    let mut region = Region::new(128);

    let marker = region.save();
    region.dup_str("temp-data");
    region.dup_str("more-temp");
    region.restore(marker);

    // New allocations reuse the same space without leaking.
    let fresh = region.dup_str("new-data");
    assert_eq!(fresh, "new-data");
    assert_eq!(region.block_count(), 1);
}

#[test]
fn nested_markers_restore_in_reverse_order() {
    let mut region = Region::new(128);

    let outer = region.save();
    region.alloc(48);
    let inner = region.save();
    region.alloc(48);

    region.restore(inner);
    let after_inner = region.used();
    region.restore(outer);
    assert!(region.used() < after_inner);
}

#[test]
fn clear_after_growth_returns_to_baseline() {
    let mut region = Region::new(128);

    for _ in 0..50 {
        region.alloc(64);
    }
    let used_before = region.used();

    region.clear();
    assert!(region.used() <= used_before);
    assert_eq!(region.block_count(), 1);

    let survivor = region.dup_str("ok");
    assert_eq!(survivor, "ok");
}

#[test]
fn subregion_lifecycle_leaves_parent_intact() {
    let root = Region::new(1024);
    let root_text = root.dup_str("root");

    {
        let mut sub = root.subregion(128);
        let sub_text = sub.dup_str("sub");
        assert_eq!(sub_text, "sub");

        sub.clear();
        let reused = sub.dup_str("sub-again");
        assert_eq!(reused, "sub-again");
    }

    assert_eq!(root_text, "root");
}

#[test]
fn growth_floor_is_configurable() {
    let region = Region::with_config(RegionConfig::new(64).with_min_growth(4096));
    region.alloc(64);
    region.alloc(1);
    assert_eq!(region.block_count(), 2);
    assert!(region.available() >= 4095);
}

#[test]
fn formatted_duplicates_match_std_formatting() {
    let region = Region::new(256);
    let a = region.format(format_args!("num={} {}", 9, "go"));
    assert_eq!(a, "num=9 go");
    let b = region.format(format_args!("v={} {}", 12, "ok"));
    assert_eq!(b, "v=12 ok");
    // Earlier results are untouched by later formatting.
    assert_eq!(a, "num=9 go");
}
