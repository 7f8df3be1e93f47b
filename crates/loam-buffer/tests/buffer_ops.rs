use loam_buffer::{Buffer, Detached};
use loam_region::Region;

#[test]
fn region_backed_buffer_grows_inside_the_region() {
    let region = Region::new(256);
    let mut buffer = Buffer::in_region(&region, 8);
    assert!(buffer.is_region_backed());

    for _ in 0..50 {
        buffer.append_str("abcdefghij");
    }
    assert_eq!(buffer.len(), 500);
    assert_eq!(&buffer.as_bytes()[..10], b"abcdefghij");

    // The region absorbed every growth step.
    assert!(region.used() > 256);
}

#[test]
fn region_backed_reset_ignores_the_shrink_request() {
    let region = Region::new(256);
    let mut buffer = Buffer::in_region(&region, 8);
    for _ in 0..50 {
        buffer.append_str("abcdefghij");
    }
    let capacity = buffer.capacity();

    buffer.reset(16);
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), capacity);

    buffer.append_str("ok");
    assert_eq!(buffer.as_bytes(), b"ok");
}

#[test]
fn detach_region_backed_storage_stays_region_owned() {
    let region = Region::new(512);
    let mut buffer = Buffer::in_region(&region, 32);
    buffer.append_str("pool");

    let detached = buffer.detach();
    assert_eq!(detached.len(), 4);
    assert_eq!(detached.bytes(), b"pool");
    assert!(matches!(detached, Detached::Region { .. }));

    // The handle reuses the region for new storage.
    buffer.append_str("again");
    assert_eq!(buffer.as_bytes(), b"again");
    assert!(buffer.is_region_backed());
}

#[test]
fn detached_heap_storage_outlives_the_handle() {
    let mut buffer = Buffer::new(0);
    buffer.append_str("world");
    let detached = buffer.detach();
    drop(buffer);

    match detached {
        Detached::Heap { data, len } => {
            assert_eq!(&data[..len], b"world");
            assert_eq!(data[len], 0);
        }
        Detached::Region { .. } => panic!("heap buffer must detach heap storage"),
    }
}

#[test]
fn grow_and_shrink_cycles_stay_consistent() {
    let mut buffer = Buffer::new(1);
    for i in 0..100usize {
        buffer.append_repeated(b'A' + (i % 26) as u8, (i % 20) + 1);
        buffer.shrink_by(i % 10);
        let with_nul = buffer.as_bytes_with_nul();
        assert_eq!(with_nul[buffer.len()], 0);
    }
    assert!(buffer.len() > 0);
}

#[test]
fn large_appends_accumulate() {
    let mut buffer = Buffer::new(8);
    let block = [b'Z'; 1024];
    for _ in 0..200 {
        buffer.append(&block);
    }
    assert_eq!(buffer.len(), 200 * 1024);
    assert!(buffer.as_bytes().iter().all(|&b| b == b'Z'));
}

#[test]
fn reserved_spans_between_formatted_appends() {
    let mut buffer = Buffer::new(4);
    buffer.set_fmt(format_args!("{}", "abcd"));
    buffer.append_fmt(format_args!("{}", ""));
    for _ in 0..6 {
        buffer.append_byte(b'X');
    }
    buffer.append_fmt(format_args!("-{}-{}", "grow", 123));
    let text = std::str::from_utf8(buffer.as_bytes()).unwrap();
    assert!(text.contains("grow"));
    assert_eq!(text, "abcdXXXXXX-grow-123");
}

#[test]
fn mixed_reserve_kinds_line_up() {
    let mut buffer = Buffer::new(1);
    buffer.reserve(3).copy_from_slice(b"abc");
    let aligned = buffer.reserve_aligned(5);
    aligned.copy_from_slice(b"ABCDE");
    assert_eq!(buffer.len() % 8, 5);
    assert_eq!(&buffer.as_bytes()[8..], b"ABCDE");
}
