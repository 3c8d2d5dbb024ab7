//! TZif decoding: a minimal UTC-only buffer, and the parser-rejection cases.

use meridian::Region;

/// Builds a version 2 TZif buffer with a single local time type and no
/// transitions — the "UTC sentinel" shape.
fn utc_only_tzif() -> Vec<u8> {
    let mut v1 = Vec::new();
    v1.extend_from_slice(b"TZif");
    v1.push(b'2');
    v1.extend_from_slice(&[0u8; 15]);
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&1u32.to_be_bytes());
    v1.extend_from_slice(&4u32.to_be_bytes());
    v1.extend_from_slice(&0i32.to_be_bytes());
    v1.push(0);
    v1.push(0);
    v1.extend_from_slice(b"UTC\0");

    let mut v2 = Vec::new();
    v2.extend_from_slice(b"TZif");
    v2.push(b'2');
    v2.extend_from_slice(&[0u8; 15]);
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&1u32.to_be_bytes());
    v2.extend_from_slice(&4u32.to_be_bytes());
    v2.extend_from_slice(&0i32.to_be_bytes());
    v2.push(0);
    v2.push(0);
    v2.extend_from_slice(b"UTC\0");

    let mut out = v1;
    out.extend_from_slice(&v2);
    out.extend_from_slice(b"\nUTC0\n");
    out
}

#[test]
fn utc_only_buffer_yields_utc_sentinel() {
    let region = Region::from_tzif(&utc_only_tzif(), "Etc/UTC").unwrap();
    assert!(region.records.is_empty());
    assert!(!region.rule.has_dst);
    assert_eq!(region.rule.std_offset, 0);

    let t = meridian::Time::from_unix(0).with_region(&region);
    assert_eq!(t.shortname(), "UTC");
    assert!(!t.is_dst());
}

#[test]
fn rejects_footer_beginning_with_colon() {
    let mut bytes = utc_only_tzif();
    let footer_start = bytes.len() - 6;
    bytes[footer_start + 1] = b':';
    assert!(Region::from_tzif(&bytes, "Bad").is_err());
}

#[test]
fn rejects_out_of_range_utoff() {
    let mut bytes = utc_only_tzif();
    // v1 section is a 44-byte header + 10-byte data block (typecnt=1,
    // charcnt=4, no transitions or leap seconds); the v2 header follows,
    // then the v2 local time type's utoff is the first 4 bytes of its data.
    let utoff_offset = 54 + 44;
    bytes[utoff_offset..utoff_offset + 4].copy_from_slice(&99_999i32.to_be_bytes());
    assert!(Region::from_tzif(&bytes, "Bad").is_err());
}

#[test]
fn rejects_out_of_range_transition_type_index() {
    // Build a buffer with one transition whose type index equals typecnt.
    let mut v1 = Vec::new();
    v1.extend_from_slice(b"TZif");
    v1.push(b'2');
    v1.extend_from_slice(&[0u8; 15]);
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&0u32.to_be_bytes());
    v1.extend_from_slice(&1u32.to_be_bytes());
    v1.extend_from_slice(&4u32.to_be_bytes());
    v1.extend_from_slice(&0i32.to_be_bytes());
    v1.push(0);
    v1.push(0);
    v1.extend_from_slice(b"UTC\0");

    let mut v2 = Vec::new();
    v2.extend_from_slice(b"TZif");
    v2.push(b'2');
    v2.extend_from_slice(&[0u8; 15]);
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&0u32.to_be_bytes());
    v2.extend_from_slice(&1u32.to_be_bytes()); // timecnt = 1
    v2.extend_from_slice(&1u32.to_be_bytes()); // typecnt = 1
    v2.extend_from_slice(&4u32.to_be_bytes());
    v2.extend_from_slice(&0i64.to_be_bytes()); // transition time
    v2.push(1); // type index 1, but typecnt is 1 -> out of range
    v2.extend_from_slice(&0i32.to_be_bytes());
    v2.push(0);
    v2.push(0);
    v2.extend_from_slice(b"UTC\0");

    let mut bytes = v1;
    bytes.extend_from_slice(&v2);
    bytes.extend_from_slice(b"\nUTC0\n");

    assert!(Region::from_tzif(&bytes, "Bad").is_err());
}

#[test]
fn rejects_version_1() {
    let mut bytes = utc_only_tzif();
    bytes[4] = b'1';
    assert!(Region::from_tzif(&bytes, "Bad").is_err());
}

#[test]
fn rejects_truncated_buffer() {
    let bytes = utc_only_tzif();
    assert!(Region::from_tzif(&bytes[..20], "Truncated").is_err());
}
