//! Integration tests for TIFF metadata decoding

extern crate std;

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use tiffmeta::{ByteOrder, CycleCheck, FieldType, MakernoteRegistry, TiffError, TiffReader};

fn write_le_entry(buffer: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, slot: [u8; 4]) {
    buffer.write_u16::<LittleEndian>(tag).unwrap();
    buffer.write_u16::<LittleEndian>(field_type).unwrap();
    buffer.write_u32::<LittleEndian>(count).unwrap();
    buffer.extend_from_slice(&slot);
}

/// Builds a little-endian EXIF-style stream with two packed IFDs
/// followed by the out-of-line value area.
///
/// Layout: header 0..8, IFD0 8..74 (5 entries), IFD1 74..92 (1
/// entry), then Make at 92, XResolution at 98 and DateTime at 106.
/// Everything sits at or after the first IFD offset and the IFDs are
/// back-to-back, so the fast-path locality precondition holds.
fn camera_style_stream() -> Vec<u8> {
    let mut buffer = Vec::new();

    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    // IFD0
    buffer.write_u16::<LittleEndian>(5).unwrap();
    write_le_entry(&mut buffer, 271, 2, 6, 92u32.to_le_bytes());  // Make, out of line
    write_le_entry(&mut buffer, 272, 2, 4, *b"IXUS");             // Model, inline ASCII
    write_le_entry(&mut buffer, 274, 3, 1, [1, 0, 0, 0]);         // Orientation
    write_le_entry(&mut buffer, 282, 5, 1, 98u32.to_le_bytes());  // XResolution, out of line
    write_le_entry(&mut buffer, 306, 2, 20, 106u32.to_le_bytes()); // DateTime, out of line
    buffer.write_u32::<LittleEndian>(74).unwrap();

    // IFD1, directly adjacent
    buffer.write_u16::<LittleEndian>(1).unwrap();
    write_le_entry(&mut buffer, 256, 3, 1, [160, 0, 0, 0]);       // thumbnail width
    buffer.write_u32::<LittleEndian>(0).unwrap();

    // Out-of-line value area
    buffer.extend_from_slice(b"Canon\x00");
    buffer.write_u32::<LittleEndian>(300).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.extend_from_slice(b"2026:08:29 10:00:00\x00");

    buffer
}

#[test]
fn test_canonical_decode_of_camera_style_stream() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut cursor = Cursor::new(camera_style_stream());
    let tiff = TiffReader::new().read(&mut cursor).unwrap();

    assert_eq!(tiff.order, ByteOrder::LittleEndian);
    assert_eq!(tiff.directory_count(), 2);

    let ifd0 = tiff.primary().unwrap();
    assert_eq!(ifd0.tag_count(), 5);
    assert_eq!(ifd0.get_tag(271).unwrap().ascii().unwrap(), "Canon");
    assert_eq!(ifd0.get_tag(272).unwrap().ascii().unwrap(), "IXUS");
    assert_eq!(ifd0.get_tag(274).unwrap().uint(0).unwrap(), 1);
    assert_eq!(ifd0.get_tag(282).unwrap().rational(0).unwrap(), (300, 1));
    assert_eq!(
        ifd0.get_tag(306).unwrap().ascii().unwrap(),
        "2026:08:29 10:00:00"
    );

    let ifd1 = &tiff.directories[1];
    assert_eq!(ifd1.tag_count(), 1);
    assert_eq!(ifd1.get_tag(256).unwrap().uint(0).unwrap(), 160);
}

#[test]
fn test_fast_and_canonical_decodes_agree() {
    let buffer = camera_style_stream();

    let canonical = TiffReader::new().read(&mut Cursor::new(buffer.clone())).unwrap();
    let fast = TiffReader::new().read_fast(&mut Cursor::new(buffer)).unwrap();

    assert_eq!(canonical.order, fast.order);
    assert_eq!(canonical.directory_count(), fast.directory_count());

    for (a, b) in canonical.directories.iter().zip(fast.directories.iter()) {
        assert_eq!(a.tag_count(), b.tag_count());
        for (x, y) in a.tags.iter().zip(b.tags.iter()) {
            assert_eq!(x, y);
        }
    }
}

#[test]
fn test_declared_count_always_materializes() {
    let mut cursor = Cursor::new(camera_style_stream());
    let tiff = TiffReader::new().read(&mut cursor).unwrap();

    for directory in &tiff.directories {
        for tag in &directory.tags {
            assert_eq!(tag.value().len(), tag.count as usize);
        }
    }
}

#[test]
fn test_unrecognized_marker_is_never_truncation() {
    // A full-length stream whose marker bytes are garbage
    let mut buffer = camera_style_stream();
    buffer[0] = b'G';
    buffer[1] = b'G';

    match TiffReader::new().read(&mut Cursor::new(buffer)) {
        Err(TiffError::InvalidByteOrder(_)) => {}
        other => panic!("expected InvalidByteOrder, got {:?}", other),
    }
}

#[test]
fn test_immediate_self_cycle_is_rejected() {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap(); // next offset = own offset

    match TiffReader::new().read(&mut Cursor::new(buffer)) {
        Err(TiffError::RecursiveIfd(8)) => {}
        other => panic!("expected RecursiveIfd, got {:?}", other),
    }
}

#[test]
fn test_big_endian_out_of_line_rationals() {
    // Three rational pairs stored out of line in a big-endian stream.
    // The pairs must come back under the stream's order, not the
    // host's.
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"MM");
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();

    buffer.write_u16::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(0x8888).unwrap(); // private tag id
    buffer.write_u16::<BigEndian>(5).unwrap();      // RATIONAL
    buffer.write_u32::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(26).unwrap();     // value offset
    buffer.write_u32::<BigEndian>(0).unwrap();      // next IFD

    for (n, d) in [(1u32, 3u32), (0, 0), (0xFFFF_FFFF, 2)] {
        buffer.write_u32::<BigEndian>(n).unwrap();
        buffer.write_u32::<BigEndian>(d).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    let tiff = TiffReader::new().read(&mut cursor).unwrap();

    let tag = tiff.primary().unwrap().get_tag(0x8888).unwrap();
    assert_eq!(tag.field_type, Some(FieldType::Rational));
    assert_eq!(tag.rational(0).unwrap(), (1, 3));
    // Stored verbatim: a zero denominator is the consumer's problem
    assert_eq!(tag.rational(1).unwrap(), (0, 0));
    assert_eq!(tag.rational(2).unwrap(), (0xFFFF_FFFF, 2));
}

#[test]
fn test_fast_decode_cannot_reach_values_before_first_ifd() {
    // Value payload parked between the header and the first IFD:
    // canonical decoding resolves it, fast decoding must fail.
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(16).unwrap();  // first IFD offset

    buffer.write_u32::<LittleEndian>(72).unwrap();  // payload at offset 8
    buffer.write_u32::<LittleEndian>(1).unwrap();

    buffer.write_u16::<LittleEndian>(1).unwrap();   // IFD at offset 16
    write_le_entry(&mut buffer, 283, 5, 1, 8u32.to_le_bytes());
    buffer.write_u32::<LittleEndian>(0).unwrap();

    let canonical = TiffReader::new().read(&mut Cursor::new(buffer.clone())).unwrap();
    assert_eq!(
        canonical.primary().unwrap().get_tag(283).unwrap().rational(0).unwrap(),
        (72, 1)
    );

    match TiffReader::new().read_fast(&mut Cursor::new(buffer)) {
        Err(TiffError::UnresolvableOffset(8)) => {}
        other => panic!("expected UnresolvableOffset, got {:?}", other),
    }
}

#[test]
fn test_worked_single_short_example() {
    // Little-endian stream, magic 42, first IFD at 8, one SHORT tag
    // 0x0100 with inline value 100, next offset 0.
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(1).unwrap();
    write_le_entry(&mut buffer, 0x0100, 3, 1, [100, 0, 0, 0]);
    buffer.write_u32::<LittleEndian>(0).unwrap();

    let mut cursor = Cursor::new(buffer);
    let tiff = TiffReader::new().read(&mut cursor).unwrap();

    assert_eq!(tiff.directory_count(), 1);
    let directory = tiff.primary().unwrap();
    assert_eq!(directory.tag_count(), 1);

    let tag = &directory.tags[0];
    assert_eq!(tag.id, 0x0100);
    assert_eq!(tag.field_type, Some(FieldType::Short));
    assert_eq!(tag.count, 1);
    assert_eq!(tag.uint(0).unwrap(), 100);
}

#[test]
fn test_strict_cycle_check_via_public_api() {
    // A -> B -> A chain that the legacy check would not catch
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u32::<LittleEndian>(14).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    let reader = TiffReader::with_cycle_check(CycleCheck::Strict);
    match reader.read(&mut Cursor::new(buffer)) {
        Err(TiffError::RecursiveIfd(8)) => {}
        other => panic!("expected RecursiveIfd, got {:?}", other),
    }
}

#[test]
fn test_makernote_roundtrip_through_registry() {
    // A makernote tag whose payload is itself a complete TIFF stream,
    // decoded recursively through a caller-registered decoder.
    let nested = camera_style_stream();

    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(1).unwrap();
    write_le_entry(&mut buffer, 37500, 7, nested.len() as u32, 26u32.to_le_bytes());
    buffer.write_u32::<LittleEndian>(0).unwrap();
    buffer.extend_from_slice(&nested);

    let mut cursor = Cursor::new(buffer);
    let tiff = TiffReader::new().read(&mut cursor).unwrap();

    let mut registry = MakernoteRegistry::new();
    registry.register("acme", |raw, _order| {
        TiffReader::new().read(&mut Cursor::new(raw.to_vec()))
    });

    let tag = tiff.primary().unwrap().get_tag(37500).unwrap();
    let inner = registry.decode_tag("acme", tag, tiff.order).unwrap();

    assert_eq!(inner.directory_count(), 2);
    assert_eq!(inner.primary().unwrap().get_tag(271).unwrap().ascii().unwrap(), "Canon");
}
