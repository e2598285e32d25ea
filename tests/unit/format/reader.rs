use super::*;

#[test]
fn reads_little_endian_fields_in_order() {
    let buf = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
    let mut r = ByteReader::new(&buf, "test");
    assert_eq!(r.u8().unwrap(), 0x01);
    assert_eq!(r.u16_le().unwrap(), 0x1234);
    assert_eq!(r.u32_le().unwrap(), 0x1234_5678);
    assert!(r.take(1).is_err());
}

#[test]
fn short_read_is_a_format_error_and_names_the_record() {
    let buf = [0u8; 3];
    let mut r = ByteReader::new(&buf, "block info");
    let err = r.u32_le().unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("block info"));
}
