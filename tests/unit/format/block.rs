use super::*;

fn sample() -> BlockInfo {
    BlockInfo {
        image_byte_offset: 0x0001_2345,
        first_image_id: 12,
        width: 40,
        height: 180,
        pos_x: 205,
        pos_y: 251,
        image_count: 1,
        role: BlockRole::MinuteArm,
        has_alpha: true,
        alignment: Alignment::Center,
        compression: Compression::Rle,
        pivot_y: 20,
        pivot_x: 20,
    }
}

#[test]
fn encode_layout_is_little_endian_with_alpha_bit() {
    let b = BlockInfo {
        pivot_y: 0xAA,
        pivot_x: 0xBB,
        ..sample()
    };
    let bytes = b.encode();
    assert_eq!(&bytes[0..4], &[0x45, 0x23, 0x01, 0x00]);
    assert_eq!(&bytes[4..6], &[12, 0]);
    assert_eq!(&bytes[10..12], &[205, 0]);
    assert_eq!(bytes[14], 1);
    assert_eq!(bytes[15], 0x80 | 0x04);
    assert_eq!(bytes[16], 1);
    assert_eq!(bytes[17], 0x04);
    assert_eq!(bytes[18], 0xAA);
    assert_eq!(bytes[19], 0xBB);
}

#[test]
fn decode_inverts_encode_for_every_role() {
    for role in BlockRole::ALL {
        for has_alpha in [false, true] {
            let b = BlockInfo {
                role,
                has_alpha,
                ..sample()
            };
            assert_eq!(BlockInfo::decode(&b.encode()).unwrap(), b);
        }
    }
}

#[test]
fn decode_rejects_unknown_role() {
    let mut bytes = sample().encode();
    bytes[15] = 0x80 | 0x7F;
    let err = BlockInfo::decode(&bytes).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("role"));
}

#[test]
fn decode_rejects_unknown_alignment() {
    let mut bytes = sample().encode();
    bytes[16] = 9;
    assert!(BlockInfo::decode(&bytes).unwrap_err().is_format());
}

#[test]
fn decode_rejects_unsupported_compression() {
    let mut bytes = sample().encode();
    bytes[17] = 0x02;
    assert!(matches!(
        BlockInfo::decode(&bytes),
        Err(SmawfError::UnsupportedCompression(0x02))
    ));
}

#[test]
fn decode_rejects_short_input() {
    let bytes = sample().encode();
    assert!(BlockInfo::decode(&bytes[..BlockInfo::SIZE - 1]).is_err());
}

#[test]
fn image_ids_cover_the_block() {
    let b = BlockInfo {
        first_image_id: 3,
        image_count: 10,
        ..sample()
    };
    assert_eq!(b.image_ids(), 3..13);
}
