use super::*;

#[test]
fn rgb_rows_are_padded_to_four_bytes() {
    assert_eq!(row_stride(5, false), 12);
    assert_eq!(row_stride(4, false), 8);
    assert_eq!(row_stride(1, true), 4);
    assert_eq!(row_stride(4, true), 12);

    let pixels = vec![0xFFu8; 5 * 2 * 3];
    let packed = encode_raw(&pixels, 5, 2, false);
    assert_eq!(packed.len(), 24);
    assert_eq!(&packed[0..10], &[0xFF; 10]);
    assert_eq!(&packed[10..12], &[0, 0]);
    assert_eq!(&packed[22..24], &[0, 0]);
}

#[test]
fn argb_pixels_store_alpha_then_big_endian_color() {
    let pixels = [0xFF, 0x00, 0x00, 0x80];
    let packed = encode_raw(&pixels, 1, 1, true);
    assert_eq!(packed, vec![0x80, 0xF8, 0x00, 0x00]);
    assert_eq!(decode_raw(&packed, 1, 1, true).unwrap(), vec![255, 0, 0, 0x80]);
}

#[test]
fn decode_strips_padding() {
    let pixels: Vec<u8> = (0..3 * 3 * 3).map(|v| (v * 9) as u8).collect();
    let packed = encode_raw(&pixels, 3, 3, false);
    assert_eq!(packed.len(), 3 * 8);
    let back = decode_raw(&packed, 3, 3, false).unwrap();
    assert_eq!(back.len(), pixels.len());
    for (a, b) in back.iter().zip(&pixels) {
        assert!((i32::from(*a) - i32::from(*b)).abs() <= 8);
    }
}

#[test]
fn decode_rejects_short_payload() {
    let err = decode_raw(&[0u8; 11], 5, 1, false).unwrap_err();
    assert!(err.is_format());
}
