use super::*;

fn codes_rgb(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn segments(row: &[u8], code: usize) -> Vec<(bool, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < row.len() {
        let same = row[i] & 0x80 != 0;
        let count = usize::from(row[i] & 0x7F);
        out.push((same, count));
        i += 1 + if same { code } else { count * code };
    }
    out
}

#[test]
fn line_info_packs_offset_low_and_size_high() {
    let info = LineInfo {
        offset: 0x12345,
        size: 0x2AB,
    };
    let word = info.to_word();
    assert_eq!(word, 0x12345 | (0x2AB << 21));
    assert_eq!(LineInfo::from_word(word), info);
}

#[test]
fn uniform_row_is_a_single_same_run() {
    let mut out = Vec::new();
    compress_row(&codes_rgb(&[0x1234; 4]), 2, &mut out);
    assert_eq!(out, vec![0x84, 0x12, 0x34]);
}

#[test]
fn literal_run_closes_before_a_repeat() {
    let mut out = Vec::new();
    compress_row(&codes_rgb(&[1, 2, 3, 3, 3, 4]), 2, &mut out);
    assert_eq!(
        out,
        vec![0x02, 0, 1, 0, 2, 0x83, 0, 3, 0x01, 0, 4],
    );
}

#[test]
fn long_runs_split_at_127() {
    let mut same = Vec::new();
    compress_row(&codes_rgb(&[7; 300]), 2, &mut same);
    assert_eq!(segments(&same, 2), vec![(true, 127), (true, 127), (true, 46)]);

    let distinct: Vec<u16> = (0..300).collect();
    let mut lit = Vec::new();
    compress_row(&codes_rgb(&distinct), 2, &mut lit);
    assert_eq!(
        segments(&lit, 2),
        vec![(false, 127), (false, 127), (false, 46)]
    );
}

#[test]
fn segment_counts_stay_in_range_for_mixed_rows() {
    let values: Vec<u16> = (0..1000u32)
        .map(|i| if (i / 5) % 3 == 0 { 42 } else { (i * 7919 % 65521) as u16 })
        .collect();
    let mut out = Vec::new();
    compress_row(&codes_rgb(&values), 2, &mut out);
    let segs = segments(&out, 2);
    assert!(segs.iter().all(|&(_, c)| (1..=127).contains(&c)));
    assert_eq!(segs.iter().map(|&(_, c)| c).sum::<usize>(), values.len());
}

#[test]
fn rgba_same_run_decodes_repeated_pixels() {
    let mut out = Vec::new();
    let n = decompress_row(&[0x8A, 0x30, 0xAB, 0xCD], true, usize::MAX, &mut out).unwrap();
    assert_eq!(n, 10);
    let (r, g, b) = crate::codec::color::rgb565_to_rgb8(0xABCD);
    for px in out.chunks_exact(4) {
        assert_eq!(px, &[r, g, b, 0x30]);
    }
    assert_eq!(out.len(), 40);
}

#[test]
fn rgb_literal_run_decodes_distinct_pixels() {
    let mut out = Vec::new();
    let n = decompress_row(&[0x02, 0x21, 0xAB, 0x22, 0xCD], false, usize::MAX, &mut out).unwrap();
    assert_eq!(n, 2);
    let (r0, g0, b0) = crate::codec::color::rgb565_to_rgb8(0x21AB);
    let (r1, g1, b1) = crate::codec::color::rgb565_to_rgb8(0x22CD);
    assert_eq!(out, vec![r0, g0, b0, r1, g1, b1]);
}

#[test]
fn segment_past_row_end_is_rejected() {
    let mut out = Vec::new();
    assert!(decompress_row(&[0x03, 0x21, 0xAB], false, usize::MAX, &mut out).is_err());
}

#[test]
fn compress_lays_out_index_then_rows_padded() {
    // 3x2 RGB: row 0 uniform, row 1 distinct.
    let pixels = [
        255, 0, 0, 255, 0, 0, 255, 0, 0, //
        0, 0, 0, 255, 255, 255, 0, 0, 255,
    ];
    let (lines, bytes) = compress(&pixels, 3, 2, false).unwrap();
    assert_eq!(lines[0], LineInfo { offset: 8, size: 3 });
    assert_eq!(lines[1], LineInfo { offset: 11, size: 7 });
    assert_eq!(bytes.len(), 20);
    assert_eq!(&bytes[8..11], &[0x83, 0xF8, 0x00]);
    assert_eq!(&bytes[18..], &[0, 0]);

    assert_eq!(parse_line_index(&bytes, 2).unwrap(), lines);
    let back = decompress(&bytes, &lines, 3, 2, false).unwrap();
    assert_eq!(back, pixels.to_vec());
}

#[test]
fn pixel_count_mismatch_is_rejected() {
    let pixels = [10u8, 20, 30, 40, 50, 60];
    let (lines, bytes) = compress(&pixels, 2, 1, false).unwrap();
    let err = decompress(&bytes, &lines, 3, 1, false).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("expected 3"));
}

#[test]
fn index_pointing_outside_payload_is_rejected() {
    let mut bytes = LineInfo { offset: 4, size: 100 }.to_word().to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0x81, 0, 0, 0]);
    assert!(parse_line_index(&bytes, 1).unwrap_err().is_format());
    assert!(parse_line_index(&bytes[..3], 1).unwrap_err().is_format());
}

#[test]
fn oversized_row_is_a_validation_error() {
    // 700 distinct RGBA pixels: 6 prefixes + 2100 bytes > 2047.
    let pixels: Vec<u8> = (0..700u32)
        .flat_map(|i| [((i % 32) * 8) as u8, ((i / 32) * 4) as u8, 0, 255])
        .collect();
    let err = compress(&pixels, 700, 1, true).unwrap_err();
    assert!(matches!(err, SmawfError::Validation(_)));
}
