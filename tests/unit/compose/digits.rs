use super::*;

#[test]
fn clock_fields_are_zero_padded() {
    assert_eq!(DigitValue::Padded { value: 9, width: 2 }.text(), "09");
    assert_eq!(DigitValue::Padded { value: 0, width: 2 }.text(), "00");
    assert_eq!(DigitValue::Padded { value: 123, width: 2 }.text(), "123");
}

#[test]
fn counters_are_not_padded() {
    assert_eq!(DigitValue::Count(7).text(), "7");
    assert_eq!(DigitValue::Count(23456).text(), "23456");
    assert_eq!(DigitValue::Real(22.5).text(), "22.5");
    assert_eq!(DigitValue::Real(5.0).text(), "5");
}

#[test]
fn dot_maps_to_the_eleventh_glyph() {
    assert_eq!(glyphs("22.5"), vec![2, 2, DOT_GLYPH, 5]);
    assert_eq!(glyphs("-1"), vec![1]);
}

#[test]
fn left_and_center_start_at_pos_x() {
    assert_eq!(glyph_positions(Alignment::Left, 100, 20, 3), vec![100, 120, 140]);
    assert_eq!(glyph_positions(Alignment::Center, 100, 20, 2), vec![100, 120]);
    assert_eq!(glyph_positions(Alignment::Unspecified, 5, 3, 1), vec![5]);
}

#[test]
fn right_alignment_ends_at_pos_x() {
    assert_eq!(glyph_positions(Alignment::Right, 100, 20, 3), vec![40, 60, 80]);
    assert_eq!(glyph_positions(Alignment::Right, 10, 20, 1), vec![-10]);
}
