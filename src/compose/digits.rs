use crate::format::block::Alignment;

/// Glyph index of the decimal point within a digit block.
pub(crate) const DOT_GLYPH: usize = 10;

/// A value rendered as a row of digit glyphs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DigitValue {
    /// Clock or date field, zero-padded to `width` digits.
    Padded { value: u32, width: usize },
    /// Counter, no padding.
    Count(u32),
    /// Fractional counter such as distance.
    Real(f64),
}

impl DigitValue {
    pub(crate) fn text(self) -> String {
        match self {
            Self::Padded { value, width } => format!("{value:0width$}"),
            Self::Count(value) => value.to_string(),
            Self::Real(value) => value.to_string(),
        }
    }
}

/// Glyph indices for `text`; characters with no glyph are dropped.
pub(crate) fn glyphs(text: &str) -> Vec<usize> {
    text.chars()
        .filter_map(|c| match c {
            '.' => Some(DOT_GLYPH),
            c => c.to_digit(10).map(|d| d as usize),
        })
        .collect()
}

/// Left x of each of `count` glyphs of width `glyph_width`.
///
/// Right alignment ends the row at `pos_x`; every other mode starts it there.
pub(crate) fn glyph_positions(
    alignment: Alignment,
    pos_x: i64,
    glyph_width: i64,
    count: usize,
) -> Vec<i64> {
    let start = match alignment {
        Alignment::Right => pos_x - glyph_width * count as i64,
        Alignment::Left | Alignment::Center | Alignment::Unspecified => pos_x,
    };
    (0..count).map(|i| start + glyph_width * i as i64).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/digits.rs"]
mod tests;
