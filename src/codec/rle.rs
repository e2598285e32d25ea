//! Scanline run-length encoding (compression mode `0x04`).
//!
//! An image starts with `height` little-endian `u32` line records, each packing
//! `offset | size << 21`, where `offset` is measured from byte 0 of the image
//! (index included). Each row is a sequence of segments, every segment a
//! one-byte prefix `same << 7 | count` followed by one pixel code (same-run)
//! or `count` pixel codes (literal run).

use crate::codec::color::{channels, code_len, push_code, push_pixel};
use crate::codec::raw::rows;
use crate::foundation::error::{SmawfError, SmawfResult};

const SAME_BIT: u8 = 0x80;
const MAX_RUN: usize = 0x7F;

/// One entry of the per-row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineInfo {
    /// Byte offset of the row from the start of the image data.
    pub offset: u32,
    /// Byte length of the compressed row.
    pub size: u16,
}

impl LineInfo {
    /// Encoded size in bytes.
    pub const SIZE: usize = 4;
    /// Largest offset representable in 21 bits.
    pub const MAX_OFFSET: u32 = (1 << 21) - 1;
    /// Largest row size representable in 11 bits.
    pub const MAX_SIZE: u16 = (1 << 11) - 1;

    /// Unpack a little-endian index word.
    pub fn from_word(word: u32) -> Self {
        Self {
            offset: word & Self::MAX_OFFSET,
            size: (word >> 21) as u16,
        }
    }

    /// Pack into an index word. Fields must already be in range.
    pub fn to_word(self) -> u32 {
        (self.offset & Self::MAX_OFFSET) | (u32::from(self.size & Self::MAX_SIZE) << 21)
    }
}

/// Read the per-row index and check every row span lies inside `data`.
pub(crate) fn parse_line_index(data: &[u8], height: usize) -> SmawfResult<Vec<LineInfo>> {
    let index_len = height * LineInfo::SIZE;
    if data.len() < index_len {
        return Err(SmawfError::format(format!(
            "rle image with {height} rows needs a {index_len}-byte line index, payload has {}",
            data.len()
        )));
    }

    let lines = data[..index_len]
        .chunks_exact(LineInfo::SIZE)
        .map(|w| LineInfo::from_word(u32::from_le_bytes([w[0], w[1], w[2], w[3]])))
        .collect::<Vec<_>>();

    for (row, line) in lines.iter().enumerate() {
        let end = line.offset as usize + usize::from(line.size);
        if end > data.len() {
            return Err(SmawfError::format(format!(
                "rle row {row} spans bytes {}..{end}, payload has {}",
                line.offset,
                data.len()
            )));
        }
    }
    Ok(lines)
}

/// Compress RGB8/RGBA8 pixels into index + rows, zero-padded to 4 bytes.
pub(crate) fn compress(
    pixels: &[u8],
    width: usize,
    height: usize,
    has_alpha: bool,
) -> SmawfResult<(Vec<LineInfo>, Vec<u8>)> {
    let ch = channels(has_alpha);
    let index_len = height * LineInfo::SIZE;

    let mut body = Vec::<u8>::new();
    let mut lines = Vec::with_capacity(height);
    let mut codes = Vec::with_capacity(width * code_len(has_alpha));
    for (row_idx, row) in rows(pixels, width * ch, height).enumerate() {
        codes.clear();
        for px in row.chunks_exact(ch) {
            push_code(&mut codes, px, has_alpha);
        }

        let start = body.len();
        compress_row(&codes, code_len(has_alpha), &mut body);

        let offset = index_len + start;
        let size = body.len() - start;
        let offset = u32::try_from(offset)
            .ok()
            .filter(|&o| o <= LineInfo::MAX_OFFSET)
            .ok_or_else(|| {
                SmawfError::validation(format!(
                    "rle row {row_idx} offset {offset} does not fit in 21 bits"
                ))
            })?;
        let size = u16::try_from(size)
            .ok()
            .filter(|&s| s <= LineInfo::MAX_SIZE)
            .ok_or_else(|| {
                SmawfError::validation(format!(
                    "rle row {row_idx} compresses to {size} bytes, limit is {}",
                    LineInfo::MAX_SIZE
                ))
            })?;
        lines.push(LineInfo { offset, size });
    }

    let mut out = Vec::with_capacity((index_len + body.len()).next_multiple_of(4));
    for line in &lines {
        out.extend_from_slice(&line.to_word().to_le_bytes());
    }
    out.extend_from_slice(&body);
    out.resize(out.len().next_multiple_of(4), 0);
    Ok((lines, out))
}

/// Greedy left-to-right segmentation of one row of pixel codes.
///
/// A literal run is closed as soon as two consecutive equal codes appear; the
/// repeated code starts a same-run. Segments never exceed 127 codes.
pub(crate) fn compress_row(codes: &[u8], code: usize, out: &mut Vec<u8>) {
    let n = codes.len() / code;
    let at = |i: usize| &codes[i * code..(i + 1) * code];

    let mut literal_start = 0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && at(j) == at(i) {
            j += 1;
        }

        if j - i >= 2 {
            emit_literal(&codes[literal_start * code..i * code], code, out);
            let mut remaining = j - i;
            while remaining > 0 {
                let count = remaining.min(MAX_RUN);
                out.push(SAME_BIT | count as u8);
                out.extend_from_slice(at(i));
                remaining -= count;
            }
            literal_start = j;
        }
        i = j;
    }
    emit_literal(&codes[literal_start * code..n * code], code, out);
}

fn emit_literal(codes: &[u8], code: usize, out: &mut Vec<u8>) {
    for chunk in codes.chunks(MAX_RUN * code) {
        out.push((chunk.len() / code) as u8);
        out.extend_from_slice(chunk);
    }
}

/// Expand every row back into RGB8/RGBA8 pixels.
pub(crate) fn decompress(
    data: &[u8],
    lines: &[LineInfo],
    width: usize,
    height: usize,
    has_alpha: bool,
) -> SmawfResult<Vec<u8>> {
    let expected = width * height;
    let mut out = Vec::with_capacity(expected * channels(has_alpha));
    let mut decoded = 0usize;

    for (row, line) in lines.iter().enumerate() {
        let start = line.offset as usize;
        let end = start + usize::from(line.size);
        let span = data.get(start..end).ok_or_else(|| {
            SmawfError::format(format!(
                "rle row {row} spans bytes {start}..{end}, payload has {}",
                data.len()
            ))
        })?;
        decoded += decompress_row(span, has_alpha, expected - decoded.min(expected), &mut out)
            .map_err(|e| SmawfError::format(format!("rle row {row}: {e}")))?;
        if decoded > expected {
            break;
        }
    }

    if decoded != expected {
        return Err(SmawfError::format(format!(
            "rle image {width}x{height} decoded to {decoded} pixels, expected {expected}"
        )));
    }
    Ok(out)
}

/// Returns the number of pixels appended. Stops early once `budget` is exceeded
/// so corrupt counts cannot balloon the output.
fn decompress_row(
    span: &[u8],
    has_alpha: bool,
    budget: usize,
    out: &mut Vec<u8>,
) -> Result<usize, String> {
    let code = code_len(has_alpha);
    let mut produced = 0usize;
    let mut i = 0;
    while i < span.len() {
        let prefix = span[i];
        let count = usize::from(prefix & !SAME_BIT);
        i += 1;

        let need = if prefix & SAME_BIT != 0 { code } else { count * code };
        let body = span.get(i..i + need).ok_or_else(|| {
            format!(
                "segment at byte {} needs {need} bytes, row has {}",
                i - 1,
                span.len() - i
            )
        })?;
        i += need;

        produced += count;
        if produced > budget {
            return Ok(produced);
        }
        if prefix & SAME_BIT != 0 {
            for _ in 0..count {
                push_pixel(out, body, has_alpha);
            }
        } else {
            for c in body.chunks_exact(code) {
                push_pixel(out, c, has_alpha);
            }
        }
    }
    Ok(produced)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/rle.rs"]
mod tests;
