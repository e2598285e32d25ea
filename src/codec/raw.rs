use crate::codec::color::{channels, code_len, push_code, push_pixel};
use crate::foundation::error::{SmawfError, SmawfResult};

/// Stored bytes per row, zero-padded to a multiple of 4.
pub(crate) fn row_stride(width: usize, has_alpha: bool) -> usize {
    (width * code_len(has_alpha)).next_multiple_of(4)
}

/// Pack RGB8/RGBA8 rows into padded RGB565/ARGB565 rows.
pub(crate) fn encode_raw(pixels: &[u8], width: usize, height: usize, has_alpha: bool) -> Vec<u8> {
    let stride = row_stride(width, has_alpha);
    let ch = channels(has_alpha);
    let mut out = Vec::with_capacity(stride * height);
    for row in rows(pixels, width * ch, height) {
        let start = out.len();
        for px in row.chunks_exact(ch) {
            push_code(&mut out, px, has_alpha);
        }
        out.resize(start + stride, 0);
    }
    out
}

/// `height` rows of `row_len` bytes; missing rows come back empty.
pub(crate) fn rows(pixels: &[u8], row_len: usize, height: usize) -> impl Iterator<Item = &[u8]> {
    (0..height).map(move |y| pixels.get(y * row_len..(y + 1) * row_len).unwrap_or(&[]))
}

/// Unpack padded rows back to RGB8/RGBA8, ignoring padding and trailing bytes.
pub(crate) fn decode_raw(
    data: &[u8],
    width: usize,
    height: usize,
    has_alpha: bool,
) -> SmawfResult<Vec<u8>> {
    check_raw_len(data.len(), width, height, has_alpha)?;
    let stride = row_stride(width, has_alpha);
    let code = code_len(has_alpha);
    let mut out = Vec::with_capacity(width * height * channels(has_alpha));
    if stride == 0 {
        return Ok(out);
    }
    for row in data.chunks_exact(stride).take(height) {
        for c in row[..width * code].chunks_exact(code) {
            push_pixel(&mut out, c, has_alpha);
        }
    }
    Ok(out)
}

pub(crate) fn check_raw_len(
    len: usize,
    width: usize,
    height: usize,
    has_alpha: bool,
) -> SmawfResult<()> {
    let need = row_stride(width, has_alpha) * height;
    if len < need {
        return Err(SmawfError::format(format!(
            "raw image {width}x{height} needs {need} bytes, payload has {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/raw.rs"]
mod tests;
