/// Expand RGB565 to 8-bit channels.
pub fn rgb565_to_rgb8(rgb565: u16) -> (u8, u8, u8) {
    let r5 = u32::from(rgb565 >> 11);
    let g6 = u32::from((rgb565 >> 5) & 0x3F);
    let b5 = u32::from(rgb565 & 0x1F);
    (
        ((r5 * 255 + 15) / 31) as u8,
        ((g6 * 255 + 31) / 63) as u8,
        ((b5 * 255 + 15) / 31) as u8,
    )
}

/// Truncate 8-bit channels to RGB565. Lossy; stable after one round trip.
pub fn rgb8_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((u16::from(r) & 0xF8) << 8) | ((u16::from(g) & 0xFC) << 3) | (u16::from(b) >> 3)
}

/// Bytes of one stored pixel code: `[alpha,] rgb565_hi, rgb565_lo`.
pub(crate) fn code_len(has_alpha: bool) -> usize {
    if has_alpha { 3 } else { 2 }
}

/// Channels of one unpacked pixel (RGB8 or RGBA8).
pub(crate) fn channels(has_alpha: bool) -> usize {
    if has_alpha { 4 } else { 3 }
}

/// Append the stored code of one RGB8/RGBA8 pixel.
pub(crate) fn push_code(out: &mut Vec<u8>, px: &[u8], has_alpha: bool) {
    if has_alpha {
        out.push(px[3]);
    }
    out.extend_from_slice(&rgb8_to_rgb565(px[0], px[1], px[2]).to_be_bytes());
}

/// Append the RGB8/RGBA8 expansion of one stored code.
pub(crate) fn push_pixel(out: &mut Vec<u8>, code: &[u8], has_alpha: bool) {
    let (alpha, color) = if has_alpha {
        (Some(code[0]), &code[1..3])
    } else {
        (None, &code[0..2])
    };
    let (r, g, b) = rgb565_to_rgb8(u16::from_be_bytes([color[0], color[1]]));
    out.extend_from_slice(&[r, g, b]);
    if let Some(a) = alpha {
        out.push(a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/color.rs"]
mod tests;
