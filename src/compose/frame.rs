use image::{Rgba, RgbaImage};

use crate::foundation::math::{mul_div255_u8, premultiply, unpremultiply};

/// Output frames of a preview; more than one only after an animation block.
pub type FrameSet = Vec<RgbaImage>;

/// Source-over on premultiplied RGBA8.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Blend one straight-alpha pixel over another.
pub(crate) fn blend_straight(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    Rgba(unpremultiply(over(premultiply(dst.0), premultiply(src.0))))
}

/// Paste `src` with its top-left at `(x, y)`, clipped to `dst`.
///
/// With `masked`, the source alpha blends it over `dst`; otherwise source
/// pixels replace `dst` outright.
pub(crate) fn paste(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, masked: bool) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = *src.get_pixel((dx - x) as u32, (dy - y) as u32);
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            *d = if masked { blend_straight(*d, s) } else { s };
        }
    }
}

/// Blend a full-size layer over `dst`.
pub(crate) fn composite(dst: &mut RgbaImage, layer: &RgbaImage) {
    for (d, s) in dst.pixels_mut().zip(layer.pixels()) {
        *d = blend_straight(*d, *s);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
