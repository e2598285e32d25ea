use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect};

use crate::foundation::math::{premultiply, unpremultiply};

/// Render `src`, placed with its top-left at `origin`, rotated clockwise by
/// `degrees` about `pivot`, into a transparent `width` x `height` layer.
///
/// Sampling is bicubic (Catmull-Rom) on premultiplied pixels; everything
/// outside `src` counts as transparent.
pub(crate) fn rotate_into_layer(
    src: &RgbaImage,
    origin: Point,
    pivot: Point,
    degrees: f64,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let forward = Affine::rotate_about(degrees.to_radians(), pivot);
    let inverse = forward.inverse();

    let placed = Rect::new(
        origin.x,
        origin.y,
        origin.x + f64::from(src.width()),
        origin.y + f64::from(src.height()),
    );
    let bbox = forward.transform_rect_bbox(placed).inflate(2.0, 2.0);
    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = (bbox.x1.ceil().max(0.0) as u32).min(width);
    let y1 = (bbox.y1.ceil().max(0.0) as u32).min(height);

    let premul: Vec<[u8; 4]> = src.pixels().map(|p| premultiply(p.0)).collect();

    for y in y0..y1 {
        for x in x0..x1 {
            let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let sx = p.x - origin.x - 0.5;
            let sy = p.y - origin.y - 0.5;
            let px = sample_bicubic(&premul, src.width(), src.height(), sx, sy);
            if px[3] != 0 {
                out.put_pixel(x, y, Rgba(unpremultiply(px)));
            }
        }
    }
    out
}

fn catmull_rom(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        -0.5 * t3 + t2 - 0.5 * t,
        1.5 * t3 - 2.5 * t2 + 1.0,
        -1.5 * t3 + 2.0 * t2 + 0.5 * t,
        0.5 * t3 - 0.5 * t2,
    ]
}

fn sample_bicubic(px: &[[u8; 4]], w: u32, h: u32, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(w), i64::from(h));
    if x <= -2.0 || y <= -2.0 || x >= (w + 1) as f64 || y >= (h + 1) as f64 {
        return [0; 4];
    }

    let fx = x.floor();
    let fy = y.floor();
    let wx = catmull_rom(x - fx);
    let wy = catmull_rom(y - fy);
    let (ix, iy) = (fx as i64, fy as i64);

    let mut acc = [0f64; 4];
    for (j, wyj) in wy.iter().enumerate() {
        let sy = iy - 1 + j as i64;
        if sy < 0 || sy >= h {
            continue;
        }
        for (i, wxi) in wx.iter().enumerate() {
            let sx = ix - 1 + i as i64;
            if sx < 0 || sx >= w {
                continue;
            }
            let p = px[(sy * w + sx) as usize];
            let k = wxi * wyj;
            for c in 0..4 {
                acc[c] += f64::from(p[c]) * k;
            }
        }
    }

    let a = acc[3].round().clamp(0.0, 255.0);
    let mut out = [0u8; 4];
    for c in 0..3 {
        // Premultiplied color can never exceed its alpha.
        out[c] = acc[c].round().clamp(0.0, a) as u8;
    }
    out[3] = a as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/rotate.rs"]
mod tests;
