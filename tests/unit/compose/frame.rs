use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn half_transparent_red_over_opaque_blue_mixes() {
    let out = blend_straight(Rgba([0, 0, 255, 255]), Rgba([255, 0, 0, 128]));
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 128).abs() <= 2);
    assert!((i32::from(out[2]) - 127).abs() <= 2);
}

#[test]
fn paste_clips_at_every_edge() {
    let mut dst = RgbaImage::new(4, 4);
    let src = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));
    paste(&mut dst, &src, -2, 3, false);
    let lit: Vec<(u32, u32)> = dst
        .enumerate_pixels()
        .filter(|(_, _, p)| p[3] != 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert_eq!(lit, vec![(0, 3)]);

    let mut dst = RgbaImage::new(4, 4);
    paste(&mut dst, &src, 10, 10, false);
    assert!(dst.pixels().all(|p| p[3] == 0));
}

#[test]
fn unmasked_paste_overwrites_even_transparent_pixels() {
    let mut dst = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 255]));
    let src = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
    paste(&mut dst, &src, 0, 0, false);
    assert_eq!(dst.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));

    let mut masked = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 255]));
    paste(&mut masked, &src, 0, 0, true);
    assert_eq!(masked.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
}

#[test]
fn composite_blends_every_pixel() {
    let mut dst = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    let mut layer = RgbaImage::new(2, 2);
    layer.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
    composite(&mut dst, &layer);
    assert_eq!(dst.get_pixel(1, 1), &Rgba([200, 100, 50, 255]));
    assert_eq!(dst.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
}
