use image::RgbaImage;

use crate::compose::config::PreviewConfig;
use crate::compose::frame::FrameSet;
use crate::compose::handlers::{BlockCtx, handler_for};
use crate::container::watch_face::{DecodeOpts, WatchFace};
use crate::foundation::error::{SmawfError, SmawfResult};

/// Render `face` for the values in `config` onto a transparent
/// `width` x `height` canvas, decoding images sequentially.
pub fn render_preview(
    face: &WatchFace,
    width: u32,
    height: u32,
    config: &PreviewConfig,
) -> SmawfResult<FrameSet> {
    render_preview_with(face, width, height, config, &DecodeOpts::default())
}

/// [`render_preview`] with explicit image decode options.
///
/// Blocks are applied in table order, so later blocks draw over earlier ones.
/// Animation blocks multiply the frame count.
#[tracing::instrument(skip(face, config, opts), fields(blocks = face.blocks().len()))]
pub fn render_preview_with(
    face: &WatchFace,
    width: u32,
    height: u32,
    config: &PreviewConfig,
    opts: &DecodeOpts,
) -> SmawfResult<FrameSet> {
    if width == 0 || height == 0 {
        return Err(SmawfError::validation(format!(
            "preview canvas must be non-empty, got {width}x{height}"
        )));
    }

    let images: Vec<RgbaImage> = face
        .decode_images(opts)?
        .into_iter()
        .map(|img| img.to_rgba8())
        .collect();

    let mut frames: FrameSet = vec![RgbaImage::new(width, height)];
    for (idx, info) in face.blocks().iter().enumerate() {
        let Some(handler) = handler_for(info.role) else {
            tracing::debug!(block = idx, role = ?info.role, "no preview handler");
            continue;
        };
        let owned = images.get(info.image_ids()).ok_or_else(|| {
            SmawfError::format(format!(
                "block {idx} references images {:?}, face has {}",
                info.image_ids(),
                images.len()
            ))
        })?;
        let ctx = BlockCtx {
            info,
            images: owned,
        };
        frames = handler(frames, &ctx, config);
    }

    tracing::debug!(frames = frames.len(), "preview rendered");
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/render.rs"]
mod tests;
