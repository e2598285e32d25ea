//! smawf reads, writes and previews binary smartwatch face containers.
//!
//! A container is a small header, a table of fixed-size block records
//! (position, role, compression, pivot) and an image size table, followed by
//! every image payload in global id order. Payloads are RGB565 pixels, with an
//! optional alpha byte, either raw or run-length encoded.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `&[u8] -> WatchFace` via [`WatchFace::decode`]
//! 2. **Decode**: `ImageData -> DynamicImage` via [`decode_image`]
//! 3. **Preview**: `WatchFace + PreviewConfig -> FrameSet` via [`render_preview`]
//! 4. **Rebuild**: replace images with [`WatchFace::with_images`] or build from
//!    scratch with [`WatchFace::from_layers`], then [`WatchFace::encode`]
//!
//! Malformed input is reported as [`SmawfError`]; nothing in the library panics
//! on bad bytes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod compose;
mod container;
mod format;
mod foundation;

pub use crate::codec::color::{rgb8_to_rgb565, rgb565_to_rgb8};
pub use crate::codec::image_data::{ImageData, ImagePayload, decode_image, encode_image};
pub use crate::codec::rle::LineInfo;
pub use crate::compose::config::{PreviewConfig, Weather};
pub use crate::compose::frame::FrameSet;
pub use crate::compose::render::{render_preview, render_preview_with};
pub use crate::container::watch_face::{DecodeOpts, Layer, WatchFace};
pub use crate::format::block::{Alignment, BlockInfo, BlockRole, Compression};
pub use crate::format::header::Header;
pub use crate::format::metadata::WatchFaceMetaData;
pub use crate::foundation::error::{SmawfError, SmawfResult};

/// Parse a complete container. Shorthand for [`WatchFace::decode`].
pub fn decode_container(bytes: &[u8]) -> SmawfResult<WatchFace> {
    WatchFace::decode(bytes)
}

/// Serialize a container. Shorthand for [`WatchFace::encode`].
pub fn encode_container(face: &WatchFace) -> Vec<u8> {
    face.encode()
}
