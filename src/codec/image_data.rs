use image::{DynamicImage, RgbImage, RgbaImage};

use crate::codec::color::channels;
use crate::codec::{raw, rle, rle::LineInfo};
use crate::foundation::error::{SmawfError, SmawfResult};
use crate::format::block::Compression;

/// Encoded payload of one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePayload {
    /// Row-padded RGB565 / ARGB565.
    Raw(Vec<u8>),
    /// Line index followed by RLE rows. `bytes` holds the whole image,
    /// index included; `lines` is the decoded index.
    Rle {
        /// Decoded per-row index.
        lines: Vec<LineInfo>,
        /// Complete image bytes as stored in the container.
        bytes: Vec<u8>,
    },
}

/// One stored image: dimensions, alpha flag and encoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    width: u16,
    height: u16,
    has_alpha: bool,
    payload: ImagePayload,
}

impl ImageData {
    /// Wrap container bytes, validating the payload layout for `compression`.
    pub fn from_bytes(
        bytes: &[u8],
        compression: Compression,
        width: u16,
        height: u16,
        has_alpha: bool,
    ) -> SmawfResult<Self> {
        let (w, h) = (usize::from(width), usize::from(height));
        let payload = match compression {
            Compression::Raw => {
                raw::check_raw_len(bytes.len(), w, h, has_alpha)?;
                ImagePayload::Raw(bytes.to_vec())
            }
            Compression::Rle => ImagePayload::Rle {
                lines: rle::parse_line_index(bytes, h)?,
                bytes: bytes.to_vec(),
            },
        };
        Ok(Self {
            width,
            height,
            has_alpha,
            payload,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixels carry alpha.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Compression mode of the payload.
    pub fn compression(&self) -> Compression {
        match self.payload {
            ImagePayload::Raw(_) => Compression::Raw,
            ImagePayload::Rle { .. } => Compression::Rle,
        }
    }

    /// Encoded payload.
    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }

    /// Bytes exactly as stored in the container.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.payload {
            ImagePayload::Raw(bytes) | ImagePayload::Rle { bytes, .. } => bytes,
        }
    }

    /// Stored byte length; the image's entry in the size table.
    pub fn encoded_len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// Decode a stored image into an RGB8 or RGBA8 pixel buffer.
pub fn decode_image(data: &ImageData) -> SmawfResult<DynamicImage> {
    let (w, h) = (usize::from(data.width), usize::from(data.height));
    let pixels = match &data.payload {
        ImagePayload::Raw(bytes) => raw::decode_raw(bytes, w, h, data.has_alpha)?,
        ImagePayload::Rle { lines, bytes } => {
            rle::decompress(bytes, lines, w, h, data.has_alpha)?
        }
    };

    let (w, h) = (u32::from(data.width), u32::from(data.height));
    let out = if data.has_alpha {
        RgbaImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgb8)
    };
    out.ok_or_else(|| SmawfError::format("decoded pixel buffer does not match image size"))
}

/// Encode a pixel buffer; `has_alpha` selects ARGB565 over RGB565 codes.
pub fn encode_image(
    buf: &DynamicImage,
    compression: Compression,
    has_alpha: bool,
) -> SmawfResult<ImageData> {
    let width = u16::try_from(buf.width()).map_err(|_| {
        SmawfError::validation(format!("image width {} exceeds u16", buf.width()))
    })?;
    let height = u16::try_from(buf.height()).map_err(|_| {
        SmawfError::validation(format!("image height {} exceeds u16", buf.height()))
    })?;

    let pixels = if has_alpha {
        buf.to_rgba8().into_raw()
    } else {
        buf.to_rgb8().into_raw()
    };
    debug_assert_eq!(
        pixels.len(),
        usize::from(width) * usize::from(height) * channels(has_alpha)
    );

    let (w, h) = (usize::from(width), usize::from(height));
    let payload = match compression {
        Compression::Raw => ImagePayload::Raw(raw::encode_raw(&pixels, w, h, has_alpha)),
        Compression::Rle => {
            let (lines, bytes) = rle::compress(&pixels, w, h, has_alpha)?;
            ImagePayload::Rle { lines, bytes }
        }
    };
    Ok(ImageData {
        width,
        height,
        has_alpha,
        payload,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_data.rs"]
mod tests;
