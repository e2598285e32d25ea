use image::DynamicImage;
use rayon::prelude::*;

use crate::codec::image_data::{ImageData, decode_image, encode_image};
use crate::foundation::error::{SmawfError, SmawfResult};
use crate::format::block::BlockInfo;
use crate::format::header::Header;
use crate::format::metadata::WatchFaceMetaData;

/// Metadata plus every image payload, ordered by global image id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchFace {
    metadata: WatchFaceMetaData,
    images: Vec<ImageData>,
}

/// Controls how [`WatchFace::decode_images`] fans out.
#[derive(Clone, Debug, Default)]
pub struct DecodeOpts {
    /// Decode images on a rayon pool when `true`.
    pub parallel: bool,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// A block template and the pixel images it should own; input to
/// [`WatchFace::from_layers`].
#[derive(Clone, Debug)]
pub struct Layer {
    /// Role, position, alignment, compression, alpha and pivot. Offsets, ids,
    /// counts and dimensions are recomputed.
    pub block: BlockInfo,
    /// Images in sub-image order; all must share one size.
    pub images: Vec<DynamicImage>,
}

impl WatchFace {
    /// Parse a complete container.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> SmawfResult<Self> {
        let metadata = WatchFaceMetaData::decode(bytes)?;
        let sizes = metadata.image_sizes();
        let mut slots: Vec<Option<ImageData>> = vec![None; sizes.len()];

        for (block_idx, block) in metadata.blocks().iter().enumerate() {
            let mut offset = block.image_byte_offset as usize;
            for id in block.image_ids() {
                let size = *sizes.get(id).ok_or_else(|| {
                    SmawfError::format(format!(
                        "block {block_idx} references image {id}, size table has {} entries",
                        sizes.len()
                    ))
                })? as usize;
                let end = offset.checked_add(size).filter(|&e| e <= bytes.len());
                let span = end.map(|e| &bytes[offset..e]).ok_or_else(|| {
                    SmawfError::format(format!(
                        "image {id} spans {size} bytes at offset {offset}, container has {}",
                        bytes.len()
                    ))
                })?;

                let img = ImageData::from_bytes(
                    span,
                    block.compression,
                    block.width,
                    block.height,
                    block.has_alpha,
                )?;
                if slots[id].replace(img).is_some() {
                    return Err(SmawfError::format(format!(
                        "image {id} is claimed by more than one block"
                    )));
                }
                offset += size;
            }
            tracing::debug!(
                block = block_idx,
                role = ?block.role,
                images = block.image_count,
                "decoded block"
            );
        }

        let images = slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| {
                slot.ok_or_else(|| {
                    SmawfError::format(format!("image {id} is not owned by any block"))
                })
            })
            .collect::<SmawfResult<Vec<_>>>()?;

        Ok(Self { metadata, images })
    }

    /// Pair metadata with images, checking the size table and block ids agree.
    pub fn new(metadata: WatchFaceMetaData, images: Vec<ImageData>) -> SmawfResult<Self> {
        let sizes = metadata.image_sizes();
        if sizes.len() != images.len() {
            return Err(SmawfError::validation(format!(
                "size table has {} entries, got {} images",
                sizes.len(),
                images.len()
            )));
        }
        for (id, (size, img)) in sizes.iter().zip(&images).enumerate() {
            if *size as usize != img.encoded_len() {
                return Err(SmawfError::validation(format!(
                    "image {id} is {} bytes, size table says {size}",
                    img.encoded_len()
                )));
            }
        }
        for block in metadata.blocks() {
            if block.image_ids().end > images.len() {
                return Err(SmawfError::validation(format!(
                    "block {:?} references images {:?}, only {} present",
                    block.role,
                    block.image_ids(),
                    images.len()
                )));
            }
        }
        Ok(Self { metadata, images })
    }

    /// Metadata followed by every image payload in id order.
    #[tracing::instrument(skip(self))]
    pub fn encode(&self) -> Vec<u8> {
        let total =
            self.metadata.encoded_len() + self.images.iter().map(ImageData::encoded_len).sum::<usize>();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&self.metadata.encode());
        for img in &self.images {
            out.extend_from_slice(img.as_bytes());
        }
        out
    }

    /// Replace every image payload, keeping roles, positions and pivots.
    ///
    /// Each block takes dimensions, compression and alpha from its new images;
    /// offsets and the size table are recomputed.
    pub fn with_images(&self, images: Vec<ImageData>) -> SmawfResult<Self> {
        if images.len() != self.images.len() {
            return Err(SmawfError::validation(format!(
                "face has {} images, got {}",
                self.images.len(),
                images.len()
            )));
        }
        let blocks = self
            .metadata
            .blocks()
            .iter()
            .map(|block| {
                let owned = &images[block.image_ids()];
                match owned.first() {
                    Some(first) => {
                        if let Some(bad) = owned.iter().find(|img| {
                            (img.width(), img.height(), img.has_alpha(), img.compression())
                                != (first.width(), first.height(), first.has_alpha(), first.compression())
                        }) {
                            return Err(SmawfError::validation(format!(
                                "block {:?}: image {}x{} differs from {}x{} (size, alpha or compression)",
                                block.role,
                                bad.width(),
                                bad.height(),
                                first.width(),
                                first.height()
                            )));
                        }
                        Ok(BlockInfo {
                            width: first.width(),
                            height: first.height(),
                            has_alpha: first.has_alpha(),
                            compression: first.compression(),
                            ..*block
                        })
                    }
                    None => Ok(*block),
                }
            })
            .collect::<SmawfResult<Vec<_>>>()?;

        assemble(self.metadata.header().reserved, blocks, images)
    }

    /// Build a fresh container from block templates and pixel images.
    ///
    /// Image ids are assigned contiguously in layer order; every image is
    /// encoded with its block's compression and alpha flag.
    #[tracing::instrument(skip(layers), fields(layers = layers.len()))]
    pub fn from_layers(reserved: u8, layers: Vec<Layer>) -> SmawfResult<Self> {
        let mut blocks = Vec::with_capacity(layers.len());
        let mut images = Vec::new();

        for layer in layers {
            let first_image_id = u16::try_from(images.len())
                .map_err(|_| SmawfError::validation("more than 65535 images"))?;
            let image_count = u8::try_from(layer.images.len()).map_err(|_| {
                SmawfError::validation(format!(
                    "block {:?} has {} images, limit is 255",
                    layer.block.role,
                    layer.images.len()
                ))
            })?;

            let mut block = BlockInfo {
                first_image_id,
                image_count,
                ..layer.block
            };
            for img in &layer.images {
                let data = encode_image(img, block.compression, block.has_alpha)?;
                if images.len() > usize::from(first_image_id)
                    && (data.width(), data.height()) != (block.width, block.height)
                {
                    return Err(SmawfError::validation(format!(
                        "block {:?} mixes image sizes {}x{} and {}x{}",
                        block.role,
                        block.width,
                        block.height,
                        data.width(),
                        data.height()
                    )));
                }
                block.width = data.width();
                block.height = data.height();
                images.push(data);
            }
            blocks.push(block);
        }

        assemble(reserved, blocks, images)
    }

    /// Decode every image to pixels, in global image id order.
    #[tracing::instrument(skip(self), fields(images = self.images.len()))]
    pub fn decode_images(&self, opts: &DecodeOpts) -> SmawfResult<Vec<DynamicImage>> {
        if !opts.parallel {
            return self.images.iter().map(decode_image).collect();
        }
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| self.images.par_iter().map(decode_image).collect())
    }

    /// Container metadata.
    pub fn metadata(&self) -> &WatchFaceMetaData {
        &self.metadata
    }

    /// Block table, shorthand for `metadata().blocks()`.
    pub fn blocks(&self) -> &[BlockInfo] {
        self.metadata.blocks()
    }

    /// Every image, indexed by global image id.
    pub fn images(&self) -> &[ImageData] {
        &self.images
    }

    /// Images owned by the block at `block_index`.
    pub fn block_images(&self, block_index: usize) -> Option<&[ImageData]> {
        let block = self.metadata.blocks().get(block_index)?;
        self.images.get(block.image_ids())
    }
}

/// Recompute the size table and absolute offsets, then pair with images.
fn assemble(reserved: u8, blocks: Vec<BlockInfo>, images: Vec<ImageData>) -> SmawfResult<WatchFace> {
    let sizes = images
        .iter()
        .enumerate()
        .map(|(id, img)| {
            u32::try_from(img.encoded_len())
                .map_err(|_| SmawfError::validation(format!("image {id} exceeds 4 GiB")))
        })
        .collect::<SmawfResult<Vec<_>>>()?;

    let metadata_len = Header::SIZE + blocks.len() * BlockInfo::SIZE + sizes.len() * 4;
    // Payloads are written in id order, so a block's offset is the prefix sum
    // of every lower id.
    let mut prefix = Vec::with_capacity(sizes.len() + 1);
    let mut running = metadata_len as u64;
    prefix.push(running);
    for size in &sizes {
        running += u64::from(*size);
        prefix.push(running);
    }

    let blocks = blocks
        .into_iter()
        .map(|block| {
            let start = *prefix.get(usize::from(block.first_image_id)).ok_or_else(|| {
                SmawfError::validation(format!(
                    "block {:?} starts at image {}, only {} images",
                    block.role,
                    block.first_image_id,
                    sizes.len()
                ))
            })?;
            let image_byte_offset = u32::try_from(start).map_err(|_| {
                SmawfError::validation(format!("block {:?} offset exceeds 4 GiB", block.role))
            })?;
            Ok(BlockInfo {
                image_byte_offset,
                ..block
            })
        })
        .collect::<SmawfResult<Vec<_>>>()?;

    WatchFace::new(WatchFaceMetaData::new(reserved, blocks, sizes)?, images)
}

fn build_thread_pool(threads: Option<usize>) -> SmawfResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SmawfError::validation(
            "decode 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SmawfError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/container/watch_face.rs"]
mod tests;
