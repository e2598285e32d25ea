use serde::Serialize;

use crate::foundation::error::{SmawfError, SmawfResult};
use crate::format::block::BlockInfo;
use crate::format::header::Header;
use crate::format::reader::ByteReader;

/// Header, block table and image-size table.
///
/// The header counts always agree with the table lengths; the only way to get
/// a value is [`WatchFaceMetaData::decode`] or [`WatchFaceMetaData::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WatchFaceMetaData {
    header: Header,
    blocks: Vec<BlockInfo>,
    image_sizes: Vec<u32>,
}

impl WatchFaceMetaData {
    /// Assemble metadata, deriving the header counts from the tables.
    pub fn new(reserved: u8, blocks: Vec<BlockInfo>, image_sizes: Vec<u32>) -> SmawfResult<Self> {
        let block_count = u8::try_from(blocks.len()).map_err(|_| {
            SmawfError::validation(format!("{} blocks exceed the u8 block count", blocks.len()))
        })?;
        let image_size_table_count = u16::try_from(image_sizes.len()).map_err(|_| {
            SmawfError::validation(format!(
                "{} images exceed the u16 size table count",
                image_sizes.len()
            ))
        })?;
        Ok(Self {
            header: Header {
                image_size_table_count,
                block_count,
                reserved,
            },
            blocks,
            image_sizes,
        })
    }

    /// Decode from the start of a container buffer; trailing bytes are ignored.
    pub fn decode(bytes: &[u8]) -> SmawfResult<Self> {
        let mut r = ByteReader::new(bytes, "watch face metadata");
        let header = Header::decode(r.take(Header::SIZE)?)?;

        let total = Self::encoded_len_for(&header);
        if bytes.len() < total {
            return Err(SmawfError::format(format!(
                "metadata declares {} blocks and {} image sizes ({total} bytes), buffer has {}",
                header.block_count,
                header.image_size_table_count,
                bytes.len()
            )));
        }

        let blocks = (0..header.block_count)
            .map(|_| BlockInfo::decode(r.take(BlockInfo::SIZE)?))
            .collect::<SmawfResult<Vec<_>>>()?;
        let image_sizes = (0..header.image_size_table_count)
            .map(|_| r.u32_le())
            .collect::<SmawfResult<Vec<_>>>()?;

        Ok(Self {
            header,
            blocks,
            image_sizes,
        })
    }

    /// Header, blocks and size table concatenated in that order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.header.encode());
        for block in &self.blocks {
            out.extend_from_slice(&block.encode());
        }
        for size in &self.image_sizes {
            out.extend_from_slice(&size.to_le_bytes());
        }
        out
    }

    /// Byte length of [`WatchFaceMetaData::encode`] output.
    pub fn encoded_len(&self) -> usize {
        Self::encoded_len_for(&self.header)
    }

    fn encoded_len_for(header: &Header) -> usize {
        Header::SIZE
            + usize::from(header.block_count) * BlockInfo::SIZE
            + usize::from(header.image_size_table_count) * 4
    }

    /// Container header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Block table in container order.
    pub fn blocks(&self) -> &[BlockInfo] {
        &self.blocks
    }

    /// Encoded byte size of each image, indexed by global image id.
    pub fn image_sizes(&self) -> &[u32] {
        &self.image_sizes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/metadata.rs"]
mod tests;
