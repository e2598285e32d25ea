use serde::Serialize;

use crate::foundation::error::{SmawfError, SmawfResult};
use crate::format::reader::ByteReader;

/// Container header: counts for the two tables that follow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Header {
    /// Number of `u32` entries in the image-size table.
    pub image_size_table_count: u16,
    /// Number of [`BlockInfo`](crate::BlockInfo) records.
    pub block_count: u8,
    /// Opaque byte, preserved as read.
    pub reserved: u8,
}

impl Header {
    /// Encoded size in bytes.
    pub const SIZE: usize = 4;

    /// Decode exactly [`Header::SIZE`] bytes.
    pub fn decode(bytes: &[u8]) -> SmawfResult<Self> {
        if bytes.len() != Self::SIZE {
            return Err(SmawfError::format(format!(
                "header must be {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        let mut r = ByteReader::new(bytes, "header");
        Ok(Self {
            image_size_table_count: r.u16_le()?,
            block_count: r.u8()?,
            reserved: r.u8()?,
        })
    }

    /// Encode to the on-disk layout.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let count = self.image_size_table_count.to_le_bytes();
        [count[0], count[1], self.block_count, self.reserved]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/header.rs"]
mod tests;
