use std::ops::Range;

use serde::Serialize;

use crate::foundation::error::{SmawfError, SmawfResult};
use crate::format::reader::ByteReader;

/// Semantic purpose of a block; drives preview compositing.
///
/// Codes are the low 7 bits of the role byte. Bit 7 carries the alpha flag
/// and is never part of the role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum BlockRole {
    Preview = 0x01,
    Background = 0x02,
    HourArm = 0x03,
    MinuteArm = 0x04,
    SecondArm = 0x05,
    DateYear = 0x06,
    DateDay = 0x07,
    DateMonth = 0x08,
    Hours = 0x09,
    Minutes = 0x0A,
    Seconds = 0x0B,
    AmPm = 0x0C,
    WeekDay = 0x0D,
    Steps = 0x0E,
    HeartRate = 0x0F,
    Calories = 0x10,
    Distance = 0x11,
    StepsStrip = 0x12,
    HeartRateStrip = 0x13,
    CaloriesStrip = 0x14,
    DistanceStrip = 0x15,
    BackgroundPiece = 0x16,
    Animation = 0x17,
    Battery = 0x18,
    BatteryStrip = 0x19,
    Weather = 0x1A,
    DistanceLabel = 0x25,
}

impl BlockRole {
    /// Every known role, in code order.
    pub const ALL: [BlockRole; 27] = [
        Self::Preview,
        Self::Background,
        Self::HourArm,
        Self::MinuteArm,
        Self::SecondArm,
        Self::DateYear,
        Self::DateDay,
        Self::DateMonth,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::AmPm,
        Self::WeekDay,
        Self::Steps,
        Self::HeartRate,
        Self::Calories,
        Self::Distance,
        Self::StepsStrip,
        Self::HeartRateStrip,
        Self::CaloriesStrip,
        Self::DistanceStrip,
        Self::BackgroundPiece,
        Self::Animation,
        Self::Battery,
        Self::BatteryStrip,
        Self::Weather,
        Self::DistanceLabel,
    ];

    /// 7-bit wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a 7-bit wire code; unknown codes are rejected.
    pub fn from_code(code: u8) -> SmawfResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.code() == code)
            .ok_or_else(|| SmawfError::format(format!("unknown block role 0x{code:02x}")))
    }
}

/// Horizontal anchoring of multi-glyph digit blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Unspecified,
}

impl Alignment {
    /// Wire code.
    pub fn code(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
            Self::Unspecified => 3,
        }
    }

    /// Look up a wire code; unknown codes are rejected.
    pub fn from_code(code: u8) -> SmawfResult<Self> {
        match code {
            0 => Ok(Self::Left),
            1 => Ok(Self::Center),
            2 => Ok(Self::Right),
            3 => Ok(Self::Unspecified),
            _ => Err(SmawfError::format(format!(
                "unknown block alignment 0x{code:02x}"
            ))),
        }
    }
}

/// Pixel payload encoding of every image in a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    /// Row-padded packed RGB565 / ARGB565.
    Raw,
    /// Scanline run-length encoding.
    Rle,
}

impl Compression {
    /// Wire code.
    pub fn code(self) -> u8 {
        match self {
            Self::Raw => 0x00,
            Self::Rle => 0x04,
        }
    }

    /// Look up a wire code; anything else is [`SmawfError::UnsupportedCompression`].
    pub fn from_code(code: u8) -> SmawfResult<Self> {
        match code {
            0x00 => Ok(Self::Raw),
            0x04 => Ok(Self::Rle),
            other => Err(SmawfError::UnsupportedCompression(other)),
        }
    }
}

/// One positioned, rectangular block of images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BlockInfo {
    /// Absolute offset from the start of the container to the first payload.
    pub image_byte_offset: u32,
    /// Global id of the first image; the block owns `image_count` consecutive ids.
    pub first_image_id: u16,
    /// Width of every image in the block.
    pub width: u16,
    /// Height of every image in the block.
    pub height: u16,
    /// Left edge in face coordinates.
    pub pos_x: u16,
    /// Top edge in face coordinates.
    pub pos_y: u16,
    /// Number of images owned by the block.
    pub image_count: u8,
    /// Semantic role.
    pub role: BlockRole,
    /// Images carry an 8-bit alpha byte per pixel.
    pub has_alpha: bool,
    /// Digit anchoring.
    pub alignment: Alignment,
    /// Payload encoding.
    pub compression: Compression,
    /// Rotation pivot, measured up from the bottom edge.
    pub pivot_y: u8,
    /// Rotation pivot, measured left from the right edge.
    pub pivot_x: u8,
}

const ALPHA_BIT: u8 = 0x80;

impl BlockInfo {
    /// Encoded size in bytes.
    pub const SIZE: usize = 20;

    /// Decode exactly [`BlockInfo::SIZE`] bytes.
    pub fn decode(bytes: &[u8]) -> SmawfResult<Self> {
        if bytes.len() != Self::SIZE {
            return Err(SmawfError::format(format!(
                "block info must be {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        let mut r = ByteReader::new(bytes, "block info");
        let image_byte_offset = r.u32_le()?;
        let first_image_id = r.u16_le()?;
        let width = r.u16_le()?;
        let height = r.u16_le()?;
        let pos_x = r.u16_le()?;
        let pos_y = r.u16_le()?;
        let image_count = r.u8()?;
        let role_and_alpha = r.u8()?;
        let alignment = Alignment::from_code(r.u8()?)?;
        let compression = Compression::from_code(r.u8()?)?;
        let pivot_y = r.u8()?;
        let pivot_x = r.u8()?;

        Ok(Self {
            image_byte_offset,
            first_image_id,
            width,
            height,
            pos_x,
            pos_y,
            image_count,
            role: BlockRole::from_code(role_and_alpha & !ALPHA_BIT)?,
            has_alpha: role_and_alpha & ALPHA_BIT != 0,
            alignment,
            compression,
            pivot_y,
            pivot_x,
        })
    }

    /// Encode to the on-disk layout.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.image_byte_offset.to_le_bytes());
        out[4..6].copy_from_slice(&self.first_image_id.to_le_bytes());
        out[6..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..10].copy_from_slice(&self.height.to_le_bytes());
        out[10..12].copy_from_slice(&self.pos_x.to_le_bytes());
        out[12..14].copy_from_slice(&self.pos_y.to_le_bytes());
        out[14] = self.image_count;
        out[15] = self.role.code() | if self.has_alpha { ALPHA_BIT } else { 0 };
        out[16] = self.alignment.code();
        out[17] = self.compression.code();
        out[18] = self.pivot_y;
        out[19] = self.pivot_x;
        out
    }

    /// Global image ids owned by this block.
    pub fn image_ids(&self) -> Range<usize> {
        let first = usize::from(self.first_image_id);
        first..first + usize::from(self.image_count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/block.rs"]
mod tests;
