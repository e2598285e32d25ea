//! Pixel payload codecs for the two supported compression modes.

pub(crate) mod color;
pub(crate) mod image_data;
pub(crate) mod raw;
pub(crate) mod rle;
