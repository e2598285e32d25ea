//! Fixed-size little-endian records at the front of a watch face container.

pub(crate) mod block;
pub(crate) mod header;
pub(crate) mod metadata;
pub(crate) mod reader;
