pub(crate) mod config;
pub(crate) mod digits;
pub(crate) mod frame;
pub(crate) mod handlers;
pub(crate) mod render;
pub(crate) mod rotate;
