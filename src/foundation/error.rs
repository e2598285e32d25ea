/// Convenience result type used across smawf.
pub type SmawfResult<T> = Result<T, SmawfError>;

/// Top-level error taxonomy used by codec, container and preview APIs.
#[derive(thiserror::Error, Debug)]
pub enum SmawfError {
    /// Corrupt or truncated container data.
    #[error("format error: {0}")]
    Format(String),

    /// Image compression mode other than raw (`0x00`) or RLE (`0x04`).
    #[error("format error: unsupported compression mode 0x{0:02x}")]
    UnsupportedCompression(u8),

    /// Caller-provided data that cannot be represented in the container.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SmawfError {
    /// Build a [`SmawfError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`SmawfError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for every error that means "this file is corrupt or unsupported".
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::UnsupportedCompression(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
