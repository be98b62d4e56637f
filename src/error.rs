use alloc::string::String;
use enough::StopReason;

/// Errors from BMP encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("row {row} has {actual} pixels, expected {expected} (all rows must have equal length)")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid dimensions {width}x{height}: width and height must both be at least 1")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid pixel count: provided {provided}, expected {expected}")]
    PixelCountMismatch { provided: usize, expected: usize },

    #[error("buffer size mismatch: need {needed} bytes, got {actual}")]
    BufferSizeMismatch { needed: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
