use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("cannot open {path}: {source}")]
    IoOpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("truncated header: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },

    #[error("invalid signature {0:02x?}, expected \"BM\"")]
    InvalidSignature([u8; 2]),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: i32, height: i32 },

    #[error("pixel data offset {0} overlaps the headers")]
    InvalidPixelOffset(u32),

    #[error("truncated pixel data at stored row {row}")]
    TruncatedPixelData { row: usize },

    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("out of memory allocating {0} bytes")]
    OutOfMemory(usize),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("unknown kernel preset: {0:?}")]
    UnknownKernel(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
