use enough::Stop;

use crate::bmp::{self, FileHeader, InfoHeader};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Decoded image plus the headers needed to write it back out.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    /// Top-down RGB8 pixels.
    pub image: PixelBuffer,
    /// Info header as read; pass it to an encode as the template.
    pub info: InfoHeader,
    pub file_header: FileHeader,
}

impl DecodeOutput {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Split into the pixel buffer and the encode template.
    pub fn into_parts(self) -> (PixelBuffer, InfoHeader) {
        (self.image, self.info)
    }
}

/// Builder for decoding a BMP held in memory.
///
/// ```no_run
/// use bmpfx::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits::untrusted();
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", decoded.width(), decoded.height());
/// # Ok::<(), bmpfx::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
        bmp::decode(self.data, self.limits, &stop)
    }
}
