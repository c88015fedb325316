use alloc::vec::Vec;
use std::io::Write;

use enough::Stop;

use crate::bmp::{self, InfoHeader};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Builder for encoding a [`PixelBuffer`] as 24-bit BMP.
///
/// Without a template the output gets 72 DPI and no palette fields; with
/// [`with_info`](Self::with_info) the resolution and colour-count fields
/// of a decoded file are carried over.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest<'a> {
    info: Option<&'a InfoHeader>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `info` as the template for pass-through header fields.
    pub fn with_info(mut self, info: &'a InfoHeader) -> Self {
        self.info = Some(info);
        self
    }

    fn template(&self, image: &PixelBuffer) -> InfoHeader {
        match self.info {
            Some(info) => *info,
            None => InfoHeader::for_dimensions(image.width(), image.height()),
        }
    }

    /// Encode to a byte vector.
    pub fn encode(&self, image: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        bmp::encode(image, &self.template(image), &stop)
    }

    /// Encode into `out`. Write errors surface as [`BitmapError::WriteFailed`].
    pub fn encode_to<W: Write>(
        &self,
        out: &mut W,
        image: &PixelBuffer,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        bmp::encode_to(out, image, &self.template(image), &stop)
    }
}
