//! Uncompressed 24-bit BMP (BITMAPINFOHEADER) decoder and encoder.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc. This
//! module exposes the header records for callers that need to inspect or
//! build them.

mod decode;
mod encode;
mod header;

pub use header::{
    FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader, PIXEL_DATA_OFFSET, SIGNATURE,
    row_padding,
};

use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use alloc::vec::Vec;
use enough::Stop;
use std::io::Write;

/// Decode BMP data to a top-down RGB8 buffer.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    let headers = decode::parse_headers(data)?;
    if let Some(limits) = limits {
        limits.check(headers.width, headers.height)?;
    }
    stop.check()?;
    let image = decode::decode_pixels(data, &headers, stop)?;
    log::debug!(
        "decoded {}x{} BMP ({} bytes)",
        headers.width,
        headers.height,
        data.len()
    );
    Ok(DecodeOutput {
        image,
        info: headers.info,
        file_header: headers.file,
    })
}

/// Validate and return both headers without decoding pixels.
pub(crate) fn probe(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let headers = decode::parse_headers(data)?;
    Ok((headers.file, headers.info))
}

/// Encode to an in-memory BMP.
pub(crate) fn encode(
    image: &PixelBuffer,
    template: &InfoHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let out = encode::encode_bmp(image, template, stop)?;
    log::debug!(
        "encoded {}x{} BMP ({} bytes)",
        image.width(),
        image.height(),
        out.len()
    );
    Ok(out)
}

/// Encode straight into a writer.
pub(crate) fn encode_to<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    template: &InfoHeader,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let plan = encode::write_bmp(out, image, template, stop)?;
    log::debug!(
        "wrote {}x{} BMP ({} bytes)",
        image.width(),
        image.height(),
        plan.file.file_size
    );
    Ok(())
}
