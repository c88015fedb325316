//! # bmpfx
//!
//! Uncompressed 24-bit BMP decoder and encoder, plus two in-place filters:
//! luma grayscale and 3x3 convolution.
//!
//! ## Pixel model
//!
//! Decoding produces a [`PixelBuffer`]: `width x height` [`rgb::RGB8`]
//! pixels, row 0 at the visual top. BMP stores rows bottom-up in BGR order
//! with each row padded to a multiple of 4 bytes; the codec undoes all of
//! that on decode and redoes it on encode.
//!
//! ## Supported files
//!
//! - 14-byte `BM` file header + 40-byte BITMAPINFOHEADER
//! - 24 bits per pixel, uncompressed, one plane
//! - positive width and height (bottom-up storage)
//!
//! Everything else (palettes, bitfields, RLE, alpha, top-down, V4/V5
//! headers) is rejected with a specific [`BitmapError`].
//!
//! ## Filters
//!
//! - [`grayscale`]: `0.299 R + 0.587 G + 0.114 B`, rounded half up.
//! - [`convolve`]: 3x3 kernel over the red channel, normalised by the
//!   weight sum (1.0 when the weights sum to zero), border pixels copied.
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{Kernel, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let decoded = bmpfx::decode_bmp(data, Unstoppable)?;
//! let (mut image, info) = decoded.into_parts();
//!
//! bmpfx::grayscale(&mut image);
//! bmpfx::convolve(&mut image, &Kernel::VERTICAL_EDGE);
//!
//! let encoded = bmpfx::encode_bmp(&image, &info, Unstoppable)?;
//! # let _ = encoded;
//! # Ok::<(), bmpfx::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod io;
mod limits;
mod pixel;

pub mod bmp;
pub mod filter;
pub mod pipeline;

// Re-exports
pub use bmp::{FileHeader, InfoHeader};
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use filter::{Kernel, KernelPreset, convolve, grayscale, luma, try_convolve};
pub use io::{load_image, save_image};
pub use limits::Limits;
pub use pipeline::{Operation, Request};
pub use pixel::PixelBuffer;
pub use rgb::RGB8;

use alloc::vec::Vec;

/// Decode a BMP held in memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode `image` as 24-bit BMP, carrying pass-through fields from `info`.
pub fn encode_bmp(
    image: &PixelBuffer,
    info: &InfoHeader,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().with_info(info).encode(image, stop)
}

/// Validate the headers of a BMP without decoding its pixels.
pub fn probe(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    bmp::probe(data)
}
