//! Decoder for uncompressed, bottom-up, 24-bit BMP.

use enough::Stop;
use rgb::AsPixels as _;
use rgb::RGB8;
use rgb::alt::BGR;

use super::header::{
    FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader, PIXEL_DATA_OFFSET, SIGNATURE,
    row_padding,
};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Move to an absolute offset. Returns false past the end of the data.
    fn set_position(&mut self, pos: usize) -> bool {
        if pos > self.data.len() {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Advance up to `n` bytes; seeking past the end just parks at the end.
    fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        bytes.try_into().ok()
    }

    fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Validated headers of a decodable file.
pub(crate) struct BmpHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub width: u32,
    pub height: u32,
}

/// Parse and validate both headers without touching pixel data.
pub(crate) fn parse_headers(data: &[u8]) -> Result<BmpHeaders, BitmapError> {
    let needed = FILE_HEADER_LEN + INFO_HEADER_LEN;
    let truncated = || BitmapError::TruncatedHeader {
        needed,
        actual: data.len(),
    };

    let mut cur = Cursor::new(data);
    let file = FileHeader::parse(&cur.read_fixed_bytes().ok_or_else(truncated)?);
    let info = InfoHeader::parse(&cur.read_fixed_bytes().ok_or_else(truncated)?);

    if file.signature != SIGNATURE {
        return Err(BitmapError::InvalidSignature(file.signature));
    }

    check_format(&info)?;

    if info.width <= 0 || info.height <= 0 {
        return Err(BitmapError::UnsupportedDimensions {
            width: info.width,
            height: info.height,
        });
    }

    if file.pixel_offset < PIXEL_DATA_OFFSET {
        return Err(BitmapError::InvalidPixelOffset(file.pixel_offset));
    }

    if file.reserved1 != 0 || file.reserved2 != 0 {
        log::warn!(
            "BMP reserved fields are non-zero ({:#06x}, {:#06x}); they will be written as zero",
            file.reserved1,
            file.reserved2
        );
    }

    log::trace!("BMP file header: {file:?}");
    log::trace!("BMP info header: {info:?}");

    Ok(BmpHeaders {
        file,
        info,
        width: info.width as u32,
        height: info.height as u32,
    })
}

fn check_format(info: &InfoHeader) -> Result<(), BitmapError> {
    if info.header_size != INFO_HEADER_LEN as u32 {
        return Err(BitmapError::UnsupportedFormat(alloc::format!(
            "info header size {} (only the 40-byte BITMAPINFOHEADER is supported)",
            info.header_size
        )));
    }
    if info.bit_count != 24 {
        return Err(BitmapError::UnsupportedFormat(alloc::format!(
            "{} bits per pixel (only 24 is supported)",
            info.bit_count
        )));
    }
    if info.compression != 0 {
        return Err(BitmapError::UnsupportedFormat(alloc::format!(
            "compression method {} (only uncompressed is supported)",
            info.compression
        )));
    }
    if info.planes != 1 {
        return Err(BitmapError::UnsupportedFormat(alloc::format!(
            "planes field is {}, expected 1",
            info.planes
        )));
    }
    Ok(())
}

// ── Pixel decoding ──────────────────────────────────────────────────

/// Read every stored row into a top-down buffer.
///
/// Stored row `r` is the visual row `height - 1 - r`. On a short read the
/// partially filled buffer is dropped and `TruncatedPixelData` is returned.
pub(crate) fn decode_pixels(
    data: &[u8],
    headers: &BmpHeaders,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let (width, height) = (headers.width, headers.height);
    let w = width as usize;
    let h = height as usize;
    let row_bytes = w
        .checked_mul(3)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let pad = row_padding(w);

    let expected = (row_bytes + pad).saturating_mul(h);
    if headers.info.image_size != 0 && headers.info.image_size as usize != expected {
        log::warn!(
            "BMP image size field is {} but {w}x{h} needs {expected} bytes",
            headers.info.image_size
        );
    }

    // Find a short file before allocating for it.
    let offset = headers.file.pixel_offset as usize;
    let available = data.len().saturating_sub(offset);
    if offset > data.len() || available < expected - pad {
        let row = match available.checked_sub(row_bytes) {
            Some(rest) => rest / (row_bytes + pad) + 1,
            None => 0,
        };
        return Err(BitmapError::TruncatedPixelData { row });
    }

    let mut image = PixelBuffer::try_zeroed(width, height)?;

    let mut cur = Cursor::new(data);
    if !cur.set_position(offset) {
        return Err(BitmapError::TruncatedPixelData { row: 0 });
    }

    for stored_row in 0..h {
        if stored_row % 16 == 0 {
            stop.check()?;
        }
        let src = cur
            .read_bytes(row_bytes)
            .ok_or(BitmapError::TruncatedPixelData { row: stored_row })?;
        let dst = image.row_mut((h - 1 - stored_row) as u32);
        let bgr: &[BGR<u8>] = src.as_pixels();
        for (out, px) in dst.iter_mut().zip(bgr) {
            *out = RGB8::new(px.r, px.g, px.b);
        }
        cur.skip(pad);
    }

    Ok(image)
}
