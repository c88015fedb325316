//! BMP encoder: uncompressed 24-bit, bottom-up.

use alloc::vec::Vec;
use std::io::Write;

use enough::Stop;

use super::header::{FileHeader, INFO_HEADER_LEN, InfoHeader, PIXEL_DATA_OFFSET, row_padding};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Headers and row geometry for one encode.
pub(crate) struct EncodePlan {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub pad: usize,
}

/// Derive output headers from `image` and an [`InfoHeader`] template.
///
/// Size, geometry and format fields are recomputed; resolution and palette
/// fields come from the template unchanged.
pub(crate) fn plan(image: &PixelBuffer, template: &InfoHeader) -> Result<EncodePlan, BitmapError> {
    let (width, height) = (image.width(), image.height());
    let too_large = BitmapError::DimensionsTooLarge { width, height };

    if width == 0 || height == 0 {
        return Err(BitmapError::UnsupportedDimensions {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        });
    }
    let (Ok(w_i32), Ok(h_i32)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(too_large);
    };

    let w = width as usize;
    let pad = row_padding(w);
    let image_size = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(pad))
        .and_then(|stride| stride.checked_mul(height as usize))
        .and_then(|size| u32::try_from(size).ok())
        .filter(|size| size.checked_add(PIXEL_DATA_OFFSET).is_some())
        .ok_or(too_large)?;

    let info = InfoHeader {
        header_size: INFO_HEADER_LEN as u32,
        width: w_i32,
        height: h_i32,
        planes: 1,
        bit_count: 24,
        compression: 0,
        image_size,
        ..*template
    };

    Ok(EncodePlan {
        file: FileHeader::for_image_size(image_size),
        info,
        pad,
    })
}

/// Stream an encoded BMP into `out`, one row at a time.
pub(crate) fn write_bmp<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    template: &InfoHeader,
    stop: &dyn Stop,
) -> Result<EncodePlan, BitmapError> {
    let plan = plan(image, template)?;
    stop.check()?;

    out.write_all(&plan.file.to_bytes())
        .map_err(BitmapError::WriteFailed)?;
    out.write_all(&plan.info.to_bytes())
        .map_err(BitmapError::WriteFailed)?;

    let mut row_buf = Vec::with_capacity(image.width() as usize * 3 + plan.pad);
    for (i, row) in image.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        row_buf.clear();
        for px in row {
            row_buf.extend_from_slice(&[px.b, px.g, px.r]);
        }
        row_buf.extend(core::iter::repeat_n(0u8, plan.pad));
        out.write_all(&row_buf).map_err(BitmapError::WriteFailed)?;
    }

    Ok(plan)
}

/// Encode into a freshly allocated byte vector.
pub(crate) fn encode_bmp(
    image: &PixelBuffer,
    template: &InfoHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let file_size = plan(image, template)?.file.file_size as usize;
    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|_| BitmapError::OutOfMemory(file_size))?;
    write_bmp(&mut out, image, template, stop)?;
    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}
