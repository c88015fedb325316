//! BITMAPFILEHEADER and BITMAPINFOHEADER records.
//!
//! Every field is read and written explicitly in little-endian order; the
//! in-memory struct layout is never reinterpreted as file bytes.

/// `"BM"`.
pub const SIGNATURE: [u8; 2] = *b"BM";
/// Size of [`FileHeader`] on disk.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of [`InfoHeader`] on disk (BITMAPINFOHEADER).
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the first pixel byte when no palette follows the headers.
pub const PIXEL_DATA_OFFSET: u32 = (FILE_HEADER_LEN + INFO_HEADER_LEN) as u32;

/// 72 DPI expressed in pixels per meter.
const DEFAULT_RESOLUTION: i32 = 2835;

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes as declared by the file.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the first pixel row.
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Header for a file carrying `image_size` bytes of pixel data right after the headers.
    pub fn for_image_size(image_size: u32) -> Self {
        Self {
            signature: SIGNATURE,
            file_size: PIXEL_DATA_OFFSET.saturating_add(image_size),
            reserved1: 0,
            reserved2: 0,
            pixel_offset: PIXEL_DATA_OFFSET,
        }
    }

    pub fn parse(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            pixel_offset: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut b = [0u8; FILE_HEADER_LEN];
        b[0..2].copy_from_slice(&self.signature);
        b[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        b[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        b[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        b[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        b
    }
}

/// The 40-byte BITMAPINFOHEADER.
///
/// Resolution and palette fields are opaque to this crate and pass through
/// an encode untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive means bottom-up storage.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// Pixel data size; may be 0 in files, always recomputed on encode.
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Template for a 24-bit image that did not come from a decode.
    ///
    /// Sides above `i32::MAX` saturate; such images cannot be encoded anyway.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        Self {
            header_size: INFO_HEADER_LEN as u32,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            planes: 1,
            bit_count: 24,
            compression: 0,
            image_size: 0,
            x_pels_per_meter: DEFAULT_RESOLUTION,
            y_pels_per_meter: DEFAULT_RESOLUTION,
            colors_used: 0,
            colors_important: 0,
        }
    }

    pub fn parse(b: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: u32_at(b, 4) as i32,
            height: u32_at(b, 8) as i32,
            planes: u16_at(b, 12),
            bit_count: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pels_per_meter: u32_at(b, 24) as i32,
            y_pels_per_meter: u32_at(b, 28) as i32,
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut b = [0u8; INFO_HEADER_LEN];
        b[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.x_pels_per_meter.to_le_bytes());
        b[28..32].copy_from_slice(&self.y_pels_per_meter.to_le_bytes());
        b[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        b[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        b
    }
}

/// Zero bytes needed after `width * 3` pixel bytes to reach a multiple of 4.
pub fn row_padding(width: usize) -> usize {
    (4 - (width % 4) * 3 % 4) % 4
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header_layout() {
        let fh = FileHeader::for_image_size(16);
        let b = fh.to_bytes();
        assert_eq!(&b[0..2], b"BM");
        assert_eq!(&b[2..6], &70u32.to_le_bytes());
        assert_eq!(&b[6..10], &[0, 0, 0, 0]);
        assert_eq!(&b[10..14], &54u32.to_le_bytes());
        assert_eq!(FileHeader::parse(&b), fh);
    }

    #[test]
    fn info_header_signed_fields() {
        let mut ih = InfoHeader::for_dimensions(3, 2);
        ih.height = -2;
        ih.x_pels_per_meter = -1;
        let b = ih.to_bytes();
        assert_eq!(&b[8..12], &[0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(&b[24..28], &[0xff, 0xff, 0xff, 0xff]);
        let back = InfoHeader::parse(&b);
        assert_eq!(back.height, -2);
        assert_eq!(back.x_pels_per_meter, -1);
        assert_eq!(back, ih);
    }

    #[test]
    fn info_header_field_offsets() {
        let ih = InfoHeader::for_dimensions(0x0102, 0x0304);
        let b = ih.to_bytes();
        assert_eq!(&b[0..4], &40u32.to_le_bytes());
        assert_eq!(&b[4..8], &[0x02, 0x01, 0, 0]);
        assert_eq!(&b[8..12], &[0x04, 0x03, 0, 0]);
        assert_eq!(&b[12..14], &[1, 0]);
        assert_eq!(&b[14..16], &[24, 0]);
        assert_eq!(&b[24..28], &2835u32.to_le_bytes());
    }

    #[test]
    fn oversized_dimensions_saturate() {
        let ih = InfoHeader::for_dimensions(u32::MAX, 1 << 31);
        assert_eq!(ih.width, i32::MAX);
        assert_eq!(ih.height, i32::MAX);
        let ih = InfoHeader::for_dimensions(i32::MAX as u32, 7);
        assert_eq!((ih.width, ih.height), (i32::MAX, 7));
    }

    #[test]
    fn padding_table() {
        assert_eq!(row_padding(0), 0);
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
    }
}
