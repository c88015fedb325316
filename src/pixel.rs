use alloc::vec;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::error::BitmapError;

/// Top-down, row-major RGB8 image.
///
/// Row 0 is the visual top row regardless of how the file stored it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<RGB8>,
}

impl PixelBuffer {
    /// Black image of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![RGB8::default(); len],
        })
    }

    /// Wrap existing pixels. `pixels.len()` must be exactly `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<RGB8>) -> Result<Self, BitmapError> {
        let needed = pixel_count(width, height)?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> RGB8,
    ) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a zeroed buffer, reporting allocation failure instead of aborting.
    pub(crate) fn try_zeroed(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| BitmapError::OutOfMemory(len.saturating_mul(3)))?;
        pixels.resize(len, RGB8::default());
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, top row first.
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [RGB8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGB8> {
        self.pixels
    }

    /// Row `y`, counted from the visual top. Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[RGB8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [RGB8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.pixels[start..start + w]
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<RGB8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Set pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, px: RGB8) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = px;
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[RGB8]> + ExactSizeIterator {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Whether every pixel already has R = G = B.
    pub fn is_gray(&self) -> bool {
        self.pixels.iter().all(|p| p.r == p.g && p.g == p.b)
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGB8> {
        imgref::ImgRef::new(&self.pixels[..], self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGB8> {
        imgref::ImgVec::new(
            self.pixels.clone(),
            self.width as usize,
            self.height as usize,
        )
    }
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgRef<'_, RGB8>> for PixelBuffer {
    type Error = BitmapError;

    /// Copies the visible area, dropping any stride padding.
    fn try_from(img: imgref::ImgRef<'_, RGB8>) -> Result<Self, BitmapError> {
        let width = u32::try_from(img.width()).map_err(|_| too_large(img.width(), img.height()))?;
        let height =
            u32::try_from(img.height()).map_err(|_| too_large(img.width(), img.height()))?;
        Self::from_pixels(width, height, img.pixels().collect())
    }
}

#[cfg(feature = "imgref")]
fn too_large(width: usize, height: usize) -> BitmapError {
    BitmapError::DimensionsTooLarge {
        width: width.min(u32::MAX as usize) as u32,
        height: height.min(u32::MAX as usize) as u32,
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
