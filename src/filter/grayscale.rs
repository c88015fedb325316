use rgb::RGB8;

use crate::pixel::PixelBuffer;

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Rec. 601 luma of one pixel, rounded half up.
#[inline]
pub fn luma(px: RGB8) -> u8 {
    super::round_f64_to_u8(
        LUMA_R * f64::from(px.r) + LUMA_G * f64::from(px.g) + LUMA_B * f64::from(px.b),
    )
}

/// Replace every pixel with its luma in all three channels.
///
/// Idempotent: a gray pixel maps to itself.
pub fn grayscale(image: &mut PixelBuffer) {
    for px in image.pixels_mut() {
        let y = luma(*px);
        *px = RGB8::new(y, y, y);
    }
}
