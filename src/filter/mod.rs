//! In-place pixel transforms: luma grayscale and 3x3 convolution.
//!
//! Both take the image by `&mut` and finish before returning; convolution
//! works from a private copy of the intensity plane so it never reads a
//! half-written result.

mod convolve;
mod grayscale;

pub use convolve::{Kernel, KernelPreset, convolve, try_convolve};
pub use grayscale::{grayscale, luma};

/// `trunc(v + 0.5)` clamped to a byte, computed in `f64` (grayscale).
///
/// Values below -0.5 truncate toward zero and then clamp to 0; NaN maps to 0.
#[inline]
pub(crate) fn round_f64_to_u8(v: f64) -> u8 {
    ((v + 0.5) as i64).clamp(0, 255) as u8
}

/// The same rule as [`round_f64_to_u8`], with the `+ 0.5` done in `f32`
/// (convolution). Widening first could round a value just below `n + 0.5`
/// differently.
#[inline]
pub(crate) fn round_f32_to_u8(v: f32) -> u8 {
    ((v + 0.5) as i64).clamp(0, 255) as u8
}
