use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use rgb::RGB8;

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// A 3x3 grid of weights, row-major, `weights[dy + 1][dx + 1]`.
///
/// Kernels carry no normalisation of their own; [`convolve`] divides by
/// [`Kernel::normalization`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel {
    weights: [[f32; 3]; 3],
}

impl Kernel {
    /// Horizontal gradient (responds to vertical edges).
    pub const VERTICAL_EDGE: Kernel =
        Kernel::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);

    /// Vertical gradient (responds to horizontal edges).
    pub const HORIZONTAL_EDGE: Kernel =
        Kernel::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]);

    /// Isotropic second derivative (4-neighbour Laplacian).
    pub const ISOTROPIC: Kernel =
        Kernel::from_rows([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]]);

    pub const fn from_rows(weights: [[f32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Nine weights in row-major order.
    pub const fn from_weights(w: [f32; 9]) -> Self {
        Self::from_rows([[w[0], w[1], w[2]], [w[3], w[4], w[5]], [w[6], w[7], w[8]]])
    }

    pub fn rows(&self) -> &[[f32; 3]; 3] {
        &self.weights
    }

    /// The named preset with exactly these weights, if any.
    pub fn preset(&self) -> Option<KernelPreset> {
        KernelPreset::ALL.into_iter().find(|p| p.kernel() == *self)
    }

    /// Sum of all nine weights, accumulated row by row.
    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }

    /// Divisor applied to every weighted sum: [`sum`](Self::sum), or 1.0
    /// when the weights sum to exactly zero (gradient and Laplacian kernels).
    pub fn normalization(&self) -> f32 {
        let sum = self.sum();
        if sum == 0.0 { 1.0 } else { sum }
    }
}

impl From<KernelPreset> for Kernel {
    fn from(preset: KernelPreset) -> Self {
        preset.kernel()
    }
}

/// Named kernels selectable by string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelPreset {
    /// `"vertical-edge"`, see [`Kernel::VERTICAL_EDGE`].
    VerticalEdge,
    /// `"horizontal-edge"`, see [`Kernel::HORIZONTAL_EDGE`].
    HorizontalEdge,
    /// `"isotropic"`, see [`Kernel::ISOTROPIC`].
    Isotropic,
}

impl KernelPreset {
    pub const ALL: [KernelPreset; 3] = [Self::VerticalEdge, Self::HorizontalEdge, Self::Isotropic];

    pub fn kernel(self) -> Kernel {
        match self {
            Self::VerticalEdge => Kernel::VERTICAL_EDGE,
            Self::HorizontalEdge => Kernel::HORIZONTAL_EDGE,
            Self::Isotropic => Kernel::ISOTROPIC,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::VerticalEdge => "vertical-edge",
            Self::HorizontalEdge => "horizontal-edge",
            Self::Isotropic => "isotropic",
        }
    }
}

impl fmt::Display for KernelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelPreset {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BitmapError::UnknownKernel(s.into()))
    }
}

/// Convolve the red channel with `kernel` and write the result to R, G and B.
///
/// The red channel is the authoritative intensity source, so run
/// [`grayscale`](super::grayscale) first on colour input. Pixels on the
/// outermost rows and columns are copied through unchanged; images narrower
/// or shorter than 3 pixels have no interior and only get R copied to G and B.
pub fn convolve(image: &mut PixelBuffer, kernel: &Kernel) {
    let src: Vec<u8> = image.pixels().iter().map(|p| p.r).collect();
    let mut dst = src.clone();
    apply(image, kernel, &src, &mut dst);
}

/// Like [`convolve`], but reports scratch allocation failure as
/// [`BitmapError::OutOfMemory`] and leaves `image` untouched in that case.
pub fn try_convolve(image: &mut PixelBuffer, kernel: &Kernel) -> Result<(), BitmapError> {
    let len = image.pixels().len();
    let mut src = Vec::new();
    let mut dst = Vec::new();
    src.try_reserve_exact(len)
        .and_then(|()| dst.try_reserve_exact(len))
        .map_err(|_| BitmapError::OutOfMemory(len.saturating_mul(2)))?;
    src.extend(image.pixels().iter().map(|p| p.r));
    dst.extend_from_slice(&src);
    apply(image, kernel, &src, &mut dst);
    Ok(())
}

/// `dst` must start as a copy of `src`; its border is never written.
fn apply(image: &mut PixelBuffer, kernel: &Kernel, src: &[u8], dst: &mut [u8]) {
    let (w, h) = (image.width() as usize, image.height() as usize);
    convolve_plane(src, dst, w, h, kernel);
    for (px, &v) in image.pixels_mut().iter_mut().zip(dst.iter()) {
        *px = RGB8::new(v, v, v);
    }
    log::trace!(
        "convolved {w}x{h} plane, normalization {}",
        kernel.normalization()
    );
}

fn convolve_plane(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &Kernel) {
    if width < 3 || height < 3 {
        return;
    }
    let norm = kernel.normalization();
    for y in 1..height - 1 {
        let window = [
            &src[(y - 1) * width..y * width],
            &src[y * width..(y + 1) * width],
            &src[(y + 1) * width..(y + 2) * width],
        ];
        let out = &mut dst[y * width..(y + 1) * width];
        for x in 1..width - 1 {
            let mut acc = 0.0f32;
            for (row, weights) in window.iter().zip(kernel.rows()) {
                for (dx, &k) in weights.iter().enumerate() {
                    acc += f32::from(row[x + dx - 1]) * k;
                }
            }
            out[x] = super::round_f32_to_u8(acc / norm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(width: u32, height: u32, values: &[u8]) -> PixelBuffer {
        PixelBuffer::from_pixels(
            width,
            height,
            values.iter().map(|&v| RGB8::new(v, v, v)).collect(),
        )
        .unwrap()
    }

    fn reds(image: &PixelBuffer) -> Vec<u8> {
        image.pixels().iter().map(|p| p.r).collect()
    }

    #[test]
    fn zero_sum_kernels_normalize_by_one() {
        for preset in KernelPreset::ALL {
            assert_eq!(preset.kernel().sum(), 0.0, "{preset}");
            assert_eq!(preset.kernel().normalization(), 1.0, "{preset}");
        }
        let blur = Kernel::from_weights([1.0; 9]);
        assert_eq!(blur.normalization(), 9.0);
    }

    #[test]
    fn vertical_edge_step() {
        let mut img = plane(3, 3, &[0, 0, 10, 0, 0, 10, 0, 0, 10]);
        convolve(&mut img, &Kernel::VERTICAL_EDGE);
        assert_eq!(reds(&img), [0, 0, 10, 0, 40, 10, 0, 0, 10]);
    }

    #[test]
    fn negative_response_clamps_to_zero() {
        let mut img = plane(3, 3, &[10, 0, 0, 10, 0, 0, 10, 0, 0]);
        convolve(&mut img, &Kernel::VERTICAL_EDGE);
        assert_eq!(img.get(1, 1), Some(RGB8::new(0, 0, 0)));
    }

    #[test]
    fn positive_response_clamps_to_255() {
        let mut img = plane(3, 3, &[0, 0, 200, 0, 0, 200, 0, 0, 200]);
        convolve(&mut img, &Kernel::VERTICAL_EDGE);
        assert_eq!(img.get(1, 1), Some(RGB8::new(255, 255, 255)));
    }

    #[test]
    fn horizontal_edge_ignores_vertical_step() {
        let mut img = plane(3, 3, &[0, 0, 10, 0, 0, 10, 0, 0, 10]);
        convolve(&mut img, &Kernel::HORIZONTAL_EDGE);
        assert_eq!(img.get(1, 1).unwrap().r, 0);
    }

    #[test]
    fn isotropic_spike() {
        let mut img = plane(3, 3, &[0, 0, 0, 0, 50, 0, 0, 0, 0]);
        convolve(&mut img, &Kernel::ISOTROPIC);
        assert_eq!(img.get(1, 1).unwrap().r, 200);
    }

    #[test]
    fn box_blur_divides_by_sum() {
        let mut img = plane(3, 3, &[0, 0, 0, 0, 90, 0, 0, 0, 0]);
        convolve(&mut img, &Kernel::from_weights([1.0; 9]));
        assert_eq!(img.get(1, 1).unwrap().r, 10);
    }

    #[test]
    fn rounds_half_up() {
        // (1 + 2) / 2 = 1.5 -> 2
        let mut img = plane(3, 3, &[0, 0, 0, 0, 1, 2, 0, 0, 0]);
        let k = Kernel::from_rows([[0.0; 3], [0.0, 1.0, 1.0], [0.0; 3]]);
        convolve(&mut img, &k);
        assert_eq!(img.get(1, 1).unwrap().r, 2);
    }

    #[test]
    fn reads_from_unmodified_source() {
        // Each interior output takes its left neighbour's input. Convolving
        // in place left to right would smear the first value across the row.
        let mut img = plane(5, 3, &[0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 0, 0, 0, 0, 0]);
        let k = Kernel::from_rows([[0.0; 3], [1.0, 0.0, 0.0], [0.0; 3]]);
        convolve(&mut img, &k);
        assert_eq!(reds(&img)[5..10], [1, 1, 2, 3, 5]);
    }

    #[test]
    fn red_channel_is_the_source() {
        let mut img = PixelBuffer::from_pixels(1, 1, vec![RGB8::new(7, 100, 200)]).unwrap();
        convolve(&mut img, &Kernel::ISOTROPIC);
        assert_eq!(img.get(0, 0), Some(RGB8::new(7, 7, 7)));
    }

    #[test]
    fn degenerate_sizes_do_not_panic() {
        for (w, h) in [(0, 0), (0, 5), (5, 0), (1, 1), (2, 7), (7, 2)] {
            let mut img = PixelBuffer::new(w, h).unwrap();
            convolve(&mut img, &Kernel::VERTICAL_EDGE);
            try_convolve(&mut img, &Kernel::ISOTROPIC).unwrap();
        }
    }

    #[test]
    fn try_convolve_matches_convolve() {
        let values: Vec<u8> = (0..20u8).map(|v| v * 13).collect();
        let mut a = plane(5, 4, &values);
        let mut b = a.clone();
        convolve(&mut a, &Kernel::ISOTROPIC);
        try_convolve(&mut b, &Kernel::ISOTROPIC).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!(
            "vertical-edge".parse::<KernelPreset>().unwrap(),
            KernelPreset::VerticalEdge
        );
        assert_eq!(
            " Horizontal-Edge ".parse::<KernelPreset>().unwrap(),
            KernelPreset::HorizontalEdge
        );
        assert_eq!(
            "isotropic".parse::<KernelPreset>().unwrap(),
            KernelPreset::Isotropic
        );
        assert!(matches!(
            "sharpen".parse::<KernelPreset>(),
            Err(BitmapError::UnknownKernel(_))
        ));
    }

    #[test]
    fn from_weights_is_row_major() {
        let k = Kernel::from_weights([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(k.rows()[0], [1.0, 2.0, 3.0]);
        assert_eq!(k.rows()[2][0], 7.0);
        assert_eq!(k.sum(), 45.0);
    }
}
