//! Non-interactive request surface: load, transform, save.
//!
//! A front end (menu, CLI, service) builds a [`Request`] and calls
//! [`Request::run`]; nothing here reads from a terminal.

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use crate::error::BitmapError;
use crate::filter::{self, Kernel, KernelPreset};
use crate::io::{load_image, save_image};
use crate::pixel::PixelBuffer;

/// What to do to a loaded image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    /// Luma grayscale.
    Grayscale,
    /// Grayscale, then 3x3 convolution with the given kernel.
    Convolve(Kernel),
}

impl Operation {
    pub fn preset(preset: KernelPreset) -> Self {
        Self::Convolve(preset.kernel())
    }

    /// Apply in place.
    ///
    /// Fails only with [`BitmapError::OutOfMemory`] when the convolution
    /// scratch planes cannot be allocated.
    pub fn apply(&self, image: &mut PixelBuffer) -> Result<(), BitmapError> {
        match self {
            Self::Grayscale => filter::grayscale(image),
            Self::Convolve(kernel) => {
                filter::grayscale(image);
                filter::try_convolve(image, kernel)?;
            }
        }
        Ok(())
    }
}

impl From<KernelPreset> for Operation {
    fn from(preset: KernelPreset) -> Self {
        Self::preset(preset)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grayscale => f.write_str("grayscale"),
            Self::Convolve(kernel) => match kernel.preset() {
                Some(preset) => write!(f, "convolve({preset})"),
                None => write!(f, "convolve({:?})", kernel.rows()),
            },
        }
    }
}

/// Accepts `grayscale`, a preset name (`vertical-edge`, `horizontal-edge`,
/// `isotropic`) or nine weights separated by commas and/or whitespace.
impl FromStr for Operation {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("grayscale") || s.eq_ignore_ascii_case("gray") {
            return Ok(Self::Grayscale);
        }
        if let Ok(preset) = s.parse::<KernelPreset>() {
            return Ok(Self::preset(preset));
        }
        parse_weights(s)
            .map(|w| Self::Convolve(Kernel::from_weights(w)))
            .ok_or_else(|| BitmapError::UnknownKernel(s.into()))
    }
}

fn parse_weights(s: &str) -> Option<[f32; 9]> {
    let mut weights = [0.0f32; 9];
    let mut parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    for w in &mut weights {
        *w = parts.next()?.parse().ok()?;
    }
    parts.next().is_none().then_some(weights)
}

/// One load-transform-save job.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub input: PathBuf,
    pub output: PathBuf,
    pub operation: Operation,
}

/// What a finished [`Request`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub width: u32,
    pub height: u32,
}

impl Request {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        operation: Operation,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            operation,
        }
    }

    /// Run the whole job. The output file is not created if loading fails.
    pub fn run(&self) -> Result<Summary, BitmapError> {
        let decoded = load_image(&self.input)?;
        let (mut image, info) = decoded.into_parts();
        log::debug!(
            "applying {} to {}x{} image from {}",
            self.operation,
            image.width(),
            image.height(),
            self.input.display()
        );
        self.operation.apply(&mut image)?;
        save_image(&self.output, &image, &info)?;
        Ok(Summary {
            width: image.width(),
            height: image.height(),
        })
    }
}
