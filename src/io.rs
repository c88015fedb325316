//! Path-based load and save.
//!
//! File handles live only inside these functions and are closed on every
//! return path, including validation failures.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Unstoppable;

use crate::bmp::{self, InfoHeader};
use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Read and decode the BMP at `path`.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodeOutput, BitmapError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| BitmapError::IoOpenFailed {
        path: path.display().to_string(),
        source,
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(BitmapError::ReadFailed)?;
    drop(file);

    log::debug!("loading {}", path.display());
    bmp::decode(&data, None, &Unstoppable)
}

/// Encode `image` with `info` as the header template and write it to `path`.
///
/// The file is only created once encoding has succeeded. If the write itself
/// fails the file may be left partially written; deleting it is up to the
/// caller.
pub fn save_image(
    path: impl AsRef<Path>,
    image: &PixelBuffer,
    info: &InfoHeader,
) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let bytes = bmp::encode(image, info, &Unstoppable)?;
    let mut file = File::create(path).map_err(|source| BitmapError::IoOpenFailed {
        path: path.display().to_string(),
        source,
    })?;
    file.write_all(&bytes).map_err(BitmapError::WriteFailed)?;
    file.flush().map_err(BitmapError::WriteFailed)?;
    log::debug!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
