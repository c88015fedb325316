//! Hand-built BMP files, independent of the crate's encoder.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use enough::{Stop, StopReason};

/// Layout knobs for a hand-built file; [`Raw::build`] writes it.
pub struct Raw {
    pub width: i32,
    pub height: i32,
    pub bit_count: u16,
    pub compression: u32,
    pub header_size: u32,
    pub planes: u16,
    /// Extra bytes between the headers and the pixel data.
    pub gap: usize,
    /// Value written into row padding bytes.
    pub pad_byte: u8,
    pub x_ppm: i32,
    pub y_ppm: i32,
    pub colors_used: u32,
}

impl Raw {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            bit_count: 24,
            compression: 0,
            header_size: 40,
            planes: 1,
            gap: 0,
            pad_byte: 0,
            x_ppm: 3780,
            y_ppm: 3780,
            colors_used: 0,
        }
    }

    /// Build the file. `stored_rows` are in file order (bottom row first),
    /// each pixel given as `[b, g, r]`.
    pub fn build(&self, stored_rows: &[Vec<[u8; 3]>]) -> Vec<u8> {
        let w = self.width.max(0) as usize;
        let pad = (4 - (w * 3) % 4) % 4;
        let offset = 54 + self.gap;
        let image_size = (w * 3 + pad) * stored_rows.len();

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&((offset + image_size) as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());

        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(image_size as u32).to_le_bytes());
        out.extend_from_slice(&self.x_ppm.to_le_bytes());
        out.extend_from_slice(&self.y_ppm.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        out.extend(std::iter::repeat_n(0xAAu8, self.gap));
        for row in stored_rows {
            for px in row {
                out.extend_from_slice(px);
            }
            out.extend(std::iter::repeat_n(self.pad_byte, pad));
        }
        out
    }
}

/// Deterministic pseudo-random bytes (xorshift32).
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Stored rows filled with noise.
pub fn noise_rows(width: usize, height: usize, seed: u32) -> Vec<Vec<[u8; 3]>> {
    let bytes = noise(width * height * 3, seed);
    bytes
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect::<Vec<_>>()
        .chunks(width.max(1))
        .map(|r| r.to_vec())
        .take(height)
        .collect()
}

/// A stop that lets `allowed` checks pass and cancels every one after.
pub struct CancelAfter {
    allowed: usize,
    seen: AtomicUsize,
}

impl CancelAfter {
    pub fn new(allowed: usize) -> Self {
        Self {
            allowed,
            seen: AtomicUsize::new(0),
        }
    }

    /// Number of times `check` has been called.
    pub fn checks(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        if self.seen.fetch_add(1, Ordering::Relaxed) < self.allowed {
            Ok(())
        } else {
            Err(StopReason::Cancelled)
        }
    }
}
