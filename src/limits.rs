use crate::error::BitmapError;

/// Resource limits applied before a decode allocates its pixel buffer.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded RGB8 buffer (3 bytes per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits suitable for untrusted input: 16384 on a side, 64 MiB of pixels.
    pub fn untrusted() -> Self {
        Self {
            max_width: Some(16_384),
            max_height: Some(16_384),
            max_pixels: None,
            max_memory_bytes: Some(64 << 20),
        }
    }

    /// Check a `width x height` RGB8 image against every configured limit.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };
        let pixels = u64::from(width) * u64::from(height);

        if let Some(max) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max));
        }
        if let Some(max) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max));
        }
        if let Some(max) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max));
        }
        let bytes = pixels.saturating_mul(3);
        if let Some(max) = self.max_memory_bytes.filter(|&m| bytes > m) {
            return Err(exceeded("allocation of", bytes, max));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_accept_anything() {
        assert!(Limits::default().check(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn pixel_count_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(matches!(
            limits.check(10, 11),
            Err(BitmapError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_counts_three_bytes_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(limits.check(11, 10).is_err());
    }

    #[test]
    fn untrusted_rejects_huge_width() {
        assert!(Limits::untrusted().check(100_000, 1).is_err());
    }
}
