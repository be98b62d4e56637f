use crate::error::BitmapError;

/// Resource caps checked before the output buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the encoded file, headers included.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    pub fn with_max_dimensions(mut self, width: u64, height: u64) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: u64) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    /// Check an image of `width` x `height` encoding to `output_bytes`.
    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        output_bytes: usize,
    ) -> Result<(), BitmapError> {
        let exceeds = |value: u64, limit: Option<u64>| limit.is_some_and(|max| value > max);

        if exceeds(u64::from(width), self.max_width) {
            return Err(BitmapError::LimitExceeded(alloc::format!(
                "width {width} exceeds limit {}",
                self.max_width.unwrap_or_default()
            )));
        }
        if exceeds(u64::from(height), self.max_height) {
            return Err(BitmapError::LimitExceeded(alloc::format!(
                "height {height} exceeds limit {}",
                self.max_height.unwrap_or_default()
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if exceeds(pixels, self.max_pixels) {
            return Err(BitmapError::LimitExceeded(alloc::format!(
                "pixel count {pixels} exceeds limit {}",
                self.max_pixels.unwrap_or_default()
            )));
        }
        if exceeds(output_bytes as u64, self.max_output_bytes) {
            return Err(BitmapError::LimitExceeded(alloc::format!(
                "output of {output_bytes} bytes exceeds limit {}",
                self.max_output_bytes.unwrap_or_default()
            )));
        }
        Ok(())
    }
}
