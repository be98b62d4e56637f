//! BMP encoder: validation, header and body composition.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::grid::{self, FlatGrid};
use crate::header::{
    BYTES_PER_PIXEL, PIXEL_DATA_OFFSET, build_headers, checked_row_stride, padding_for,
};
use crate::image::EncodedImage;
use crate::limits::Limits;
use crate::pixel::Pixel;
use crate::serialize::write_pixel_body;

/// Builder for 24-bit BMP encode operations.
///
/// ```
/// use zenbmp24::{EncodeRequest, Pixel, Unstoppable};
///
/// let pixels = [Pixel::new(255, 0, 0)];
/// let bmp = EncodeRequest::new().encode(&pixels, 1, 1, Unstoppable)?;
/// assert_eq!(bmp.len(), 58);
/// # Ok::<(), zenbmp24::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest {
    limits: Option<Limits>,
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images exceeding `limits` before allocating the output.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode a row-major pixel sequence of `width * height` pixels.
    pub fn encode(
        &self,
        pixels: &[Pixel],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<EncodedImage, BitmapError> {
        self.encode_flat(pixels, width, height, &stop)
    }

    /// Encode a grid given as rows of equal length.
    ///
    /// Ragged input fails with [`BitmapError::ShapeMismatch`] before any
    /// other check.
    pub fn encode_rows<R: AsRef<[Pixel]>>(
        &self,
        rows: &[R],
        stop: impl Stop,
    ) -> Result<EncodedImage, BitmapError> {
        let grid = grid::flatten_rows(rows)?;
        self.encode_grid(grid, &stop)
    }

    /// Encode packed `R, G, B` bytes, `width * height * 3` of them.
    pub fn encode_rgb8(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<EncodedImage, BitmapError> {
        check_dimensions(width, height)?;
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if bytes.len() != needed {
            return Err(BitmapError::BufferSizeMismatch {
                needed,
                actual: bytes.len(),
            });
        }
        let pixels: Vec<Pixel> = bytes
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        self.encode_flat(&pixels, width, height, &stop)
    }

    /// Encode an [`imgref::ImgRef`]; strided images are compacted first.
    #[cfg(feature = "imgref")]
    pub fn encode_imgref(
        &self,
        img: imgref::ImgRef<'_, Pixel>,
        stop: impl Stop,
    ) -> Result<EncodedImage, BitmapError> {
        self.encode_grid(grid::flatten_imgref(img), &stop)
    }

    fn encode_grid(
        &self,
        grid: FlatGrid<'_>,
        stop: &dyn Stop,
    ) -> Result<EncodedImage, BitmapError> {
        let too_large = BitmapError::DimensionsTooLarge {
            width: u32::try_from(grid.width).unwrap_or(u32::MAX),
            height: u32::try_from(grid.height).unwrap_or(u32::MAX),
        };
        let (Ok(width), Ok(height)) = (u32::try_from(grid.width), u32::try_from(grid.height))
        else {
            return Err(too_large);
        };
        self.encode_flat(&grid.pixels, width, height, stop)
    }

    fn encode_flat(
        &self,
        pixels: &[Pixel],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<EncodedImage, BitmapError> {
        check_dimensions(width, height)?;

        let w = width as usize;
        let h = height as usize;
        let too_large = BitmapError::DimensionsTooLarge { width, height };
        let padding = padding_for(w);
        let file_size = checked_row_stride(w)
            .and_then(|stride| stride.checked_mul(h))
            .and_then(|body| body.checked_add(PIXEL_DATA_OFFSET))
            .filter(|&size| u32::try_from(size).is_ok())
            .ok_or(too_large)?;

        // w * h <= file_size, so this cannot overflow
        let expected = w * h;
        if pixels.len() != expected {
            return Err(BitmapError::PixelCountMismatch {
                provided: pixels.len(),
                expected,
            });
        }

        if let Some(limits) = &self.limits {
            limits.check(width, height, file_size)?;
        }

        stop.check()?;

        let (file_header, info_header) = build_headers(height, width, padding as u32);
        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(&file_header);
        out.extend_from_slice(&info_header);
        write_pixel_body(&mut out, pixels, w, h, padding, stop)?;

        debug_assert_eq!(out.len(), file_size);
        log::debug!("encoded {width}x{height} bmp: {file_size} bytes, row padding {padding}");
        Ok(EncodedImage::new(out, width, height))
    }
}

/// Width and height must be at least 1 and fit the signed 32-bit header fields.
fn check_dimensions(width: u32, height: u32) -> Result<(), BitmapError> {
    if width < 1 || height < 1 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }
    Ok(())
}
