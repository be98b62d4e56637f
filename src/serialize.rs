//! Pixel body serialization: bottom-up rows, BGR samples, per-row padding.

use crate::error::BitmapError;
use crate::header::BYTES_PER_PIXEL;
use crate::pixel::Pixel;
use alloc::vec::Vec;
use enough::Stop;

/// Append the pixel body for a row-major `pixels` slice to `out`.
///
/// The last logical row is written first. Callers guarantee
/// `pixels.len() == width * height`.
pub(crate) fn write_pixel_body(
    out: &mut Vec<u8>,
    pixels: &[Pixel],
    width: usize,
    height: usize,
    padding: usize,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    debug_assert_eq!(pixels.len(), width * height);
    let start = out.len();
    out.reserve((width * BYTES_PER_PIXEL + padding) * height);

    for (row_idx, row) in pixels.chunks_exact(width).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&px.to_bgr());
        }
        out.extend(core::iter::repeat_n(0u8, padding));
    }

    debug_assert_eq!(
        out.len() - start,
        (width * BYTES_PER_PIXEL + padding) * height
    );
    Ok(())
}
