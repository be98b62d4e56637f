//! Adapters from 2-D pixel grids to the flat row-major input of the encoder.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// A validated, row-major pixel sequence with its dimensions.
pub(crate) struct FlatGrid<'a> {
    pub pixels: Cow<'a, [Pixel]>,
    pub width: usize,
    pub height: usize,
}

/// Flatten `rows` after checking every row has the first row's length.
///
/// Empty input, or rows of length zero, flatten to a grid with a zero
/// dimension; the encoder rejects those afterwards.
pub(crate) fn flatten_rows<R: AsRef<[Pixel]>>(
    rows: &[R],
) -> Result<FlatGrid<'static>, BitmapError> {
    let width = rows.first().map_or(0, |r| r.as_ref().len());
    for (row, r) in rows.iter().enumerate().skip(1) {
        let actual = r.as_ref().len();
        if actual != width {
            return Err(BitmapError::ShapeMismatch {
                row,
                expected: width,
                actual,
            });
        }
    }

    let mut pixels = Vec::with_capacity(width * rows.len());
    for r in rows {
        pixels.extend_from_slice(r.as_ref());
    }
    Ok(FlatGrid {
        pixels: Cow::Owned(pixels),
        width,
        height: rows.len(),
    })
}

/// Borrow a contiguous `ImgRef`, or copy it when rows are strided.
#[cfg(feature = "imgref")]
pub(crate) fn flatten_imgref(img: imgref::ImgRef<'_, Pixel>) -> FlatGrid<'_> {
    let width = img.width();
    let height = img.height();
    let pixels = if img.stride() == width {
        Cow::Borrowed(&img.into_buf()[..width * height])
    } else {
        Cow::Owned(img.pixels().collect())
    };
    FlatGrid {
        pixels,
        width,
        height,
    }
}
