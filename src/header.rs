//! BMP file header and BITMAPINFOHEADER construction.
//!
//! Layout (all multi-byte fields little-endian):
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | `"BM"` |
//! | 2 | 4 | file size |
//! | 6 | 4 | reserved (0) |
//! | 10 | 4 | pixel data offset (54) |
//! | 14 | 4 | info header size (40) |
//! | 18 | 4 | width (signed) |
//! | 22 | 4 | height (signed, positive = bottom-up) |
//! | 26 | 2 | color planes (1) |
//! | 28 | 2 | bits per pixel (24) |
//! | 30 | 24 | compression, image size, resolution, palette counts (all 0) |

/// Size of the BITMAPFILEHEADER record.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER record.
pub const INFO_HEADER_SIZE: usize = 40;
/// Offset of the first pixel byte; both headers, no palette.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

pub(crate) const BYTES_PER_PIXEL: usize = 3;
const BITS_PER_PIXEL: u16 = 24;

/// Zero bytes appended to each row so its length is a multiple of 4.
///
/// Always one of 0, 1, 2 or 3. Defined for every `width`.
#[inline]
pub const fn padding_for(width: usize) -> usize {
    // (width * 3) % 4 without forming the product
    (4 - (width % 4) * BYTES_PER_PIXEL % 4) % 4
}

/// Bytes per scan line, padding included, or `None` on overflow.
#[inline]
pub const fn checked_row_stride(width: usize) -> Option<usize> {
    match width.checked_mul(BYTES_PER_PIXEL) {
        Some(bytes) => bytes.checked_add(padding_for(width)),
        None => None,
    }
}

/// Bytes per scan line, padding included.
///
/// # Panics
///
/// Overflows for widths above `(usize::MAX - 3) / 3`; use
/// [`checked_row_stride`] for untrusted widths. Any width accepted by the
/// encoder is in range.
#[inline]
pub const fn row_stride(width: usize) -> usize {
    width * BYTES_PER_PIXEL + padding_for(width)
}

/// Split a 32-bit field into little-endian bytes by taking the low byte and
/// shifting right by 8, four times. Negative values yield their
/// two's-complement bytes.
pub(crate) const fn to_le(value: i32) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    let mut v = value;
    let mut i = 0;
    while i < 4 {
        bytes[i] = (v & 0xFF) as u8;
        v >>= 8;
        i += 1;
    }
    bytes
}

/// The 14-byte BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
}

impl FileHeader {
    pub(crate) fn new(height: u32, width: u32, padding: u32) -> Self {
        let stride = u64::from(width) * BYTES_PER_PIXEL as u64 + u64::from(padding);
        let file_size = PIXEL_DATA_OFFSET as u64 + stride * u64::from(height);
        Self {
            file_size: file_size as u32,
            pixel_offset: PIXEL_DATA_OFFSET as u32,
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(b"BM");
        out[2..6].copy_from_slice(&to_le(self.file_size as i32));
        // 6..10 reserved
        out[10..14].copy_from_slice(&to_le(self.pixel_offset as i32));
        out
    }
}

/// The 40-byte BITMAPINFOHEADER for a 24-bit, uncompressed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub width: i32,
    pub height: i32,
}

impl InfoHeader {
    pub(crate) fn new(height: u32, width: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&to_le(INFO_HEADER_SIZE as i32));
        out[4..8].copy_from_slice(&to_le(self.width));
        out[8..12].copy_from_slice(&to_le(self.height));
        out[12..14].copy_from_slice(&1u16.to_le_bytes()); // planes
        out[14..16].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        // compression (BI_RGB = 0) and the remaining fields stay zero
        out
    }
}

/// Build both header records for an already validated image.
///
/// `height` and `width` must fit in `i32` and the resulting file size in
/// `u32`; the encoder checks this before calling.
pub(crate) fn build_headers(
    height: u32,
    width: u32,
    padding: u32,
) -> ([u8; FILE_HEADER_SIZE], [u8; INFO_HEADER_SIZE]) {
    (
        FileHeader::new(height, width, padding).to_bytes(),
        InfoHeader::new(height, width).to_bytes(),
    )
}
