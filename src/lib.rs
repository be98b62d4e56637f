//! # zenbmp24
//!
//! Bit-exact encoder for uncompressed 24-bit BMP files.
//!
//! The output is a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, and
//! the pixel body: rows bottom-to-top, pixels left-to-right, samples in
//! B, G, R order, every row zero-padded to a multiple of 4 bytes.
//!
//! Encoding is pure: it reads its input and allocates one output buffer.
//! Writing the result to disk is left to the [`persist`] module (`std`
//! feature) or to the caller.
//!
//! ## Non-Goals
//!
//! - Compression (RLE, bitfields), palettes, bit depths other than 24
//! - Alpha channels
//! - Decoding existing BMP files
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp24::{EncodeRequest, Pixel, Unstoppable};
//!
//! let rows = vec![
//!     vec![Pixel::new(255, 0, 0), Pixel::new(0, 255, 0)],
//!     vec![Pixel::new(0, 0, 255), Pixel::WHITE],
//! ];
//! let bmp = EncodeRequest::new().encode_rows(&rows, Unstoppable)?;
//! assert_eq!(bmp.file_size() as usize, bmp.len());
//!
//! # #[cfg(feature = "std")]
//! zenbmp24::persist::save("quad", &bmp)?; // writes quad.bmp
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod encode;
mod error;
mod grid;
mod header;
mod image;
mod limits;
mod pixel;
mod serialize;

#[cfg(feature = "std")]
pub mod persist;

// Re-exports
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use header::{
    FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, PIXEL_DATA_OFFSET,
    checked_row_stride, padding_for, row_stride,
};
pub use image::EncodedImage;
pub use limits::Limits;
pub use pixel::Pixel;

/// Encode `width * height` row-major pixels to BMP.
pub fn encode_bmp(
    pixels: &[Pixel],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<EncodedImage, BitmapError> {
    EncodeRequest::new().encode(pixels, width, height, stop)
}

/// Encode a grid of equal-length rows to BMP.
pub fn encode_bmp_rows<R: AsRef<[Pixel]>>(
    rows: &[R],
    stop: impl Stop,
) -> Result<EncodedImage, BitmapError> {
    EncodeRequest::new().encode_rows(rows, stop)
}

/// Encode packed RGB bytes to BMP.
pub fn encode_bmp_rgb8(
    bytes: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<EncodedImage, BitmapError> {
    EncodeRequest::new().encode_rgb8(bytes, width, height, stop)
}
