use alloc::vec::Vec;
use core::ops::Deref;

use crate::header::{FILE_HEADER_SIZE, PIXEL_DATA_OFFSET, padding_for, row_stride};

/// A finished BMP file: headers followed by the padded pixel body.
///
/// Self-contained and owned by the caller; derefs to the file bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    pub(crate) fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            PIXEL_DATA_OFFSET + row_stride(width as usize) * height as usize
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zero bytes at the end of every row.
    pub fn padding(&self) -> usize {
        padding_for(self.width as usize)
    }

    /// Bytes per row including padding.
    pub fn row_stride(&self) -> usize {
        row_stride(self.width as usize)
    }

    /// File size as recorded in the file header.
    ///
    /// Always equal to `self.as_bytes().len()`.
    pub fn file_size(&self) -> u32 {
        u32::from_le_bytes([self.data[2], self.data[3], self.data[4], self.data[5]])
    }

    /// The pixel body, without headers.
    pub fn pixel_data(&self) -> &[u8] {
        &self.data[PIXEL_DATA_OFFSET..]
    }

    /// The 14-byte file header.
    pub fn file_header(&self) -> &[u8] {
        &self.data[..FILE_HEADER_SIZE]
    }

    /// The 40-byte info header.
    pub fn info_header(&self) -> &[u8] {
        &self.data[FILE_HEADER_SIZE..PIXEL_DATA_OFFSET]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Deref for EncodedImage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for EncodedImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<EncodedImage> for Vec<u8> {
    fn from(img: EncodedImage) -> Self {
        img.data
    }
}
