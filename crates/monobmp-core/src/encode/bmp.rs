//! 1-bit Windows BMP encoding.
//!
//! Layout written:
//!
//! | Offset | Size | Content                                   |
//! |--------|------|-------------------------------------------|
//! | 0      | 14   | `BITMAPFILEHEADER` ("BM", size, offset)   |
//! | 14     | 40   | `BITMAPINFOHEADER` (1 bpp, `BI_RGB`)      |
//! | 54     | 8    | palette: index 0 black, index 1 white     |
//! | 62     | ...  | rows bottom-up, each padded to 4 bytes    |

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::binarize::MonoBitmap;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const PALETTE_SIZE: u32 = 8;

/// Offset of the pixel array from the start of the file.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

/// Resolution stored in the header: 2835 px/m, i.e. 72 DPI.
const PIXELS_PER_METER: u32 = 2835;

/// Errors that can occur during BMP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bytes per row in the file: one bit per pixel rounded up to a 4-byte
/// boundary.
#[inline]
pub fn padded_row_size(width: u32) -> usize {
    MonoBitmap::stride_for(width).div_ceil(4) * 4
}

/// Encode a bitmap as a 1-bit uncompressed BMP.
///
/// # Example
///
/// ```
/// use monobmp_core::binarize::MonoBitmap;
/// use monobmp_core::encode::encode_bmp;
///
/// let bmp = encode_bmp(&MonoBitmap::new(136, 136)).unwrap();
/// assert_eq!(&bmp[0..2], b"BM");
/// assert_eq!(bmp.len(), 62 + 20 * 136);
/// ```
pub fn encode_bmp(bitmap: &MonoBitmap) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let row_size = padded_row_size(width);
    let image_size = (row_size * height as usize) as u32;
    let file_size = PIXEL_DATA_OFFSET + image_size;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0; 4]); // reserved
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    // Positive height: rows are stored bottom-up
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&1u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes()); // colours used
    out.extend_from_slice(&0u32.to_le_bytes()); // all colours important

    // Palette entries are BGRX
    out.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    out.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x00]);

    let padding = row_size - bitmap.stride();
    for y in (0..height).rev() {
        out.extend_from_slice(bitmap.row(y));
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    debug_assert_eq!(out.len(), file_size as usize);
    Ok(out)
}

/// Encode `bitmap` and write it to `path`, replacing any existing file.
pub fn write_bmp(bitmap: &MonoBitmap, path: &Path) -> Result<(), EncodeError> {
    let bytes = encode_bmp(bitmap)?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote BMP");
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
