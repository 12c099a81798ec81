//! Fixed-cutoff binarization.

use image::GrayImage;
use tracing::debug;

use super::MonoBitmap;

/// Default cutoff for threshold binarization.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Map each pixel to white when its luma is strictly greater than `level`.
///
/// A pixel exactly at `level` is black, `level + 1` is white. With a level of
/// 255 the result is always fully black.
pub fn threshold(gray: &GrayImage, level: u8) -> MonoBitmap {
    let (width, height) = gray.dimensions();
    debug!(width, height, level, "Applying threshold binarization");

    let mut bitmap = MonoBitmap::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel.0[0] > level {
            bitmap.set(x, y, true);
        }
    }
    bitmap
}
