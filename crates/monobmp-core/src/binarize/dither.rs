//! Floyd-Steinberg error-diffusion dithering.
//!
//! Quantization error is pushed to unvisited neighbours in sixteenths:
//!
//! ```text
//!          *    7
//!     3    5    1
//! ```
//!
//! Rows are scanned left to right, top to bottom. Errors are carried as
//! integers, so the output is fully deterministic.

use image::GrayImage;
use tracing::debug;

use super::MonoBitmap;

/// An error-adjusted value strictly above this becomes white.
const DITHER_MIDPOINT: i32 = 128;

/// Dither a grayscale image to 1 bit.
pub fn floyd_steinberg(gray: &GrayImage) -> MonoBitmap {
    let (width, height) = gray.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    let mut bitmap = MonoBitmap::new(width, height);

    // Accumulated error for the current and next row, in sixteenths. Slot
    // `x + 1` belongs to pixel `x`; the two extra slots absorb spill over
    // the left and right edges.
    let w = width as usize;
    let mut current = vec![0i32; w + 2];
    let mut next = vec![0i32; w + 2];

    for y in 0..height {
        for x in 0..w {
            let source = gray.get_pixel(x as u32, y).0[0] as i32;
            let value = (source + current[x + 1] / 16).clamp(0, 255);

            let white = value > DITHER_MIDPOINT;
            if white {
                bitmap.set(x as u32, y, true);
            }

            let error = value - if white { 255 } else { 0 };
            current[x + 2] += error * 7;
            next[x] += error * 3;
            next[x + 1] += error * 5;
            next[x + 2] += error;
        }

        std::mem::swap(&mut current, &mut next);
        next.fill(0);
    }

    bitmap
}
