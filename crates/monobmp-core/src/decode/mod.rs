//! Image decoding and resampling.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and GIF files (format sniffed from content)
//! - Optionally applying EXIF orientation so phone photos come out upright
//! - Resampling to the exact display size on premultiplied alpha
//!
//! Every decoded image is widened to RGBA8 (see [`DecodedImage`]); grayscale
//! reduction happens afterwards in [`crate::luminance`].

mod file;
mod resize;
mod types;

pub use file::{decode_bytes, decode_file, read_orientation};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
