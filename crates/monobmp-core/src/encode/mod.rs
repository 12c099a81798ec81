//! Bitmap output.
//!
//! Produces uncompressed 1-bit Windows BMP files, the format the glasses
//! firmware accepts for image assets.

mod bmp;

pub use bmp::{encode_bmp, padded_row_size, write_bmp, EncodeError, PIXEL_DATA_OFFSET};
