//! monobmp core - 1-bit bitmap conversion for 136x136 glasses displays
//!
//! This crate turns ordinary raster images (PNG, JPEG, GIF) into the
//! uncompressed 1-bit BMP assets the glasses firmware displays. Each file
//! passes linearly through the same stages:
//!
//! 1. [`scan`] - list candidate files in a directory
//! 2. [`decode`] - decode and resample to the display size (Lanczos)
//! 3. [`luminance`] - reduce to 8-bit luma
//! 4. [`binarize`] - dither or threshold to 1 bit
//! 5. [`encode`] - write the BMP container
//!
//! [`pipeline`] strings the stages together for single files and whole
//! directories.

pub mod binarize;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod options;
pub mod pipeline;
pub mod scan;

pub use binarize::{binarize, BinarizePolicy, MonoBitmap};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::{encode_bmp, write_bmp, EncodeError};
pub use luminance::Background;
pub use options::{ConvertOptions, Preset, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use pipeline::{
    convert_directory, convert_directory_with, convert_file, convert_image, output_path_for,
    BatchOptions, BatchReport, ConversionJob, ConvertedFile, PipelineError,
};
pub use scan::{scan_directory, ExtensionFilter, ScanError};
