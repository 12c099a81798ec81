//! Core types for image decoding.

use image::{ColorType, DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding and resampling.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not look like any format we can decode.
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// The format was recognised but the data is damaged or truncated.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// Requested or decoded dimensions are unusable.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, blocky).
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Lanczos3 interpolation (windowed sinc, sharpest result).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl std::str::FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(FilterType::Nearest),
            "bilinear" | "triangle" => Ok(FilterType::Bilinear),
            "lanczos" | "lanczos3" => Ok(FilterType::Lanczos3),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

/// Rotation/flip recorded in an EXIF `Orientation` tag.
///
/// Only consulted when a conversion opts in; by default files are used in
/// their stored pixel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Tag value 1, or no tag at all.
    #[default]
    Upright,
    /// 2: mirrored left to right.
    Mirrored,
    /// 3: upside down.
    Rotated180,
    /// 4: mirrored top to bottom.
    MirroredVertical,
    /// 5: mirrored across the main diagonal.
    MirroredRotated270,
    /// 6: needs a quarter turn clockwise.
    Rotated90,
    /// 7: mirrored across the anti-diagonal.
    MirroredRotated90,
    /// 8: needs a quarter turn counter-clockwise.
    Rotated270,
}

impl Orientation {
    /// Map a raw tag value; anything outside 1-8 is treated as upright.
    pub fn from_tag(value: u32) -> Self {
        match value {
            2 => Orientation::Mirrored,
            3 => Orientation::Rotated180,
            4 => Orientation::MirroredVertical,
            5 => Orientation::MirroredRotated270,
            6 => Orientation::Rotated90,
            7 => Orientation::MirroredRotated90,
            8 => Orientation::Rotated270,
            _ => Orientation::Upright,
        }
    }

    /// Rotate and flip `img` so it displays upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Upright => img,
            Orientation::Mirrored => img.fliph(),
            Orientation::Rotated180 => img.rotate180(),
            Orientation::MirroredVertical => img.flipv(),
            Orientation::MirroredRotated270 => img.rotate90().fliph(),
            Orientation::Rotated90 => img.rotate90(),
            Orientation::MirroredRotated90 => img.rotate270().fliph(),
            Orientation::Rotated270 => img.rotate270(),
        }
    }
}

/// A decoded image held as RGBA pixels.
///
/// Every source format is widened to RGBA8 so that later stages only deal
/// with one layout; `color` keeps the colour type the file was stored in.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Colour type of the source file (e.g. `L8`, `Rgb8`, `Rgba8`).
    pub color: ColorType,
    /// The source stored palette indices (GIF) rather than colour values.
    pub palette: bool,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage from raw RGBA pixels.
    pub fn new(width: u32, height: u32, color: ColorType, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            color,
            palette: false,
            pixels,
        }
    }

    /// Wrap a decoded `DynamicImage`, remembering its original colour type.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let color = img.color();
        Self::from_rgba_image(img.into_rgba8(), color)
    }

    /// Create a DecodedImage from an `RgbaImage`.
    pub fn from_rgba_image(img: RgbaImage, color: ColorType) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            color,
            palette: false,
            pixels: img.into_raw(),
        }
    }

    /// Mark the image as decoded from a palette-based format.
    pub fn with_palette(mut self, palette: bool) -> Self {
        self.palette = palette;
        self
    }

    /// Copy the pixels into an `RgbaImage` for the image crate's operations.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Ensure `pixels` holds exactly `width * height` RGBA values.
    pub fn check_buffer(&self) -> Result<(), DecodeError> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.pixels.len() != expected {
            return Err(DecodeError::Corrupted(format!(
                "pixel buffer holds {} bytes, {}x{} needs {expected}",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Whether the source format carried an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.color.has_alpha()
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
