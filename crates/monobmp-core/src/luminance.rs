//! Grayscale conversion using ITU-R BT.601 luma weights.
//!
//! Weights are 16.16 fixed point, the form imaging libraries use for their
//! "L" mode, so a threshold boundary lands on the same pixels as in a
//! designer's usual tools.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::decode::{DecodeError, DecodedImage};

/// BT.601 red weight (0.299) scaled by 65536.
pub const LUMA_R: u32 = 19595;

/// BT.601 green weight (0.587) scaled by 65536.
pub const LUMA_G: u32 = 38470;

/// BT.601 blue weight (0.114) scaled by 65536.
pub const LUMA_B: u32 = 7471;

/// How transparent pixels are treated before computing luma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Drop alpha and use the stored colour as-is.
    ///
    /// Resampling premultiplies alpha, so fully transparent areas of a
    /// resized image reach this stage as black.
    #[default]
    Ignore,
    /// Composite over white.
    White,
    /// Composite over black.
    Black,
}

impl std::str::FromStr for Background {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" | "none" => Ok(Background::Ignore),
            "white" => Ok(Background::White),
            "black" => Ok(Background::Black),
            other => Err(format!("unknown background '{other}'")),
        }
    }
}

/// Calculate luma from u8 RGB values (0 to 255).
#[inline]
pub fn calculate_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let luma = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + 0x8000;
    (luma >> 16) as u8
}

/// Blend one channel over a solid background value.
#[inline]
fn composite(channel: u8, alpha: u8, background: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + background as u32 * (255 - a) + 127) / 255) as u8
}

/// Reduce an RGBA image to single-channel luma.
///
/// # Errors
///
/// Returns `DecodeError::Corrupted` if the pixel buffer does not match the
/// image dimensions.
pub fn to_grayscale(
    image: &DecodedImage,
    background: Background,
) -> Result<GrayImage, DecodeError> {
    image.check_buffer()?;

    let luma: Vec<u8> = image
        .pixels
        .chunks_exact(4)
        .map(|px| {
            let (r, g, b) = match background {
                Background::Ignore => (px[0], px[1], px[2]),
                Background::White => (
                    composite(px[0], px[3], 255),
                    composite(px[1], px[3], 255),
                    composite(px[2], px[3], 255),
                ),
                Background::Black => (
                    composite(px[0], px[3], 0),
                    composite(px[1], px[3], 0),
                    composite(px[2], px[3], 0),
                ),
            };
            calculate_luma_u8(r, g, b)
        })
        .collect();

    GrayImage::from_raw(image.width, image.height, luma).ok_or_else(|| {
        DecodeError::Corrupted("luma buffer does not match dimensions".into())
    })
}
