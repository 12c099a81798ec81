//! Exact-size resampling onto the display grid.
//!
//! The target is always filled completely: sources with a different aspect
//! ratio are stretched rather than letterboxed.
//!
//! Interpolating filters run on premultiplied alpha, so colour hidden under
//! fully transparent pixels never bleeds into the result and transparent
//! areas come out black. Palette sources (GIF) are always sampled with
//! nearest neighbour.

use image::RgbaImage;
use tracing::debug;

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is
/// zero, and `DecodeError::Corrupted` if the pixel buffer does not match the
/// declared size.
///
/// Same-size input is returned unchanged, hidden colour included.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    image.check_buffer()?;

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let mut rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::Corrupted("pixel buffer does not match dimensions".into()))?;

    let filter = if image.palette {
        FilterType::Nearest
    } else {
        filter
    };
    let premultiply = filter != FilterType::Nearest;

    debug!(
        from_width = image.width,
        from_height = image.height,
        width,
        height,
        ?filter,
        "Resizing image"
    );
    if premultiply {
        premultiply_alpha(&mut rgba);
    }
    let mut resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    if premultiply {
        unpremultiply_alpha(&mut resized);
    }

    Ok(DecodedImage::from_rgba_image(resized, image.color).with_palette(image.palette))
}

/// Scale each colour channel by its alpha.
fn premultiply_alpha(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = px.0[3] as u32;
        for c in &mut px.0[..3] {
            // Rounded c * a / 255
            let t = *c as u32 * a + 128;
            *c = ((t + (t >> 8)) >> 8) as u8;
        }
    }
}

/// Undo `premultiply_alpha`. Fully transparent and fully opaque pixels are
/// left as they are.
fn unpremultiply_alpha(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = px.0[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px.0[..3] {
            *c = (*c as u32 * 255 / a).min(255) as u8;
        }
    }
}
