//! Decoding PNG, JPEG and GIF sources with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageFormat, ImageReader};
use tracing::debug;

use super::{DecodeError, DecodedImage, Orientation};

/// Read and decode an image file.
///
/// The format is guessed from the file contents, not the extension.
pub fn decode_file(path: &Path, apply_orientation: bool) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read image file");
    decode_bytes(&bytes, apply_orientation)
}

/// Decode an in-memory image.
///
/// When `apply_orientation` is set, an EXIF orientation tag (if any) is
/// applied so the result is upright. Otherwise pixels keep their stored
/// order. GIFs are flagged as palette images for the resampler.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` when the bytes match no known
/// format and `DecodeError::Corrupted` when decoding fails part way.
pub fn decode_bytes(bytes: &[u8], apply_orientation: bool) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(DecodeError::UnsupportedFormat)?;

    let img = reader.decode().map_err(map_image_error)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    let img = if apply_orientation {
        read_orientation(bytes).apply(img)
    } else {
        img
    };

    debug!(
        ?format,
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );
    Ok(DecodedImage::from_dynamic(img).with_palette(format == ImageFormat::Gif))
}

/// Extract the EXIF orientation from an image container.
///
/// Returns `Orientation::Upright` when there is no EXIF block or no tag.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_tag)
            .unwrap_or_default(),
        Err(_) => Orientation::Upright,
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        ImageError::IoError(e) => DecodeError::Io(e),
        other => DecodeError::Corrupted(other.to_string()),
    }
}
