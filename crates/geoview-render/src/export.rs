//! Frame export to image files.

use std::path::Path;

use image::{ImageBuffer, Rgb};
use thiserror::Error;

/// Errors from frame export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The pixel data does not match the stated dimensions.
    #[error("invalid image data for {width}x{height} frame")]
    InvalidImageData { width: u32, height: u32 },

    /// The file extension is not a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Underlying image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Saves an interleaved RGB frame (3 bytes per pixel) to an image file.
///
/// The format is chosen from the file extension; `.png`, `.jpg` and `.jpeg`
/// are supported.
pub fn save_rgb_image(
    path: &Path,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ExportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, data.to_vec())
            .ok_or(ExportError::InvalidImageData { width, height })?;

    match extension.as_str() {
        "png" => img.save_with_format(path, image::ImageFormat::Png)?,
        "jpg" | "jpeg" => img.save_with_format(path, image::ImageFormat::Jpeg)?,
        other => return Err(ExportError::UnsupportedFormat(other.to_string())),
    }

    log::info!("frame saved to {}", path.display());
    Ok(())
}
