//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::RgbImage;
use crate::util::{ChromaKeyError, ChromaKeyResult};
use std::path::Path;

/// Creates an owned image from an `image` RGB8 buffer.
pub fn rgb_image_from_buffer(img: &image::RgbImage) -> ChromaKeyResult<RgbImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbImage::from_raw(img.as_raw(), width, height)
}

/// Converts any decoded image to RGB8, dropping alpha.
pub fn rgb_image_from_dynamic(img: &image::DynamicImage) -> ChromaKeyResult<RgbImage> {
    rgb_image_from_buffer(&img.to_rgb8())
}

/// Converts back into an `image` RGB8 buffer.
pub fn rgb_image_to_buffer(img: &RgbImage) -> ChromaKeyResult<image::RgbImage> {
    let width = u32::try_from(img.width()).map_err(|_| invalid_dimensions(img))?;
    let height = u32::try_from(img.height()).map_err(|_| invalid_dimensions(img))?;
    image::RgbImage::from_raw(width, height, img.to_raw()).ok_or_else(|| invalid_dimensions(img))
}

/// Loads an image from disk and converts it to RGB8.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ChromaKeyResult<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| ChromaKeyError::ImageIo {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    rgb_image_from_dynamic(&img)
}

/// Saves an image; the format is chosen from the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> ChromaKeyResult<()> {
    let path = path.as_ref();
    rgb_image_to_buffer(img)?
        .save(path)
        .map_err(|err| ChromaKeyError::ImageIo {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
}

fn invalid_dimensions(img: &RgbImage) -> ChromaKeyError {
    ChromaKeyError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    }
}
