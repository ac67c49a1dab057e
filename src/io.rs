//! Image-header helpers via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Only dimensions are read;
//! pixel data is never decoded.

use crate::geometry::ImageSize;
use crate::remap::ResizePolicy;
use crate::util::{FaceBoxesError, FaceBoxesResult};
use std::path::Path;

/// Reads the `(width, height)` of an image file from its header.
pub fn image_size<P: AsRef<Path>>(path: P) -> FaceBoxesResult<ImageSize> {
    let (width, height) =
        image::image_dimensions(path).map_err(|err| FaceBoxesError::ImageIo {
            reason: err.to_string(),
        })?;
    Ok(ImageSize::new(width as usize, height as usize))
}

/// Picks the resize scale and resized size for an image file.
pub fn scale_for_image_file<P: AsRef<Path>>(
    path: P,
    policy: &ResizePolicy,
) -> FaceBoxesResult<(f64, ImageSize)> {
    policy.validate()?;
    let original = image_size(path)?;
    let scale = policy.scale_for(original.height, original.width);
    let resized = policy.resized_size(original.height, original.width);
    Ok((scale, resized))
}
