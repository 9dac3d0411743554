// Loads the static background the cloak reveals.
// Visual expectation: wherever red is detected, this image shows through.
use std::path::Path;

use image::imageops::{self, FilterType};

use crate::error::Error;
use crate::types::Frame;

/// Read the image at `path` and fit it to the camera resolution.
/// A different-sized file is stretched once here, so every frame lines up with it.
pub fn load_background(path: &Path, width: u32, height: u32) -> Result<Frame, Error> {
    let img = image::open(path)
        .map_err(|source| Error::Background { path: path.to_path_buf(), source })?
        .to_rgb8();

    let (w, h) = img.dimensions();
    if (w, h) == (width, height) {
        return Ok(img);
    }

    log::info!(
        "resizing background {} from {w}x{h} to camera resolution {width}x{height}",
        path.display()
    );
    Ok(imageops::resize(&img, width, height, FilterType::Triangle))
}
