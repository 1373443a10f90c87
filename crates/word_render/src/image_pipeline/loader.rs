use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::WordArtError;

/// Decodes any supported image format into 8-bit RGB.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage, WordArtError> {
    let path = path.as_ref();
    let image = image::open(path)?.into_rgb8();
    debug!("loaded {}x{} image from {}", image.width(), image.height(), path.display());
    Ok(image)
}
