use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::layer::config::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetGeometry {
    pub width: u32,
    pub height: u32,
}

impl TargetGeometry {
    /// Geometry `max_width` pixels wide with the source aspect ratio. The
    /// result may be larger than the source; upscaling leaves room for more
    /// visible glyph detail.
    pub fn fit_width(
        source_width: u32,
        source_height: u32,
        max_width: u32,
    ) -> Result<Self, ConfigError> {
        if max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        if source_width == 0 || source_height == 0 {
            return Err(ConfigError::ZeroAreaImage);
        }

        let scale = max_width as f64 / source_width as f64;
        let height = ((source_height as f64 * scale) as u32).max(1);
        Ok(Self { width: max_width, height })
    }
}

/// Resizes `image` to `max_width` wide with a Lanczos filter, preserving the
/// aspect ratio.
pub fn fit_width(image: &RgbImage, max_width: u32) -> Result<RgbImage, ConfigError> {
    let geometry = TargetGeometry::fit_width(image.width(), image.height(), max_width)?;
    if geometry.width == image.width() && geometry.height == image.height() {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, geometry.width, geometry.height, FilterType::Lanczos3))
}

/// Like [`fit_width`], but only ever shrinks: images no wider than
/// `max_width` are returned at their native size.
pub fn shrink_to_width(image: &RgbImage, max_width: u32) -> Result<RgbImage, ConfigError> {
    if max_width > 0 && image.width() <= max_width {
        return Ok(image.clone());
    }
    fit_width(image, max_width)
}
