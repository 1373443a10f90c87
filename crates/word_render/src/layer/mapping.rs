use super::config::LayerConfig;

/// Opacity and placement probability resolved for one grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellTone {
    pub alpha: u8,
    /// Placement probability. Values above 1 mean the cell is always filled.
    pub density: f32,
}

/// Maps cell luminance to glyph opacity and placement density.
///
/// Darker cells get more opaque glyphs and a higher chance of receiving one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityAlphaMapper {
    base_alpha: u8,
    alpha_boost_dark: u8,
    density_scale: f32,
}

impl DensityAlphaMapper {
    pub fn new(base_alpha: u8, alpha_boost_dark: u8, density_scale: f32) -> Self {
        Self { base_alpha, alpha_boost_dark, density_scale }
    }

    pub fn for_layer(config: &LayerConfig) -> Self {
        Self::new(config.base_alpha, config.alpha_boost_dark, config.density_scale)
    }

    pub fn map(&self, luminance: f32) -> CellTone {
        let darkness = 1.0 - (luminance / 255.0).clamp(0.0, 1.0);

        let alpha = f32::from(self.base_alpha) + darkness * f32::from(self.alpha_boost_dark);
        let alpha = alpha.round().clamp(0.0, 255.0) as u8;

        // Deliberately unclamped: saturated presets rely on density > 1.
        let density = darkness * self.density_scale;

        CellTone { alpha, density }
    }
}
