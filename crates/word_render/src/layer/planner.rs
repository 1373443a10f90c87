use image::GrayImage;
use log::debug;
use rand::Rng;

use super::config::{ConfigError, LayerConfig, Vocabulary};
use super::grid::{self, GridCell};
use super::mapping::DensityAlphaMapper;
use crate::glyph::GlyphFace;

/// Smallest font size a glyph may be resolved to.
pub const MIN_FONT_SIZE: u32 = 6;

/// Range of the per-glyph size variation factor.
pub const SIZE_VARIATION: (f32, f32) = (0.9, 1.2);

/// Maximum absolute rotation, in degrees, of glyphs on rotating layers.
pub const MAX_ROTATION_DEGREES: f32 = 25.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation that returns `self` at `t = 0` and `to` at `t = 1`
    /// exactly.
    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x * (1.0 - t) + to.x * t,
            y: self.y * (1.0 - t) + to.y * t,
        }
    }
}

/// One word to draw, fully resolved. Created by [`LayerPlanner::plan`] and
/// never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub word: String,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
    /// Center of the drawn glyph.
    pub target: Point,
    pub alpha: u8,
    pub color: [u8; 3],
    /// Set only on layers that allow rotation.
    pub rotation_degrees: Option<f32>,
}

impl GlyphPlacement {
    pub fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.color;
        [r, g, b, self.alpha]
    }
}

/// Walks the sampling grid of one layer and scatters glyph placements with a
/// probability driven by cell darkness.
#[derive(Clone, Debug)]
pub struct LayerPlanner<'a> {
    config: &'a LayerConfig,
    mapper: DensityAlphaMapper,
}

impl<'a> LayerPlanner<'a> {
    pub fn new(config: &'a LayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, mapper: DensityAlphaMapper::for_layer(config) })
    }

    pub fn config(&self) -> &LayerConfig {
        self.config
    }

    /// Plans the layer in row-major grid order, which is also the draw order.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        gray: &GrayImage,
        face: &dyn GlyphFace,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> Vec<GlyphPlacement> {
        let (width, height) = gray.dimensions();
        let mut placements = Vec::new();

        for cell in grid::cells(width, height, self.config.step) {
            if let Some(placement) = self.plan_cell(gray, cell, face, vocabulary, rng) {
                placements.push(placement);
            }
        }

        debug!(
            "planned {} glyphs on a {}px grid over {}x{}",
            placements.len(),
            self.config.step,
            width,
            height
        );
        placements
    }

    fn plan_cell<R: Rng + ?Sized>(
        &self,
        gray: &GrayImage,
        cell: GridCell,
        face: &dyn GlyphFace,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> Option<GlyphPlacement> {
        let tone = self.mapper.map(grid::sample_luminance(gray, cell));

        // A roll is drawn for every cell so the stream stays aligned with the
        // grid; it can never exceed a density at or above 1.
        let roll: f32 = rng.gen();
        if roll > tone.density {
            return None;
        }

        let word = vocabulary.choose(rng).to_owned();

        let spread = cell.step as f32 * self.config.random_jitter;
        let jitter_x = (rng.gen::<f32>() - 0.5) * 2.0 * spread;
        let jitter_y = (rng.gen::<f32>() - 0.5) * 2.0 * spread;
        let (cx, cy) = cell.center();
        let target = Point::new(cx + jitter_x, cy + jitter_y);

        let factor = rng.gen_range(SIZE_VARIATION.0..=SIZE_VARIATION.1);
        let font_size = ((self.config.font_size as f32 * factor).round() as u32).max(MIN_FONT_SIZE);

        let rotation_degrees = self
            .config
            .allow_rotation
            .then(|| rng.gen_range(-MAX_ROTATION_DEGREES..=MAX_ROTATION_DEGREES));

        let extent = face.measure(&word, font_size);

        Some(GlyphPlacement {
            word,
            font_size,
            width: extent.width,
            height: extent.height,
            target,
            alpha: tone.alpha,
            color: self.config.color,
            rotation_degrees,
        })
    }
}
