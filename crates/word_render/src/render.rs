use std::path::Path;

use image::{GrayImage, RgbImage};
use log::debug;
use rand::Rng;

use crate::compose::canvas::Canvas;
use crate::compose::compositor::LayerCompositor;
use crate::glyph::GlyphFace;
use crate::image_pipeline::{adjust, loader, resize};
use crate::layer::config::{ConfigError, LayerConfig, Vocabulary};
use crate::layer::planner::LayerPlanner;
use crate::WordArtError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Output width; height follows the source aspect ratio.
    pub max_width: u32,
    /// Canvas fill behind the glyphs.
    pub background: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { max_width: 800, background: [255, 255, 255] }
    }
}

/// Loads `path` and scales it to the configured output width.
pub fn prepare_source<P: AsRef<Path>>(
    path: P,
    settings: &RenderSettings,
) -> Result<RgbImage, WordArtError> {
    if settings.max_width == 0 {
        return Err(ConfigError::ZeroMaxWidth.into());
    }
    let image = loader::load_rgb(path)?;
    Ok(resize::fit_width(&image, settings.max_width)?)
}

/// Plans and composites an ordered stack of layers onto one canvas.
pub struct MultiLayerRenderer<'a> {
    face: &'a dyn GlyphFace,
    layers: &'a [LayerConfig],
    vocabulary: &'a Vocabulary,
    background: [u8; 3],
}

impl<'a> MultiLayerRenderer<'a> {
    pub fn new(
        face: &'a dyn GlyphFace,
        layers: &'a [LayerConfig],
        vocabulary: &'a Vocabulary,
    ) -> Self {
        Self { face, layers, vocabulary, background: RenderSettings::default().background }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Renders `image`, which must already be at output resolution, onto a
    /// fresh canvas.
    pub fn render<R: Rng + ?Sized>(
        &self,
        image: &RgbImage,
        rng: &mut R,
    ) -> Result<Canvas, WordArtError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroAreaImage.into());
        }

        let gray = adjust::grayscale(image);
        let mut canvas = Canvas::new(width, height, self.background);
        self.render_onto(&mut canvas, &gray, rng)?;
        Ok(canvas)
    }

    /// Draws every layer in order onto `canvas`; later layers land on top.
    ///
    /// All layers are validated before the first one is drawn.
    pub fn render_onto<R: Rng + ?Sized>(
        &self,
        canvas: &mut Canvas,
        gray: &GrayImage,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        let planners =
            self.layers.iter().map(LayerPlanner::new).collect::<Result<Vec<_>, _>>()?;
        let compositor = LayerCompositor::new(self.face);

        for (index, planner) in planners.iter().enumerate() {
            let placements = planner.plan(gray, self.face, self.vocabulary, rng);
            debug!("drawing layer {}/{}", index + 1, planners.len());
            compositor.draw(canvas, &placements);
        }
        Ok(())
    }
}
