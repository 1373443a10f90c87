//! Renders photographs as layered scatters of word glyphs whose size,
//! opacity, and density follow local luminance, and animates those layers
//! flying in over an accumulating canvas.

mod animation;
mod compose;
mod glyph;
mod image_pipeline;
mod layer;
mod render;
mod stitch;

use std::path::PathBuf;

pub use animation::{
    director::{offscreen_start, AnimationDirector, AnimationSettings, Flight, Phase},
    series::FrameSequence,
};
pub use compose::{canvas::Canvas, compositor::LayerCompositor};
pub use glyph::{font::FontFace, GlyphExtent, GlyphFace, GlyphMask};
pub use image_pipeline::{
    adjust::{blur, cross_fade, grayscale, to_rgba},
    encode::{save_canvas, write_animation, AnimationOutcome},
    loader::load_rgb,
    resize::{fit_width, shrink_to_width, TargetGeometry},
};
pub use layer::{
    config::{ConfigError, LayerConfig, Vocabulary},
    grid::{cells, sample_luminance, GridCell},
    mapping::{CellTone, DensityAlphaMapper},
    planner::{GlyphPlacement, LayerPlanner, Point},
    presets::{self, StylePreset},
};
pub use render::{prepare_source, MultiLayerRenderer, RenderSettings};
pub use stitch::{side_by_side, Panel, LABEL_BAND, LABEL_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum WordArtError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to load font {path:?}: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
