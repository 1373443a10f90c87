//! Fly-in animation of glyph layers over an accumulating canvas.
//!
//! Each layer is planned once. Its glyphs then travel in a straight line from
//! random points outside the canvas to their planned targets over
//! `frames_per_layer` frames, with a blur that fades as they arrive. Once a
//! layer has landed it is committed to the settled canvas, which every later
//! frame starts from. After the last layer the settled canvas cross-dissolves
//! into the source photograph.

use std::time::Duration;

use image::RgbImage;
use log::debug;
use rand::Rng;

use super::series::FrameSequence;
use crate::compose::canvas::Canvas;
use crate::compose::compositor::LayerCompositor;
use crate::glyph::GlyphFace;
use crate::image_pipeline::adjust;
use crate::layer::config::{ConfigError, LayerConfig, Vocabulary};
use crate::layer::planner::{GlyphPlacement, LayerPlanner, Point};
use crate::layer::presets;
use crate::WordArtError;

/// Blur radius of the first frame of a flight.
pub const FLIGHT_BLUR: f32 = 1.2;

/// Flight blur radii at or below this are skipped.
pub const MIN_FLIGHT_BLUR: f32 = 0.1;

/// Blur radius at the start of the fade into the photograph.
pub const FADE_BLUR: f32 = 1.5;

/// Offset range, as a fraction of the canvas side, of flight start points
/// beyond the canvas edge.
const START_OFFSET: (f32, f32) = (0.1, 0.5);

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSettings {
    /// Layers in commit order.
    pub layers: Vec<LayerConfig>,
    pub frames_per_layer: u32,
    pub final_original_frames: u32,
    pub frame_delay: Duration,
    pub background: [u8; 3],
}

impl AnimationSettings {
    /// Settings accumulating the layers of `styles` in order.
    pub fn from_styles<S: AsRef<str>>(styles: &[S]) -> Result<Self, ConfigError> {
        Ok(Self { layers: presets::concat_layers(styles)?, ..Self::default() })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames_per_layer == 0 {
            return Err(ConfigError::ZeroFramesPerLayer);
        }
        self.layers.iter().try_for_each(LayerConfig::validate)
    }

    /// Number of frames a successful run produces.
    pub fn expected_frames(&self) -> usize {
        self.frames_per_layer as usize * self.layers.len() + self.final_original_frames as usize
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            layers: presets::concat_layers(&presets::ANIMATION_STYLES).unwrap_or_default(),
            frames_per_layer: 2,
            final_original_frames: 6,
            frame_delay: Duration::from_millis(120),
            background: [255, 255, 255],
        }
    }
}

/// Progress of a director run, reported to the caller's observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Planning { layer: usize },
    Flying { layer: usize, frame: u32 },
    Committed { layer: usize },
    Fading { frame: u32 },
    Done,
}

/// A planned glyph together with the off-canvas point it flies in from.
#[derive(Clone, Debug, PartialEq)]
pub struct Flight {
    pub placement: GlyphPlacement,
    pub start: Point,
}

impl Flight {
    /// Position at normalized progress `t`: the start at 0, the target at 1.
    pub fn position_at(&self, t: f32) -> Point {
        self.start.lerp(self.placement.target, t)
    }
}

/// Random point beyond one of the four canvas edges, chosen uniformly.
pub fn offscreen_start<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Point {
    let (w, h) = (width as f32, height as f32);
    let side = rng.gen_range(0..4);
    let offset = rng.gen_range(START_OFFSET.0..=START_OFFSET.1);
    match side {
        0 => Point::new(-w * offset, rng.gen_range(0.0..=h)),
        1 => Point::new(w * (1.0 + offset), rng.gen_range(0.0..=h)),
        2 => Point::new(rng.gen_range(0.0..=w), -h * offset),
        _ => Point::new(rng.gen_range(0.0..=w), h * (1.0 + offset)),
    }
}

pub struct AnimationDirector<'a> {
    face: &'a dyn GlyphFace,
    vocabulary: &'a Vocabulary,
    settings: &'a AnimationSettings,
}

impl<'a> AnimationDirector<'a> {
    pub fn new(
        face: &'a dyn GlyphFace,
        vocabulary: &'a Vocabulary,
        settings: &'a AnimationSettings,
    ) -> Self {
        Self { face, vocabulary, settings }
    }

    /// Produces every frame of the animation over `base`, which must already
    /// be at output resolution.
    ///
    /// Configuration is checked before the first frame; a run either returns
    /// all frames or none.
    pub fn run<R, F>(
        &self,
        base: &RgbImage,
        rng: &mut R,
        mut observe: F,
    ) -> Result<FrameSequence, WordArtError>
    where
        R: Rng + ?Sized,
        F: FnMut(Phase),
    {
        let mut enter = |phase: Phase| {
            debug!("animation phase: {phase:?}");
            observe(phase);
        };

        self.settings.validate()?;
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroAreaImage.into());
        }
        let planners = self
            .settings
            .layers
            .iter()
            .map(LayerPlanner::new)
            .collect::<Result<Vec<_>, _>>()?;

        let gray = adjust::grayscale(base);
        let compositor = LayerCompositor::new(self.face);
        let mut settled = Canvas::new(width, height, self.settings.background);
        let capacity = self.settings.expected_frames();
        let mut frames = FrameSequence::with_capacity(self.settings.frame_delay, capacity);

        for (layer, planner) in planners.iter().enumerate() {
            enter(Phase::Planning { layer });
            let flights: Vec<Flight> = planner
                .plan(&gray, self.face, self.vocabulary, rng)
                .into_iter()
                .map(|placement| Flight { placement, start: offscreen_start(width, height, rng) })
                .collect();
            debug!("layer {}: {} glyphs in flight", layer + 1, flights.len());

            let frames_per_layer = self.settings.frames_per_layer;
            for frame in 0..frames_per_layer {
                enter(Phase::Flying { layer, frame });
                let t = (frame + 1) as f32 / frames_per_layer as f32;
                frames.push_frame(flight_frame(&compositor, &settled, &flights, t));
            }

            for flight in &flights {
                compositor.draw_at(&mut settled, &flight.placement, flight.placement.target);
            }
            enter(Phase::Committed { layer });
        }

        let original = adjust::to_rgba(base);
        let fade_frames = self.settings.final_original_frames;
        for frame in 0..fade_frames {
            enter(Phase::Fading { frame });
            let amount = (frame + 1) as f32 / fade_frames as f32;
            let blended = adjust::cross_fade(settled.image(), &original, amount);
            frames.push_frame(adjust::blur(&blended, (FADE_BLUR * (1.0 - amount)).max(0.0)));
        }

        enter(Phase::Done);
        debug!("animation finished with {} frames", frames.len());
        Ok(frames)
    }
}

/// One in-flight frame: a private copy of `settled` with every glyph drawn at
/// progress `t`, blurred while the glyphs are still far from home.
fn flight_frame(
    compositor: &LayerCompositor<'_>,
    settled: &Canvas,
    flights: &[Flight],
    t: f32,
) -> image::RgbaImage {
    let mut frame = settled.clone();
    for flight in flights {
        compositor.draw_at(&mut frame, &flight.placement, flight.position_at(t));
    }

    let radius = FLIGHT_BLUR * (1.0 - t);
    if radius > MIN_FLIGHT_BLUR {
        adjust::blur(frame.image(), radius)
    } else {
        frame.into_image()
    }
}
