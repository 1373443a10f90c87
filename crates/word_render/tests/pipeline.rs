use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use word_render::{
    cells, presets, sample_luminance, side_by_side, write_animation, AnimationDirector,
    AnimationOutcome, AnimationSettings, FrameSequence, GlyphExtent, GlyphFace, GlyphMask,
    LayerConfig, LayerPlanner, MultiLayerRenderer, Panel, Point, RenderSettings, Vocabulary,
};

/// Draws each character as a hollow square so overlapping glyphs stay
/// distinguishable.
struct FrameFace;

impl GlyphFace for FrameFace {
    fn measure(&self, text: &str, size: u32) -> GlyphExtent {
        GlyphExtent { width: size * text.chars().count() as u32, height: size }
    }

    fn render(&self, text: &str, size: u32) -> GlyphMask {
        let extent = self.measure(text, size);
        let mut coverage = vec![0u8; (extent.width * extent.height) as usize];
        for y in 0..extent.height {
            for x in 0..extent.width {
                let edge = x == 0 || y == 0 || x + 1 == extent.width || y + 1 == extent.height;
                if edge {
                    coverage[(y * extent.width + x) as usize] = 255;
                }
            }
        }
        GlyphMask { width: extent.width, height: extent.height, coverage }
    }
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("word_render_{}_{name}", std::process::id()))
}

fn portrait(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - width as f32 / 2.0;
        let dy = y as f32 - height as f32 / 2.0;
        let shade = ((dx * dx + dy * dy).sqrt() * 4.0).min(255.0) as u8;
        Rgb([shade, shade, shade])
    })
}

#[test]
fn black_square_scenario() {
    let config = LayerConfig::new(50, 50).with_alpha(10, 180).with_density_scale(0.7);
    let gray = image::GrayImage::from_pixel(100, 100, Luma([0]));
    for cell in cells(100, 100, 50) {
        assert_eq!(sample_luminance(&gray, cell), 0.0);
    }

    let vocabulary = Vocabulary::from_chars("黑").unwrap();
    let planner = LayerPlanner::new(&config).unwrap();
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let placements = planner.plan(&gray, &FrameFace, &vocabulary, &mut rng);
        assert!(placements.iter().all(|placement| placement.alpha == 190));
    }
}

#[test]
fn single_cell_without_jitter_lands_in_center() {
    let config = LayerConfig::new(20, 10).with_jitter(0.0).with_density_scale(5.0);
    let gray = image::GrayImage::from_pixel(20, 20, Luma([40]));
    let planner = LayerPlanner::new(&config).unwrap();
    let placements =
        planner.plan(&gray, &FrameFace, &Vocabulary::default(), &mut StdRng::seed_from_u64(0));
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].target, Point::new(10.0, 10.0));
}

#[test]
fn preset_render_is_reproducible() {
    let layers = presets::lookup(presets::CLASSIC).unwrap().layers;
    let vocabulary = Vocabulary::default();
    let image = portrait(120, 90);
    let renderer = MultiLayerRenderer::new(&FrameFace, &layers, &vocabulary)
        .with_background(RenderSettings::default().background);

    let first = renderer.render(&image, &mut StdRng::seed_from_u64(2024)).unwrap();
    let second = renderer.render(&image, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(first, second);
    assert_eq!((first.width(), first.height()), (120, 90));
    assert!(first.image().pixels().any(|pixel| pixel.0[0] < 128), "no glyph ink found");
}

#[test]
fn animation_round_trips_through_gif() {
    let vocabulary = Vocabulary::default();
    let settings = AnimationSettings {
        frames_per_layer: 2,
        final_original_frames: 3,
        frame_delay: Duration::from_millis(120),
        ..AnimationSettings::default()
    };
    assert_eq!(settings.layers.len(), 6);

    let image = portrait(64, 48);
    let frames = AnimationDirector::new(&FrameFace, &vocabulary, &settings)
        .run(&image, &mut StdRng::seed_from_u64(9), |_| {})
        .unwrap();
    assert_eq!(frames.len(), 2 * 6 + 3);

    let path = scratch_path("animation.gif");
    let outcome = write_animation(&path, frames).unwrap();
    assert_eq!(outcome, AnimationOutcome::Written { frames: 15 });

    let decoder = GifDecoder::new(File::open(&path).unwrap()).unwrap();
    let decoded = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(decoded.len(), 15);
    assert_eq!(decoded[0].buffer().dimensions(), (64, 48));
    let (numer, denom) = decoded[0].delay().numer_denom_ms();
    assert_eq!(numer / denom, 120);
    std::fs::remove_file(&path).ok();
}

#[test]
fn empty_animation_is_reported_not_written() {
    let path = scratch_path("empty.gif");
    let outcome = write_animation(&path, FrameSequence::new(Duration::from_millis(50))).unwrap();
    assert_eq!(outcome, AnimationOutcome::NothingToProduce);
    assert!(!path.exists());
}

#[test]
fn comparison_sheet_spans_all_panels() {
    let vocabulary = Vocabulary::default();
    let image = portrait(40, 30);
    let mut panels = vec![Panel::labelled(word_render::to_rgba(&image), "original")];
    for name in presets::KEY_STYLES {
        let layers = presets::lookup(name).unwrap().layers;
        let canvas = MultiLayerRenderer::new(&FrameFace, &layers, &vocabulary)
            .render(&image, &mut StdRng::seed_from_u64(1))
            .unwrap();
        panels.push(Panel::labelled(canvas.into_image(), name));
    }

    let sheet = side_by_side(&panels, &FrameFace).unwrap();
    assert_eq!(sheet.dimensions(), (160, 30 + word_render::LABEL_BAND));
}
