use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use word_render::{
    prepare_source, presets, save_canvas, side_by_side, to_rgba, write_animation,
    load_rgb, shrink_to_width, AnimationDirector, AnimationOutcome, AnimationSettings, FontFace,
    MultiLayerRenderer, Panel, Phase, RenderSettings, Vocabulary,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recreate photographs with layered words of varying size and opacity"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one static composition with a named style
    Render(RenderArgs),
    /// Render several styles and stitch them into comparison sheets
    Variations(VariationsArgs),
    /// Animate word layers flying in, then fade into the photograph
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image path
    input: PathBuf,
    /// Output image path (PNG recommended)
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
    /// Style preset to render
    #[arg(long, default_value = presets::CLASSIC)]
    style: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct VariationsArgs {
    /// Input image path
    input: PathBuf,
    /// Directory receiving one image per style plus the comparison sheets
    #[arg(long, default_value = "variations")]
    out_dir: PathBuf,
    /// Styles to render; unknown names are skipped
    #[arg(long, num_args = 1.., default_values_t = presets::DEPTH_STYLES.map(String::from))]
    styles: Vec<String>,
    /// File name of the stitched comparison strip inside the output directory
    #[arg(long, default_value = "comparison.png")]
    comparison_output: PathBuf,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input image path
    input: PathBuf,
    /// Output GIF path
    #[arg(long, default_value = "depth_transition.gif")]
    output_gif: PathBuf,
    /// Frames spent flying each layer in
    #[arg(long, default_value_t = 2)]
    frames_per_layer: u32,
    /// Frames spent fading into the original photograph
    #[arg(long, default_value_t = 6)]
    final_original_frames: u32,
    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 120)]
    frame_delay_ms: u64,
    /// Styles whose layers are accumulated, in order
    #[arg(long, num_args = 1.., default_values_t = presets::ANIMATION_STYLES.map(String::from))]
    styles: Vec<String>,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Font file covering the vocabulary (e.g. a CJK TTF/OTF)
    #[arg(long)]
    font: PathBuf,
    /// Output width; height follows the source aspect ratio
    #[arg(long, default_value_t = 800)]
    max_width: u32,
    /// Canvas background as R,G,B
    #[arg(long, default_value = "255,255,255", value_parser = parse_rgb)]
    background: [u8; 3],
    /// Characters used as words (defaults to the bundled Chinese set)
    #[arg(long)]
    words: Option<String>,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Variations(args) => variations(args),
        Commands::Animate(args) => animate(args),
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let preset = presets::lookup(&args.style)?;
    let vocabulary = args.common.vocabulary()?;
    let face = args.common.face()?;
    let settings = args.common.render_settings();
    let source = prepare_source(&args.input, &settings)
        .with_context(|| format!("failed to prepare {:?}", args.input))?;

    let mut rng = args.common.rng();
    let canvas = MultiLayerRenderer::new(&face, &preset.layers, &vocabulary)
        .with_background(settings.background)
        .render(&source, &mut rng)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    save_canvas(&args.output, canvas.image())
        .with_context(|| format!("failed to save {:?}", args.output))?;
    Ok(())
}

fn variations(args: VariationsArgs) -> Result<()> {
    let selected = presets::select(&args.styles)?;
    let vocabulary = args.common.vocabulary()?;
    let face = args.common.face()?;
    let settings = args.common.render_settings();
    let source = prepare_source(&args.input, &settings)
        .with_context(|| format!("failed to prepare {:?}", args.input))?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let mut rng = args.common.rng();
    let progress = progress_bar(selected.len(), "styles")?;
    let mut rendered: Vec<(&'static str, RgbaImage)> = Vec::with_capacity(selected.len());
    for preset in &selected {
        progress.set_message(preset.name);
        let canvas = MultiLayerRenderer::new(&face, &preset.layers, &vocabulary)
            .with_background(settings.background)
            .render(&source, &mut rng)
            .with_context(|| format!("failed to render style {}", preset.name))?;

        let path = args.out_dir.join(format!("{}.png", preset.name));
        save_canvas(&path, canvas.image()).with_context(|| format!("failed to save {:?}", path))?;
        rendered.push((preset.name, canvas.into_image()));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let labelled = |(name, image): &(&str, RgbaImage)| Panel::labelled(image.clone(), *name);
    let key_styles: Vec<_> = presets::KEY_STYLES
        .iter()
        .filter_map(|key| rendered.iter().find(|(name, _)| name == key))
        .collect();

    let comparison_panels = if key_styles.is_empty() {
        rendered.iter().map(labelled).collect::<Vec<_>>()
    } else {
        // the reference photo keeps its native size unless it is too wide
        let photo = load_rgb(&args.input)
            .with_context(|| format!("failed to load {:?}", args.input))?;
        let original = to_rgba(&shrink_to_width(&photo, args.common.max_width)?);
        let original_path = args.out_dir.join("original.png");
        save_canvas(&original_path, &original)
            .with_context(|| format!("failed to save {:?}", original_path))?;

        let mut evaluation_panels = vec![Panel::labelled(original, "original")];
        evaluation_panels.extend(key_styles.into_iter().map(labelled));
        let evaluation =
            side_by_side(&evaluation_panels, &face).context("evaluation sheet has no panels")?;
        let evaluation_path = args.out_dir.join("evaluation.png");
        save_canvas(&evaluation_path, &evaluation)
            .with_context(|| format!("failed to save {:?}", evaluation_path))?;

        // first three styles, with the evaluation sheet as the fourth panel
        let mut panels: Vec<_> = rendered.iter().take(3).map(labelled).collect();
        panels.push(Panel::labelled(evaluation, "evaluation"));
        panels
    };

    let comparison =
        side_by_side(&comparison_panels, &face).context("comparison sheet has no panels")?;
    let comparison_path = args.out_dir.join(&args.comparison_output);
    save_canvas(&comparison_path, &comparison)
        .with_context(|| format!("failed to save {:?}", comparison_path))?;
    Ok(())
}

fn animate(args: AnimateArgs) -> Result<()> {
    let settings = AnimationSettings {
        frames_per_layer: args.frames_per_layer,
        final_original_frames: args.final_original_frames,
        frame_delay: std::time::Duration::from_millis(args.frame_delay_ms),
        background: args.common.background,
        ..AnimationSettings::from_styles(&args.styles)?
    };
    settings.validate()?;
    let vocabulary = args.common.vocabulary()?;
    let face = args.common.face()?;
    let source = prepare_source(&args.input, &args.common.render_settings())
        .with_context(|| format!("failed to prepare {:?}", args.input))?;

    let mut rng = args.common.rng();
    let progress = progress_bar(settings.expected_frames(), "frames")?;
    let layer_count = settings.layers.len();
    let frames = AnimationDirector::new(&face, &vocabulary, &settings)
        .run(&source, &mut rng, |phase| match phase {
            Phase::Planning { layer } => {
                progress.set_message(format!("layer {}/{}", layer + 1, layer_count));
            },
            Phase::Flying { .. } => progress.inc(1),
            Phase::Fading { frame } => {
                if frame == 0 {
                    progress.set_message("fading into original");
                }
                progress.inc(1);
            },
            Phase::Committed { .. } | Phase::Done => {},
        })
        .with_context(|| format!("failed to animate {:?}", args.input))?;
    progress.finish_and_clear();

    match write_animation(&args.output_gif, frames)
        .with_context(|| format!("failed to write {:?}", args.output_gif))?
    {
        AnimationOutcome::Written { frames } => info!("{frames} frames written"),
        AnimationOutcome::NothingToProduce => warn!("no frames generated; nothing to save"),
    }
    Ok(())
}

fn progress_bar(len: usize, unit: &str) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len as u64);
    progress.set_style(
        ProgressStyle::with_template(&format!(
            "{{spinner}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] \
             {{pos}}/{{len}} {unit} {{msg}}"
        ))?
        .progress_chars("=> "),
    );
    Ok(progress)
}

fn parse_rgb(value: &str) -> Result<[u8; 3], String> {
    let channels = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|err| format!("{part:?}: {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[u8; 3]>::try_from(channels).map_err(|_| format!("expected R,G,B, got {value:?}"))
}

impl CommonArgs {
    fn render_settings(&self) -> RenderSettings {
        RenderSettings { max_width: self.max_width, background: self.background }
    }

    fn vocabulary(&self) -> Result<Vocabulary> {
        match &self.words {
            Some(words) => Ok(Vocabulary::from_chars(words)?),
            None => Ok(Vocabulary::default()),
        }
    }

    fn face(&self) -> Result<FontFace> {
        FontFace::load(&self.font).with_context(|| format!("failed to load font {:?}", self.font))
    }

    fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!("using seed {seed}");
        StdRng::seed_from_u64(seed)
    }
}
