use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, ImageFormat, RgbaImage};
use log::{info, warn};

use crate::animation::series::FrameSequence;
use crate::WordArtError;

/// Quantizer speed handed to the GIF encoder (1 = best, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// Result of writing an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    Written { frames: usize },
    /// The sequence was empty; no file was created.
    NothingToProduce,
}

/// Saves a static composition, dropping alpha for formats that cannot store
/// it.
pub fn save_canvas<P: AsRef<Path>>(path: P, image: &RgbaImage) -> Result<(), WordArtError> {
    let path = path.as_ref();
    let keeps_alpha = matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Png
            | ImageFormat::WebP
            | ImageFormat::Tiff
            | ImageFormat::Gif
            | ImageFormat::Ico)
    );

    if keeps_alpha {
        image.save(path)?;
    } else {
        DynamicImage::ImageRgba8(image.clone()).into_rgb8().save(path)?;
    }
    info!("saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Writes `frames` as a looping GIF. An empty sequence writes nothing.
pub fn write_animation<P: AsRef<Path>>(
    path: P,
    frames: FrameSequence,
) -> Result<AnimationOutcome, WordArtError> {
    let path = path.as_ref();
    if frames.is_empty() {
        warn!("no frames generated; nothing written to {}", path.display());
        return Ok(AnimationOutcome::NothingToProduce);
    }

    let delay = Delay::from_saturating_duration(frames.frame_delay());
    let count = frames.len();

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;
    for image in frames.into_frames() {
        encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
    }

    info!("saved {count} frame animation to {}", path.display());
    Ok(AnimationOutcome::Written { frames: count })
}
