use std::time::Duration;

use image::RgbaImage;

/// Append-only list of rendered frames, stored in playback order.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Vec<RgbaImage>,
    frame_delay: Duration,
    dimensions: Option<(u32, u32)>,
}

impl FrameSequence {
    pub fn new(frame_delay: Duration) -> Self {
        Self { frames: Vec::new(), frame_delay, dimensions: None }
    }

    pub fn with_capacity(frame_delay: Duration, capacity: usize) -> Self {
        Self { frames: Vec::with_capacity(capacity), frame_delay, dimensions: None }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    pub fn push_frame(&mut self, frame: RgbaImage) {
        match self.dimensions {
            Some(dimensions) => debug_assert_eq!(dimensions, frame.dimensions()),
            None => self.dimensions = Some(frame.dimensions()),
        }
        self.frames.push(frame);
    }

    pub fn frame(&self, index: usize) -> Option<&RgbaImage> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RgbaImage> {
        self.frames.last()
    }

    pub fn total_duration(&self) -> Duration {
        self.frame_delay.saturating_mul(self.frames.len() as u32)
    }

    pub fn into_frames(self) -> Vec<RgbaImage> {
        self.frames
    }
}
