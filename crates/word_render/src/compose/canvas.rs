use image::{Rgba, RgbaImage};

use crate::glyph::GlyphMask;

/// Mutable RGBA pixel buffer that glyphs are composited onto.
///
/// Cloning yields an independent copy; animation frames are always clones of
/// the settled canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self { image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, u8::MAX])) }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Blends `color` at opacity `alpha` (0.0..=1.0) over the pixel at
    /// (`x`, `y`). Out of bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        blend_over(self.image.get_pixel_mut(x as u32, y as u32), color, alpha);
    }

    /// Draws `mask` with its top-left corner at (`left`, `top`), tinting the
    /// covered pixels with `rgba`.
    pub fn draw_mask(&mut self, mask: &GlyphMask, left: i64, top: i64, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        if a == 0 {
            return;
        }
        let opacity = f32::from(a) / 255.0;

        for y in 0..mask.height {
            for x in 0..mask.width {
                let coverage = mask.get(x, y);
                if coverage == 0 {
                    continue;
                }
                let alpha = opacity * f32::from(coverage) / 255.0;
                self.blend_pixel(left + i64::from(x), top + i64::from(y), [r, g, b], alpha);
            }
        }
    }

    /// Composites a straight-alpha RGBA buffer with its top-left corner at
    /// (`left`, `top`).
    pub fn composite(&mut self, src: &RgbaImage, left: i64, top: i64) {
        for (x, y, pixel) in src.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let opacity = f32::from(a) / 255.0;
            self.blend_pixel(left + i64::from(x), top + i64::from(y), [r, g, b], opacity);
        }
    }
}

/// Straight-alpha "over": `src` at opacity `alpha` on top of `dst`.
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }

    for channel in 0..3 {
        let value = (f32::from(src[channel]) * alpha
            + f32::from(dst.0[channel]) * dst_alpha * (1.0 - alpha))
            / out_alpha;
        dst.0[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
