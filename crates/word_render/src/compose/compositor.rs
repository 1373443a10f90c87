use image::{Rgba, RgbaImage};

use super::canvas::Canvas;
use super::rotate;
use crate::glyph::{GlyphFace, GlyphMask};
use crate::layer::planner::{GlyphPlacement, Point};

/// Draws planned glyphs onto a canvas in the order given.
#[derive(Clone, Copy)]
pub struct LayerCompositor<'a> {
    face: &'a dyn GlyphFace,
}

impl<'a> LayerCompositor<'a> {
    pub fn new(face: &'a dyn GlyphFace) -> Self {
        Self { face }
    }

    /// Draws every placement centered on its target. Later placements land
    /// on top of earlier ones.
    pub fn draw(&self, canvas: &mut Canvas, placements: &[GlyphPlacement]) {
        for placement in placements {
            self.draw_at(canvas, placement, placement.target);
        }
    }

    /// Draws `placement` centered on `center` instead of its target.
    pub fn draw_at(&self, canvas: &mut Canvas, placement: &GlyphPlacement, center: Point) {
        let mask = self.face.render(&placement.word, placement.font_size);
        if mask.is_empty() {
            return;
        }

        match placement.rotation_degrees {
            Some(degrees) => draw_rotated(canvas, &mask, placement.rgba(), degrees, center),
            None => {
                let (left, top) = top_left(center, mask.width, mask.height);
                canvas.draw_mask(&mask, left, top, placement.rgba());
            },
        }
    }
}

fn top_left(center: Point, width: u32, height: u32) -> (i64, i64) {
    let left = (center.x - width as f32 / 2.0).floor() as i64;
    let top = (center.y - height as f32 / 2.0).floor() as i64;
    (left, top)
}

/// Renders the glyph into an isolated buffer twice its size, rotates it, and
/// composites the rotated ink centered on `center`.
fn draw_rotated(canvas: &mut Canvas, mask: &GlyphMask, rgba: [u8; 4], degrees: f32, center: Point) {
    let [r, g, b, a] = rgba;
    let offset_x = mask.width / 2;
    let offset_y = mask.height / 2;

    let mut isolated = RgbaImage::new(mask.width * 2, mask.height * 2);
    for y in 0..mask.height {
        for x in 0..mask.width {
            let coverage = u16::from(mask.get(x, y));
            if coverage == 0 {
                continue;
            }
            let alpha = ((coverage * u16::from(a) + 127) / 255) as u8;
            isolated.put_pixel(x + offset_x, y + offset_y, Rgba([r, g, b, alpha]));
        }
    }

    let rotated = rotate::rotate_expand(&isolated, degrees);
    let Some(ink) = rotate::crop_to_opaque(&rotated) else {
        return;
    };

    let (left, top) = top_left(center, ink.width(), ink.height());
    canvas.composite(&ink, left, top);
}
