use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

use super::{GlyphExtent, GlyphFace, GlyphMask};
use crate::WordArtError;

/// Placement of one rasterized character relative to the pen origin on the
/// baseline, y growing downwards.
struct PlacedChar {
    ch: char,
    left: i32,
    top: i32,
    width: usize,
    height: usize,
}

/// Ink bounds of a laid out word, `(min_x, min_y, max_x, max_y)`.
type InkBounds = (i32, i32, i32, i32);

/// TrueType/OpenType face rasterized with `fontdue`.
pub struct FontFace {
    font: Font,
    path: PathBuf,
}

impl FontFace {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WordArtError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| WordArtError::Font {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::from_bytes(bytes, path)
    }

    pub fn from_bytes<P: AsRef<Path>>(bytes: Vec<u8>, origin: P) -> Result<Self, WordArtError> {
        let path = origin.as_ref().to_path_buf();
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|reason| WordArtError::Font { path: path.clone(), reason: reason.into() })?;
        Ok(Self { font, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn layout(&self, text: &str, size: u32) -> (Vec<PlacedChar>, Option<InkBounds>) {
        let px = size as f32;
        let mut pen = 0.0f32;
        let mut placed = Vec::with_capacity(text.len());
        let mut bounds: Option<InkBounds> = None;

        for ch in text.chars() {
            let metrics = self.font.metrics(ch, px);
            let left = pen.round() as i32 + metrics.xmin;
            let top = -(metrics.height as i32 + metrics.ymin);
            pen += metrics.advance_width;

            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }

            let right = left + metrics.width as i32;
            let bottom = top + metrics.height as i32;
            bounds = Some(match bounds {
                Some((x0, y0, x1, y1)) => {
                    (x0.min(left), y0.min(top), x1.max(right), y1.max(bottom))
                },
                None => (left, top, right, bottom),
            });
            placed.push(PlacedChar { ch, left, top, width: metrics.width, height: metrics.height });
        }

        (placed, bounds)
    }
}

impl GlyphFace for FontFace {
    fn measure(&self, text: &str, size: u32) -> GlyphExtent {
        match self.layout(text, size) {
            (_, Some((x0, y0, x1, y1))) => {
                GlyphExtent { width: (x1 - x0) as u32, height: (y1 - y0) as u32 }
            },
            (_, None) => GlyphExtent::default(),
        }
    }

    fn render(&self, text: &str, size: u32) -> GlyphMask {
        let (placed, Some((x0, y0, x1, y1))) = self.layout(text, size) else {
            return GlyphMask::default();
        };

        let width = (x1 - x0) as u32;
        let height = (y1 - y0) as u32;
        let mut coverage = vec![0u8; width as usize * height as usize];

        for glyph in placed {
            let (metrics, bitmap) = self.font.rasterize(glyph.ch, size as f32);
            // rasterize and metrics agree for the same char and size
            debug_assert_eq!((metrics.width, metrics.height), (glyph.width, glyph.height));

            let ox = (glyph.left - x0) as usize;
            let oy = (glyph.top - y0) as usize;
            for gy in 0..glyph.height.min(metrics.height) {
                for gx in 0..glyph.width.min(metrics.width) {
                    let value = bitmap[gy * metrics.width + gx];
                    let idx = (oy + gy) * width as usize + ox + gx;
                    coverage[idx] = coverage[idx].max(value);
                }
            }
        }

        GlyphMask { width, height, coverage }
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace").field("path", &self.path).finish_non_exhaustive()
    }
}
