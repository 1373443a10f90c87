pub mod font;

/// Pixel size of a rendered word's ink bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphExtent {
    pub width: u32,
    pub height: u32,
}

impl GlyphExtent {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 8-bit coverage of a rendered word, cropped to its ink bounding box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    /// Row-major coverage buffer, or `None` when its length is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, coverage: Vec<u8>) -> Option<Self> {
        (width as usize * height as usize == coverage.len())
            .then_some(Self { width, height, coverage })
    }

    /// Fully covered rectangle.
    pub fn solid(width: u32, height: u32) -> Self {
        Self { width, height, coverage: vec![u8::MAX; width as usize * height as usize] }
    }

    pub fn extent(&self) -> GlyphExtent {
        GlyphExtent { width: self.width, height: self.height }
    }

    pub fn is_empty(&self) -> bool {
        self.extent().is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage[y as usize * self.width as usize + x as usize]
    }
}

/// Font capability consumed by planning and compositing.
///
/// `render(text, size).extent()` must equal `measure(text, size)`.
pub trait GlyphFace {
    fn measure(&self, text: &str, size: u32) -> GlyphExtent;

    fn render(&self, text: &str, size: u32) -> GlyphMask;
}

/// Glyph faces with known geometry for unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::{GlyphExtent, GlyphFace, GlyphMask};

    /// Renders every character as a solid `size` x `size` square.
    pub(crate) struct BlockFace;

    impl GlyphFace for BlockFace {
        fn measure(&self, text: &str, size: u32) -> GlyphExtent {
            GlyphExtent { width: size * text.chars().count() as u32, height: size }
        }

        fn render(&self, text: &str, size: u32) -> GlyphMask {
            let extent = self.measure(text, size);
            GlyphMask::solid(extent.width, extent.height)
        }
    }
}
