//! Side-by-side comparison sheets.

use image::RgbaImage;

use crate::compose::canvas::Canvas;
use crate::glyph::GlyphFace;

/// Height of the band under the panels that holds the labels.
pub const LABEL_BAND: u32 = 40;

/// Pixel size of label text.
pub const LABEL_SIZE: u32 = 16;

const SHEET_BACKGROUND: [u8; 3] = [255, 255, 255];
const LABEL_COLOR: [u8; 4] = [0, 0, 0, 255];

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub image: RgbaImage,
    pub label: Option<String>,
}

impl Panel {
    pub fn new(image: RgbaImage) -> Self {
        Self { image, label: None }
    }

    pub fn labelled(image: RgbaImage, label: impl Into<String>) -> Self {
        Self { image, label: Some(label.into()) }
    }
}

/// Places `panels` left to right, each vertically centered within the
/// tallest. When any panel carries a label, a band below the panels holds
/// each label centered under its panel.
///
/// Returns `None` for an empty panel list.
pub fn side_by_side(panels: &[Panel], face: &dyn GlyphFace) -> Option<RgbaImage> {
    let max_height = panels.iter().map(|panel| panel.image.height()).max()?;
    let total_width: u32 = panels.iter().map(|panel| panel.image.width()).sum();
    let band = if panels.iter().any(|panel| panel.label.is_some()) { LABEL_BAND } else { 0 };

    let mut sheet = Canvas::new(total_width, max_height + band, SHEET_BACKGROUND);
    let mut x_offset = 0i64;
    for panel in panels {
        let (width, height) = panel.image.dimensions();
        let y_offset = i64::from((max_height - height) / 2);
        sheet.composite(&panel.image, x_offset, y_offset);

        if let Some(label) = &panel.label {
            let mask = face.render(label, LABEL_SIZE);
            let left = x_offset + (i64::from(width) - i64::from(mask.width)) / 2;
            let top = i64::from(max_height) + (i64::from(band) - i64::from(mask.height)) / 2;
            sheet.draw_mask(&mask, left, top, LABEL_COLOR);
        }

        x_offset += i64::from(width);
    }

    Some(sheet.into_image())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::glyph::testing::BlockFace;

    fn solid(width: u32, height: u32, shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255]))
    }

    #[test]
    fn empty_sheet_is_none() {
        assert!(side_by_side(&[], &BlockFace).is_none());
    }

    #[test]
    fn panels_line_up_and_center_vertically() {
        let panels = [Panel::new(solid(10, 20, 0)), Panel::new(solid(6, 10, 100))];
        let sheet = side_by_side(&panels, &BlockFace).unwrap();

        assert_eq!(sheet.dimensions(), (16, 20));
        assert_eq!(sheet.get_pixel(0, 0).0, [0, 0, 0, 255]);
        // shorter panel is padded with white above and below
        assert_eq!(sheet.get_pixel(12, 2).0, [255, 255, 255, 255]);
        assert_eq!(sheet.get_pixel(12, 10).0, [100, 100, 100, 255]);
        assert_eq!(sheet.get_pixel(12, 17).0, [255, 255, 255, 255]);
    }

    #[test]
    fn labels_add_a_band_with_centered_text() {
        let panels = [Panel::labelled(solid(100, 30, 200), "ab"), Panel::new(solid(50, 30, 200))];
        let sheet = side_by_side(&panels, &BlockFace).unwrap();

        assert_eq!(sheet.dimensions(), (150, 30 + LABEL_BAND));
        // "ab" renders as a 32x16 block centered under the first panel
        let top = 30 + (LABEL_BAND - LABEL_SIZE) / 2;
        assert_eq!(sheet.get_pixel(34, top).0, [0, 0, 0, 255]);
        assert_eq!(sheet.get_pixel(65, top + LABEL_SIZE - 1).0, [0, 0, 0, 255]);
        assert_eq!(sheet.get_pixel(33, top).0, [255, 255, 255, 255]);
        assert_eq!(sheet.get_pixel(125, top + 4).0, [255, 255, 255, 255]);
    }
}
