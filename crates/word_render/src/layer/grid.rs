use image::GrayImage;

/// Square sampling region anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
    pub step: u32,
}

impl GridCell {
    pub fn new(x: u32, y: u32, step: u32) -> Self {
        Self { x, y, step }
    }

    /// Center of the unclipped cell.
    pub fn center(&self) -> (f32, f32) {
        let half = self.step as f32 / 2.0;
        (self.x as f32 + half, self.y as f32 + half)
    }

    /// Pixel bounds `(x0, y0, x1, y1)` of the cell clipped to a `width`×`height`
    /// image, or `None` when nothing of the cell lies inside.
    pub fn clipped(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x1 = self.x.saturating_add(self.step).min(width);
        let y1 = self.y.saturating_add(self.step).min(height);
        if self.x >= x1 || self.y >= y1 {
            return None;
        }
        Some((self.x, self.y, x1, y1))
    }
}

/// Row-major walk over the cells tiling an image.
#[derive(Clone, Debug)]
pub struct GridCells {
    width: u32,
    height: u32,
    step: u32,
    x: u32,
    y: u32,
}

impl Iterator for GridCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.step == 0 || self.width == 0 || self.y >= self.height {
            return None;
        }

        let cell = GridCell::new(self.x, self.y, self.step);
        self.x = self.x.saturating_add(self.step);
        if self.x >= self.width {
            self.x = 0;
            self.y = self.y.saturating_add(self.step);
        }
        Some(cell)
    }
}

pub fn cells(width: u32, height: u32, step: u32) -> GridCells {
    GridCells { width, height, step, x: 0, y: 0 }
}

/// Mean intensity (0 = black, 255 = white) of the cell clipped to the image.
///
/// A cell lying fully outside the image reads as white background.
pub fn sample_luminance(gray: &GrayImage, cell: GridCell) -> f32 {
    let Some((x0, y0, x1, y1)) = cell.clipped(gray.width(), gray.height()) else {
        return 255.0;
    };

    let mut sum = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += u64::from(gray.get_pixel(x, y).0[0]);
        }
    }
    let count = u64::from(x1 - x0) * u64::from(y1 - y0);
    (sum as f64 / count as f64) as f32
}
