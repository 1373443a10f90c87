use image::{imageops, Rgba, RgbaImage};

/// Rotates `src` counter-clockwise by `degrees` about its center, growing the
/// output so no corner is clipped. Nearest-neighbour sampling; uncovered
/// pixels are transparent.
pub fn rotate_expand(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (width as f32, height as f32);
    // tolerance keeps right angles from growing a pixel through rounding noise
    let out_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0) as u32;

    let (src_cx, src_cy) = (w / 2.0, h / 2.0);
    let (out_cx, out_cy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);

    RgbaImage::from_fn(out_w, out_h, |x, y| {
        let dx = x as f32 + 0.5 - out_cx;
        let dy = y as f32 + 0.5 - out_cy;
        // inverse of a counter-clockwise turn on a y-down raster
        let sx = cos * dx - sin * dy + src_cx;
        let sy = sin * dx + cos * dy + src_cy;
        if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
            return Rgba([0, 0, 0, 0]);
        }
        *src.get_pixel(sx as u32, sy as u32)
    })
}

/// Smallest rectangle `(x, y, width, height)` holding every non-transparent
/// pixel.
pub fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            None => (x, y, x, y),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops `image` to its opaque bounds, or `None` when fully transparent.
pub fn crop_to_opaque(image: &RgbaImage) -> Option<RgbaImage> {
    let (x, y, width, height) = opaque_bounds(image)?;
    Some(imageops::crop_imm(image, x, y, width, height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rotation_is_identity() {
        let src = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        assert_eq!(rotate_expand(&src, 0.0), src);
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let src = RgbaImage::from_pixel(8, 2, Rgba([0, 0, 0, 255]));
        let rotated = rotate_expand(&src, 90.0);
        assert_eq!(rotated.dimensions(), (2, 8));
    }

    #[test]
    fn rotation_expands_canvas() {
        let src = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let rotated = rotate_expand(&src, 25.0);
        assert!(rotated.width() > 10 && rotated.height() > 10);
        // corners stay transparent, center stays filled
        assert_eq!(rotated.get_pixel(0, 0).0[3], 0);
        assert_eq!(rotated.get_pixel(rotated.width() / 2, rotated.height() / 2).0[3], 255);
    }

    #[test]
    fn crop_finds_opaque_region() {
        let mut image = RgbaImage::new(10, 10);
        image.put_pixel(3, 4, Rgba([1, 1, 1, 10]));
        image.put_pixel(6, 5, Rgba([1, 1, 1, 10]));
        assert_eq!(opaque_bounds(&image), Some((3, 4, 4, 2)));
        assert_eq!(crop_to_opaque(&image).unwrap().dimensions(), (4, 2));
        assert!(crop_to_opaque(&RgbaImage::new(3, 3)).is_none());
    }
}
