use image::imageops;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

pub fn grayscale(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

pub fn to_rgba(image: &RgbImage) -> RgbaImage {
    DynamicImage::ImageRgb8(image.clone()).into_rgba8()
}

/// Gaussian blur with `radius` used as the standard deviation. Non-positive
/// radii return an unchanged copy.
pub fn blur(image: &RgbaImage, radius: f32) -> RgbaImage {
    if radius.is_nan() || radius <= 0.0 {
        return image.clone();
    }
    imageops::blur(image, radius)
}

/// Per-channel linear blend `from * (1 - amount) + to * amount`.
///
/// Both images must share dimensions.
pub fn cross_fade(from: &RgbaImage, to: &RgbaImage, amount: f32) -> RgbaImage {
    debug_assert_eq!(from.dimensions(), to.dimensions());
    let amount = amount.clamp(0.0, 1.0);

    let mut out = from.clone();
    for (dst, src) in out.pixels_mut().zip(to.pixels()) {
        for channel in 0..4 {
            let value =
                f32::from(dst.0[channel]) * (1.0 - amount) + f32::from(src.0[channel]) * amount;
            dst.0[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
