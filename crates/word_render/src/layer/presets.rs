//! Named style presets.
//!
//! Every preset is an ordered list of layers, drawn back to front: coarse
//! large glyphs first, fine small glyphs last.

use log::warn;

use super::config::{ConfigError, LayerConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct StylePreset {
    pub name: &'static str,
    pub layers: Vec<LayerConfig>,
}

pub const CLASSIC: &str = "classic";
pub const SUBTLE_SOFT: &str = "subtle_soft";
pub const GRAPHIC_BOLD: &str = "graphic_bold";
pub const DEEP_DENSE: &str = "deep_dense";
pub const MINIMAL_AIRY: &str = "minimal_airy";

/// Styles rendered by the variation workflow when none are requested.
pub const DEPTH_STYLES: [&str; 4] = [SUBTLE_SOFT, GRAPHIC_BOLD, DEEP_DENSE, MINIMAL_AIRY];

/// Styles shown next to the original on the evaluation sheet, in order.
pub const KEY_STYLES: [&str; 3] = [SUBTLE_SOFT, GRAPHIC_BOLD, DEEP_DENSE];

/// Styles the fly-in animation accumulates, in order.
pub const ANIMATION_STYLES: [&str; 2] = [SUBTLE_SOFT, GRAPHIC_BOLD];

const BLACK: [u8; 3] = [0, 0, 0];

fn layer(font_size: u32, step: u32, base_alpha: u8, boost: u8, density_scale: f32) -> LayerConfig {
    LayerConfig::new(step, font_size)
        .with_alpha(base_alpha, boost)
        .with_density_scale(density_scale)
        .with_color(BLACK)
}

pub fn names() -> [&'static str; 5] {
    [CLASSIC, SUBTLE_SOFT, GRAPHIC_BOLD, DEEP_DENSE, MINIMAL_AIRY]
}

pub fn all() -> Vec<StylePreset> {
    names().iter().filter_map(|name| lookup(name).ok()).collect()
}

pub fn lookup(name: &str) -> Result<StylePreset, ConfigError> {
    let (name, layers) = match name {
        CLASSIC => (CLASSIC, classic()),
        SUBTLE_SOFT => (SUBTLE_SOFT, subtle_soft()),
        GRAPHIC_BOLD => (GRAPHIC_BOLD, graphic_bold()),
        DEEP_DENSE => (DEEP_DENSE, deep_dense()),
        MINIMAL_AIRY => (MINIMAL_AIRY, minimal_airy()),
        _ => {
            return Err(ConfigError::UnknownStyle {
                name: name.to_owned(),
                available: names().join(", "),
            })
        },
    };

    Ok(StylePreset { name, layers })
}

/// Single-image default: mixes rotated mid-size glyphs into the stack.
fn classic() -> Vec<LayerConfig> {
    vec![
        layer(50, 50, 10, 180, 0.7),
        layer(30, 26, 20, 150, 1.2).with_rotation(true),
        layer(18, 14, 40, 160, 1.6).with_rotation(true),
        layer(12, 10, 30, 200, 1.3),
    ]
}

/// Softer, more photographic, less noisy.
fn subtle_soft() -> Vec<LayerConfig> {
    vec![
        layer(52, 56, 20, 130, 0.5),
        layer(30, 32, 30, 140, 0.9),
        layer(18, 18, 40, 150, 1.2),
    ]
}

/// Strong contrast, poster look.
fn graphic_bold() -> Vec<LayerConfig> {
    vec![
        layer(64, 60, 40, 200, 0.8),
        layer(32, 30, 60, 190, 1.6),
        layer(16, 14, 70, 190, 1.8),
    ]
}

/// Very dense in dark areas, almost engraved.
fn deep_dense() -> Vec<LayerConfig> {
    vec![
        layer(40, 40, 25, 210, 1.0),
        layer(26, 22, 40, 210, 1.8),
        layer(14, 10, 50, 210, 2.2),
    ]
}

/// Sparse and airy.
fn minimal_airy() -> Vec<LayerConfig> {
    vec![
        layer(60, 70, 15, 120, 0.4),
        layer(32, 46, 20, 130, 0.6),
        layer(18, 30, 25, 140, 0.8),
    ]
}

/// Resolves the requested styles, skipping unknown names with a warning.
///
/// Fails only when none of the requested names is known.
pub fn select<S: AsRef<str>>(requested: &[S]) -> Result<Vec<StylePreset>, ConfigError> {
    let mut selected = Vec::with_capacity(requested.len());
    let mut first_unknown = None;
    for name in requested {
        match lookup(name.as_ref()) {
            Ok(preset) => selected.push(preset),
            Err(err) => {
                warn!("skipping style: {err}");
                first_unknown.get_or_insert(err);
            },
        }
    }

    if selected.is_empty() {
        return Err(first_unknown.unwrap_or_else(|| ConfigError::UnknownStyle {
            name: String::new(),
            available: names().join(", "),
        }));
    }
    Ok(selected)
}

/// Concatenates the layers of `styles` in order.
pub fn concat_layers<S: AsRef<str>>(styles: &[S]) -> Result<Vec<LayerConfig>, ConfigError> {
    let mut layers = Vec::new();
    for style in styles {
        layers.extend(lookup(style.as_ref())?.layers);
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for preset in all() {
            assert!(!preset.layers.is_empty(), "{} has no layers", preset.name);
            for layer in &preset.layers {
                assert_eq!(layer.validate(), Ok(()), "{} has an invalid layer", preset.name);
            }
        }
        assert_eq!(all().len(), names().len());
    }

    #[test]
    fn unknown_style_lists_available_names() {
        let err = lookup("nope").unwrap_err();
        assert!(err.to_string().contains("subtle_soft"));
    }

    #[test]
    fn select_skips_unknown_names() {
        let selected = select(&["nope", DEEP_DENSE]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, DEEP_DENSE);
        assert!(matches!(select(&["nope"]), Err(ConfigError::UnknownStyle { .. })));
    }

    #[test]
    fn animation_layers_keep_style_order() {
        let layers = concat_layers(&ANIMATION_STYLES).unwrap();
        assert_eq!(layers.len(), 6);
        assert_eq!(layers[0].font_size, 52);
        assert_eq!(layers[3].font_size, 64);
    }
}
