use rand::Rng;

/// Configuration problems detected before any rendering work begins.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("vocabulary must contain at least one word")]
    EmptyVocabulary,
    #[error("grid step must be at least 1 pixel")]
    ZeroStep,
    #[error("font size must be at least 1 pixel")]
    InvalidFontSize,
    #[error("random jitter must be a finite fraction in [0, 1], got {0}")]
    InvalidJitter(f32),
    #[error("density scale must be finite, got {0}")]
    InvalidDensityScale(f32),
    #[error("frames per layer must be at least 1")]
    ZeroFramesPerLayer,
    #[error("maximum width must be at least 1 pixel")]
    ZeroMaxWidth,
    #[error("image has zero area")]
    ZeroAreaImage,
    #[error("unknown style {name:?} (available: {available})")]
    UnknownStyle { name: String, available: String },
}

/// Parameters of a single planning and compositing pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerConfig {
    /// Grid stride in pixels.
    pub step: u32,
    /// Base glyph size in pixels.
    pub font_size: u32,
    /// Opacity floor applied to every glyph of the layer.
    pub base_alpha: u8,
    /// Extra opacity added in proportion to darkness.
    pub alpha_boost_dark: u8,
    /// Multiplier on placement probability. Not clamped; values that push
    /// density above 1 mean certain placement.
    pub density_scale: f32,
    pub color: [u8; 3],
    /// Fraction of `step` used as the maximum position jitter.
    pub random_jitter: f32,
    pub allow_rotation: bool,
}

impl LayerConfig {
    pub fn new(step: u32, font_size: u32) -> Self {
        Self {
            step,
            font_size,
            base_alpha: 20,
            alpha_boost_dark: 150,
            density_scale: 1.0,
            color: [0, 0, 0],
            random_jitter: 0.4,
            allow_rotation: false,
        }
    }

    pub fn with_alpha(mut self, base_alpha: u8, alpha_boost_dark: u8) -> Self {
        self.base_alpha = base_alpha;
        self.alpha_boost_dark = alpha_boost_dark;
        self
    }

    pub fn with_density_scale(mut self, density_scale: f32) -> Self {
        self.density_scale = density_scale;
        self
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_jitter(mut self, random_jitter: f32) -> Self {
        self.random_jitter = random_jitter;
        self
    }

    pub fn with_rotation(mut self, allow_rotation: bool) -> Self {
        self.allow_rotation = allow_rotation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.font_size == 0 {
            return Err(ConfigError::InvalidFontSize);
        }
        if !self.random_jitter.is_finite() || !(0.0..=1.0).contains(&self.random_jitter) {
            return Err(ConfigError::InvalidJitter(self.random_jitter));
        }
        if !self.density_scale.is_finite() {
            return Err(ConfigError::InvalidDensityScale(self.density_scale));
        }
        Ok(())
    }
}

/// Non-empty set of words a planner draws from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub const DEFAULT_CHARS: &'static str =
        "天地人和山水风云日月星辰光影黑白虚实梦境文字重叠层次深浅变化";

    pub fn new<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> =
            words.into_iter().map(Into::into).filter(|word| !word.is_empty()).collect();
        if words.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(Self { words })
    }

    /// Splits `chars` into single-character words, skipping whitespace.
    pub fn from_chars(chars: &str) -> Result<Self, ConfigError> {
        Self::new(chars.chars().filter(|ch| !ch.is_whitespace()).map(String::from))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            words: Self::DEFAULT_CHARS.chars().map(String::from).collect(),
        }
    }
}
