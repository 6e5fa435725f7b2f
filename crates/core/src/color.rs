//! RGB color values and the companding transforms applied to blended colors.
//!
//! Blending happens in a linear space; [`GammaPolicy`] moves the result into
//! display space. Uses `f64` throughout for precision.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChromaError;

/// RGB color with components nominally in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable config files.
/// The hex round-trip has 8-bit quantization (1/255 precision loss).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorRgb {
    pub const BLACK: ColorRgb = ColorRgb::new(0.0, 0.0, 0.0);
    pub const WHITE: ColorRgb = ColorRgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `ChromaError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<ColorRgb, ChromaError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ChromaError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| ChromaError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(ColorRgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are clamped to [0, 1] and quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Clamped 8-bit quantization of each channel.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Multiplies every channel by `k`.
    pub fn scale(self, k: f64) -> ColorRgb {
        ColorRgb::new(self.r * k, self.g * k, self.b * k)
    }

    /// Applies `f` to every channel.
    pub fn map(self, f: impl Fn(f64) -> f64) -> ColorRgb {
        ColorRgb::new(f(self.r), f(self.g), f(self.b))
    }

    /// Clips every channel to [0, 1].
    pub fn clamp_unit(self) -> ColorRgb {
        self.map(|c| c.clamp(0.0, 1.0))
    }

    /// Blends toward white: `self * strength + white * (1 - strength)`.
    pub fn whiten(self, strength: f64) -> ColorRgb {
        self.map(|c| c * strength + (1.0 - strength))
    }

    pub fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::ops::Add for ColorRgb {
    type Output = ColorRgb;

    fn add(self, other: ColorRgb) -> ColorRgb {
        ColorRgb::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl std::ops::AddAssign for ColorRgb {
    fn add_assign(&mut self, other: ColorRgb) {
        *self = *self + other;
    }
}

impl Serialize for ColorRgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorRgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ColorRgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Transfer function that moves a linear blend into display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GammaPolicy {
    /// The exact piecewise sRGB encoding.
    #[default]
    Srgb,
    /// A plain power law `c^exponent`, e.g. `1 / 2.2`.
    Power { exponent: f64 },
}

impl GammaPolicy {
    /// Power law with the conventional 1/2.2 display exponent.
    pub fn power_2_2() -> Self {
        GammaPolicy::Power {
            exponent: 1.0 / 2.2,
        }
    }

    /// Checks that a power-law exponent is finite and positive.
    pub fn validate(&self) -> Result<(), ChromaError> {
        match *self {
            GammaPolicy::Srgb => Ok(()),
            GammaPolicy::Power { exponent } if exponent.is_finite() && exponent > 0.0 => Ok(()),
            GammaPolicy::Power { exponent } => Err(ChromaError::InvalidConfig(format!(
                "gamma exponent must be finite and positive, got {exponent}"
            ))),
        }
    }

    /// Encodes a single linear component.
    pub fn encode_component(&self, c: f64) -> f64 {
        match *self {
            GammaPolicy::Srgb => linear_component_to_srgb(c),
            GammaPolicy::Power { exponent } => c.max(0.0).powf(exponent),
        }
    }

    /// Encodes every channel of a linear color.
    pub fn encode(&self, c: ColorRgb) -> ColorRgb {
        c.map(|v| self.encode_component(v))
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
