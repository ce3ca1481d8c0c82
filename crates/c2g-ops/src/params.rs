//! Conversion parameters and their text parsers.
//!
//! Values arrive as command-line text. Each parser maps bad input onto the
//! matching [`OpsError`] kind so that every parameter problem is reported
//! before an image is touched.
//!
//! # Example
//!
//! ```rust
//! use c2g_ops::params::{ChannelWeights, DesatSpace, MixForm};
//!
//! let form: MixForm = "RMS".parse().unwrap();
//! assert_eq!(form, MixForm::Rms);
//! assert_eq!("d".parse::<MixForm>().unwrap(), MixForm::Desat);
//! assert!("xyz".parse::<DesatSpace>().is_err());
//!
//! let w = ChannelWeights::default();
//! assert!((w.sum() - 100.0).abs() < 1e-4);
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted brightness or contrast.
pub const TONE_MIN: f32 = -100.0;

/// Highest accepted brightness or contrast.
pub const TONE_MAX: f32 = 100.0;

/// Parses a finite float, reporting [`OpsError::Type`] under `name`.
pub fn parse_number(name: &'static str, text: &str) -> OpsResult<f32> {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(OpsError::Type {
            name,
            value: text.to_string(),
        }),
    }
}

/// Checks `value` against an inclusive range, reporting [`OpsError::Range`].
pub fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> OpsResult<f32> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OpsError::Range {
            name,
            value,
            min,
            max,
        })
    }
}

// ============================================================================
// Channel weights
// ============================================================================

/// Per-channel mixing weights in percent.
///
/// There is no sum-to-100 rule and weights may be negative; the mixer clamps
/// its output instead of rejecting unusual weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    /// Red weight, percent.
    pub red: f32,
    /// Green weight, percent.
    pub green: f32,
    /// Blue weight, percent.
    pub blue: f32,
}

impl ChannelWeights {
    /// Creates weights from percentages.
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Weights as fractions (`percent / 100`).
    pub fn fractions(&self) -> [f32; 3] {
        [self.red / 100.0, self.green / 100.0, self.blue / 100.0]
    }

    /// Sum of the three percentages.
    pub fn sum(&self) -> f32 {
        self.red + self.green + self.blue
    }
}

impl Default for ChannelWeights {
    /// Rec. 601 luma weights: 29.9 / 58.7 / 11.4.
    fn default() -> Self {
        Self::new(29.9, 58.7, 11.4)
    }
}

impl fmt::Display for ChannelWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r={} g={} b={}", self.red, self.green, self.blue)
    }
}

// ============================================================================
// Mixing form
// ============================================================================

/// How RGB is combined into one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixForm {
    /// Weighted sum of the channels.
    #[default]
    Add,
    /// Square root of the weighted sum of squares.
    Rms,
    /// Achromatic component of a cylindrical colorspace; weights ignored.
    Desat,
}

impl MixForm {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            MixForm::Add => "add",
            MixForm::Rms => "rms",
            MixForm::Desat => "desat",
        }
    }
}

impl FromStr for MixForm {
    type Err = OpsError;

    /// Case-insensitive; the first letter alone is accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "a" => Ok(MixForm::Add),
            "rms" | "r" => Ok(MixForm::Rms),
            "desat" | "d" => Ok(MixForm::Desat),
            _ => Err(OpsError::Enum {
                name: "form",
                value: s.to_string(),
                expected: "add, rms, desat",
            }),
        }
    }
}

impl fmt::Display for MixForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Desaturation colorspace
// ============================================================================

/// Colorspace whose achromatic component the `desat` form keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesatSpace {
    /// Lightness, `(max + min) / 2`.
    #[default]
    Hsl,
    /// Brightness (value), `max`.
    Hsb,
    /// Luma of the HCL model.
    Hcl,
}

impl DesatSpace {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            DesatSpace::Hsl => "hsl",
            DesatSpace::Hsb => "hsb",
            DesatSpace::Hcl => "hcl",
        }
    }
}

impl FromStr for DesatSpace {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hsl" => Ok(DesatSpace::Hsl),
            "hsb" => Ok(DesatSpace::Hsb),
            "hcl" => Ok(DesatSpace::Hcl),
            _ => Err(OpsError::Enum {
                name: "colorspace",
                value: s.to_string(),
                expected: "hsl, hsb, hcl",
            }),
        }
    }
}

impl fmt::Display for DesatSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
