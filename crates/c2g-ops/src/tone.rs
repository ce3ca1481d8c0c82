//! Brightness and contrast for the grayscale plane.
//!
//! Both parameters are percentages in `[-100, 100]`. They map to a linear
//! transfer `out = clamp(slope * in + intercept, 0, 1)` with
//!
//! ```text
//! slope     = max(0, tan(pi * (contrast / 100 + 1) / 4))
//! intercept = brightness / 100 + ((100 - brightness) / 200) * (1 - slope)
//! ```
//!
//! Contrast 0 gives slope 1, so brightness alone is an additive shift of
//! `brightness / 100`. With brightness 0 the line pivots around mid gray.
//! Contrast -100 flattens everything to one level; +100 is a hard threshold.

use crate::params::{check_range, TONE_MAX, TONE_MIN};
use crate::OpsResult;
use c2g_core::Plane;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Validated brightness/contrast pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrightnessContrast {
    brightness: f32,
    contrast: f32,
}

impl BrightnessContrast {
    /// Creates a pair, rejecting values outside `[-100, 100]`.
    pub fn new(brightness: f32, contrast: f32) -> OpsResult<Self> {
        Ok(Self {
            brightness: check_range("brightness", brightness, TONE_MIN, TONE_MAX)?,
            contrast: check_range("contrast", contrast, TONE_MIN, TONE_MAX)?,
        })
    }

    /// Brightness in percent.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Contrast in percent.
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// True when both parameters are zero.
    pub fn is_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 0.0
    }

    /// Gain of the transfer line.
    ///
    /// Evaluated in `f64` so that contrast 100 lands just below the pole of
    /// `tan` and yields a steep positive slope.
    pub fn slope(&self) -> f64 {
        (PI * (self.contrast as f64 / 100.0 + 1.0) / 4.0).tan().max(0.0)
    }

    /// Offset of the transfer line.
    pub fn intercept(&self) -> f64 {
        let b = self.brightness as f64;
        b / 100.0 + ((100.0 - b) / 200.0) * (1.0 - self.slope())
    }

    /// Maps one sample.
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        transfer(value, self.slope(), self.intercept())
    }
}

#[inline]
fn transfer(value: f32, slope: f64, intercept: f64) -> f32 {
    (slope * value as f64 + intercept).clamp(0.0, 1.0) as f32
}

/// Applies brightness/contrast to `plane`, in place.
///
/// Zero brightness and contrast returns the plane untouched.
pub fn adjust(mut plane: Plane, tone: &BrightnessContrast) -> Plane {
    if tone.is_identity() {
        trace!("tone: identity, skipped");
        return plane;
    }

    let slope = tone.slope();
    let intercept = tone.intercept();
    debug!(
        brightness = tone.brightness,
        contrast = tone.contrast,
        slope,
        intercept,
        "tone"
    );
    plane.map_inplace(|v| transfer(v, slope, intercept));
    plane
}
