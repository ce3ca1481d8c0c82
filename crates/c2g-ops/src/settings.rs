//! Validated conversion settings.

use crate::params::{ChannelWeights, DesatSpace, MixForm};
use crate::tone::BrightnessContrast;
use std::fmt;

/// Everything that controls one conversion, validated up front.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    /// Channel weights for `add` and `rms`.
    pub weights: ChannelWeights,
    /// Mixing form.
    pub form: MixForm,
    /// Colorspace for `desat`.
    pub space: DesatSpace,
    /// Brightness/contrast applied after mixing.
    pub tone: BrightnessContrast,
}

impl Settings {
    /// Sets the channel weights.
    pub fn with_weights(mut self, weights: ChannelWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the mixing form.
    pub fn with_form(mut self, form: MixForm) -> Self {
        self.form = form;
        self
    }

    /// Sets the desaturation colorspace.
    pub fn with_space(mut self, space: DesatSpace) -> Self {
        self.space = space;
        self
    }

    /// Sets brightness/contrast.
    pub fn with_tone(mut self, tone: BrightnessContrast) -> Self {
        self.tone = tone;
        self
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            MixForm::Desat => write!(f, "form={} colorspace={}", self.form, self.space)?,
            _ => write!(f, "form={} {}", self.form, self.weights)?,
        }
        write!(
            f,
            " brightness={} contrast={}",
            self.tone.brightness(),
            self.tone.contrast()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.weights, ChannelWeights::new(29.9, 58.7, 11.4));
        assert_eq!(s.form, MixForm::Add);
        assert_eq!(s.space, DesatSpace::Hsl);
        assert!(s.tone.is_identity());
    }

    #[test]
    fn display_mentions_relevant_knobs() {
        let s = Settings::default().with_form(MixForm::Desat).with_space(DesatSpace::Hcl);
        let text = s.to_string();
        assert!(text.contains("colorspace=hcl"));
        assert!(!text.contains("r="));
    }
}
