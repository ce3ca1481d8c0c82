//! Channel mixer: RGB to one channel.
//!
//! # Forms
//!
//! - [`MixForm::Add`] - `clamp(wR*R + wG*G + wB*B)`, the same row applied
//!   to every output channel of a 3x3 color matrix
//! - [`MixForm::Rms`] - `clamp(sqrt(wR*R^2 + wG*G^2 + wB*B^2))`
//! - [`MixForm::Desat`] - achromatic component of a colorspace, see
//!   [`crate::colorspace`]; weights are ignored
//!
//! The `rms` form is a weighted sum of squares under a single square root.
//! It does not divide by the channel count, so white with weights summing
//! to 100% stays white.
//!
//! Weights are fractions here (percent / 100). They may be negative or sum
//! to anything; the result is clamped to `[0, 1]`, never rejected.
//!
//! # Example
//!
//! ```rust
//! use c2g_core::{ImageBuffer, Layout};
//! use c2g_ops::mixer::mix;
//! use c2g_ops::{ChannelWeights, DesatSpace, MixForm};
//!
//! let img = ImageBuffer::from_data(1, 1, Layout::Rgb, vec![0.2, 0.8, 0.5]).unwrap();
//! let red_only = ChannelWeights::new(100.0, 0.0, 0.0);
//! let gray = mix(&img, MixForm::Add, &red_only, DesatSpace::Hsl);
//! assert!((gray.as_slice()[0] - 0.2).abs() < 1e-6);
//! ```

use crate::colorspace::to_achromatic;
use crate::params::{ChannelWeights, DesatSpace, MixForm};
use c2g_core::{ImageBuffer, Plane};
use tracing::debug;

/// Weighted sum of the channels, clamped to `[0, 1]`.
pub fn mix_add(image: &ImageBuffer, [wr, wg, wb]: [f32; 3]) -> Plane {
    image.reduce_rgb(|[r, g, b]| (wr * r + wg * g + wb * b).clamp(0.0, 1.0))
}

/// Square root of the weighted sum of squares, clamped to `[0, 1]`.
///
/// A negative sum (possible with negative weights) maps to 0.
pub fn mix_rms(image: &ImageBuffer, [wr, wg, wb]: [f32; 3]) -> Plane {
    image.reduce_rgb(|[r, g, b]| {
        let sum = r * r * wr + g * g * wg + b * b * wb;
        sum.max(0.0).sqrt().min(1.0)
    })
}

/// Reduces `image` to one channel using `form`.
///
/// `space` is only consulted for [`MixForm::Desat`]; `weights` for the other
/// two forms. Alpha is never read.
pub fn mix(
    image: &ImageBuffer,
    form: MixForm,
    weights: &ChannelWeights,
    space: DesatSpace,
) -> Plane {
    match form {
        MixForm::Add => {
            debug!(form = %form, %weights, "mix");
            mix_add(image, weights.fractions())
        }
        MixForm::Rms => {
            debug!(form = %form, %weights, "mix");
            mix_rms(image, weights.fractions())
        }
        MixForm::Desat => {
            debug!(form = %form, %space, "mix");
            to_achromatic(image, space)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use c2g_core::Layout;

    fn solid(rgb: [f32; 3], w: u32, h: u32) -> ImageBuffer {
        let data = (0..w * h).flat_map(|_| rgb).collect();
        ImageBuffer::from_data(w, h, Layout::Rgb, data).unwrap()
    }

    fn colorful() -> ImageBuffer {
        let data = vec![
            0.2, 0.8, 0.5, //
            1.0, 0.0, 0.0, //
            0.9, 0.6, 0.1, //
            0.3, 0.1, 0.7, //
            0.0, 0.0, 0.0, //
            1.0, 1.0, 1.0,
        ];
        ImageBuffer::from_data(3, 2, Layout::Rgb, data).unwrap()
    }

    #[test]
    fn add_is_identity_on_gray() {
        for weights in [
            ChannelWeights::default(),
            ChannelWeights::new(100.0, 0.0, 0.0),
            ChannelWeights::new(33.3, 33.3, 33.4),
            ChannelWeights::new(150.0, -25.0, -25.0),
        ] {
            for v in [0.0, 0.25, 0.5, 0.731, 1.0] {
                let out = mix(&solid([v, v, v], 4, 3), MixForm::Add, &weights, DesatSpace::Hsl);
                for &o in out.as_slice() {
                    assert_abs_diff_eq!(o, v, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn red_only_example() {
        let weights = ChannelWeights::new(100.0, 0.0, 0.0);
        let out = mix(&solid([0.2, 0.8, 0.5], 2, 2), MixForm::Add, &weights, DesatSpace::Hsl);
        for &o in out.as_slice() {
            assert_abs_diff_eq!(o, 0.2, epsilon = 1e-6);
        }
    }

    #[test]
    fn add_clamps_instead_of_rejecting() {
        let hot = ChannelWeights::new(200.0, 200.0, 200.0);
        let out = mix(&colorful(), MixForm::Add, &hot, DesatSpace::Hsl);
        assert_eq!(out.as_slice()[5], 1.0);

        let cold = ChannelWeights::new(-100.0, -50.0, 20.0);
        let out = mix(&colorful(), MixForm::Add, &cold, DesatSpace::Hsl);
        assert_eq!(out.as_slice()[1], 0.0);
        assert!(out.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn zero_weights_give_black() {
        let zero = ChannelWeights::new(0.0, 0.0, 0.0);
        for form in [MixForm::Add, MixForm::Rms] {
            let out = mix(&colorful(), form, &zero, DesatSpace::Hsl);
            assert!(out.as_slice().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn rms_black_and_white() {
        let w = ChannelWeights::default();
        let black = mix(&solid([0.0; 3], 3, 3), MixForm::Rms, &w, DesatSpace::Hsl);
        assert!(black.as_slice().iter().all(|&v| v == 0.0));

        let white = mix(&solid([1.0; 3], 3, 3), MixForm::Rms, &w, DesatSpace::Hsl);
        for &v in white.as_slice() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn rms_has_no_channel_count_division() {
        let w = ChannelWeights::new(29.9, 58.7, 11.4);
        let [r, g, b] = [0.2f32, 0.8, 0.5];
        let expected = (r * r * 0.299 + g * g * 0.587 + b * b * 0.114).sqrt();
        let textbook = ((r * r * 0.299 + g * g * 0.587 + b * b * 0.114) / 3.0).sqrt();

        let out = mix(&solid([r, g, b], 1, 1), MixForm::Rms, &w, DesatSpace::Hsl);
        assert_abs_diff_eq!(out.as_slice()[0], expected, epsilon = 1e-5);
        assert!((out.as_slice()[0] - textbook).abs() > 0.1);
    }

    #[test]
    fn rms_negative_sum_is_black() {
        let w = ChannelWeights::new(-100.0, 0.0, 0.0);
        let out = mix(&solid([0.9, 0.1, 0.1], 1, 1), MixForm::Rms, &w, DesatSpace::Hsl);
        assert_eq!(out.as_slice()[0], 0.0);
    }

    #[test]
    fn desat_hsl_ignores_weights() {
        let image = colorful();
        let a = mix(&image, MixForm::Desat, &ChannelWeights::default(), DesatSpace::Hsl);
        let odd = ChannelWeights::new(-5.0, 300.0, 0.0);
        let b = mix(&image, MixForm::Desat, &odd, DesatSpace::Hsl);
        assert_eq!(a, b);

        for (i, px) in image.as_slice().chunks_exact(3).enumerate() {
            let max = px[0].max(px[1]).max(px[2]);
            let min = px[0].min(px[1]).min(px[2]);
            assert_abs_diff_eq!(a.as_slice()[i], (max + min) / 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn desat_spaces_differ() {
        let image = solid([0.9, 0.6, 0.1], 1, 1);
        let w = ChannelWeights::default();
        let hsl = mix(&image, MixForm::Desat, &w, DesatSpace::Hsl).as_slice()[0];
        let hsb = mix(&image, MixForm::Desat, &w, DesatSpace::Hsb).as_slice()[0];
        let hcl = mix(&image, MixForm::Desat, &w, DesatSpace::Hcl).as_slice()[0];
        assert_abs_diff_eq!(hsl, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(hsb, 0.9, epsilon = 1e-6);
        assert_abs_diff_eq!(hcl, 0.9 * 0.298839 + 0.6 * 0.586811 + 0.1 * 0.114350, epsilon = 1e-6);
    }

    #[test]
    fn solid_color_stays_solid() {
        let image = solid([0.4, 0.7, 0.2], 8, 5);
        let out = mix(&image, MixForm::Add, &ChannelWeights::default(), DesatSpace::Hsl);
        assert_eq!(out.dimensions(), (8, 5));
        let (lo, hi) = out.min_max().unwrap();
        assert_eq!(lo, hi);
    }

    #[test]
    fn alpha_is_not_mixed() {
        let image = ImageBuffer::from_data(1, 1, Layout::Rgba, vec![0.5, 0.5, 0.5, 0.1]).unwrap();
        let out = mix(&image, MixForm::Add, &ChannelWeights::default(), DesatSpace::Hsl);
        assert_abs_diff_eq!(out.as_slice()[0], 0.5, epsilon = 1e-6);
    }
}
