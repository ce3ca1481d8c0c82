//! Cylindrical colorspaces used by the `desat` form.
//!
//! Each model has a forward and inverse conversion with hue normalized to
//! `[0, 1)`. Desaturating means zeroing the saturation (or chroma) and
//! converting back, which always lands on a gray whose level is the model's
//! achromatic component:
//!
//! | Space | Achromatic component |
//! |-------|----------------------|
//! | HSL | lightness `(max + min) / 2` |
//! | HSB | brightness `max` |
//! | HCL | luma `0.298839 R + 0.586811 G + 0.114350 B` |
//!
//! [`to_achromatic`] reads that component directly instead of running the
//! round trip per pixel.
//!
//! # Example
//!
//! ```rust
//! use c2g_ops::colorspace::{achromatic, rgb_to_hsl};
//! use c2g_ops::DesatSpace;
//!
//! let [_, s, l] = rgb_to_hsl([1.0, 0.0, 0.0]);
//! assert_eq!((s, l), (1.0, 0.5));
//! assert_eq!(achromatic([1.0, 0.0, 0.0], DesatSpace::Hsb), 1.0);
//! ```

use crate::DesatSpace;
use c2g_core::{ImageBuffer, Plane};
use tracing::trace;

/// Luma coefficients of the HCL model.
pub const HCL_LUMA: [f32; 3] = [0.298839, 0.586811, 0.114350];

#[inline]
fn max3(rgb: [f32; 3]) -> f32 {
    rgb[0].max(rgb[1]).max(rgb[2])
}

#[inline]
fn min3(rgb: [f32; 3]) -> f32 {
    rgb[0].min(rgb[1]).min(rgb[2])
}

#[inline]
fn hcl_luma([r, g, b]: [f32; 3]) -> f32 {
    HCL_LUMA[0] * r + HCL_LUMA[1] * g + HCL_LUMA[2] * b
}

/// Hue in `[0, 1)` shared by all three models. Gray has hue 0.
fn hue([r, g, b]: [f32; 3], max: f32, chroma: f32) -> f32 {
    if chroma <= 0.0 {
        return 0.0;
    }
    let h = if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    (h / 6.0).rem_euclid(1.0)
}

/// Zero-based RGB for a hue and chroma (before the model's offset is added).
fn hue_chroma_to_rgb(hue: f32, chroma: f32) -> [f32; 3] {
    let h6 = (hue * 6.0).rem_euclid(6.0);
    let x = chroma * (1.0 - ((h6 % 2.0) - 1.0).abs());
    match h6 as u32 {
        0 => [chroma, x, 0.0],
        1 => [x, chroma, 0.0],
        2 => [0.0, chroma, x],
        3 => [0.0, x, chroma],
        4 => [x, 0.0, chroma],
        _ => [chroma, 0.0, x],
    }
}

// ============================================================================
// HSL
// ============================================================================

/// RGB to `[hue, saturation, lightness]`.
pub fn rgb_to_hsl(rgb: [f32; 3]) -> [f32; 3] {
    let (max, min) = (max3(rgb), min3(rgb));
    let chroma = max - min;
    let l = (max + min) * 0.5;
    let denom = 1.0 - (2.0 * l - 1.0).abs();
    let s = if chroma <= 0.0 || denom <= 0.0 {
        0.0
    } else {
        chroma / denom
    };
    [hue(rgb, max, chroma), s, l]
}

/// `[hue, saturation, lightness]` to RGB.
pub fn hsl_to_rgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - chroma * 0.5;
    let [r, g, b] = hue_chroma_to_rgb(h, chroma);
    [r + m, g + m, b + m]
}

// ============================================================================
// HSB
// ============================================================================

/// RGB to `[hue, saturation, brightness]`.
pub fn rgb_to_hsb(rgb: [f32; 3]) -> [f32; 3] {
    let (max, min) = (max3(rgb), min3(rgb));
    let chroma = max - min;
    let s = if max > 0.0 { chroma / max } else { 0.0 };
    [hue(rgb, max, chroma), s, max]
}

/// `[hue, saturation, brightness]` to RGB.
pub fn hsb_to_rgb([h, s, v]: [f32; 3]) -> [f32; 3] {
    let chroma = v * s;
    let m = v - chroma;
    let [r, g, b] = hue_chroma_to_rgb(h, chroma);
    [r + m, g + m, b + m]
}

// ============================================================================
// HCL
// ============================================================================

/// RGB to `[hue, chroma, luma]`.
pub fn rgb_to_hcl(rgb: [f32; 3]) -> [f32; 3] {
    let max = max3(rgb);
    let chroma = max - min3(rgb);
    [hue(rgb, max, chroma), chroma, hcl_luma(rgb)]
}

/// `[hue, chroma, luma]` to RGB.
///
/// Out-of-gamut combinations are returned unclamped.
pub fn hcl_to_rgb([h, c, l]: [f32; 3]) -> [f32; 3] {
    let base = hue_chroma_to_rgb(h, c);
    let m = l - hcl_luma(base);
    [base[0] + m, base[1] + m, base[2] + m]
}

// ============================================================================
// Desaturation
// ============================================================================

/// Achromatic component of one pixel in `space`.
#[inline]
pub fn achromatic(rgb: [f32; 3], space: DesatSpace) -> f32 {
    match space {
        DesatSpace::Hsl => (max3(rgb) + min3(rgb)) * 0.5,
        DesatSpace::Hsb => max3(rgb),
        DesatSpace::Hcl => hcl_luma(rgb),
    }
}

/// Sets saturation (or chroma) to zero in `space` and converts back.
pub fn desaturate(rgb: [f32; 3], space: DesatSpace) -> [f32; 3] {
    match space {
        DesatSpace::Hsl => {
            let [h, _, l] = rgb_to_hsl(rgb);
            hsl_to_rgb([h, 0.0, l])
        }
        DesatSpace::Hsb => {
            let [h, _, v] = rgb_to_hsb(rgb);
            hsb_to_rgb([h, 0.0, v])
        }
        DesatSpace::Hcl => {
            let [h, _, l] = rgb_to_hcl(rgb);
            hcl_to_rgb([h, 0.0, l])
        }
    }
}

/// Reduces an image to the achromatic component of `space`, clamped to `[0, 1]`.
pub fn to_achromatic(image: &ImageBuffer, space: DesatSpace) -> Plane {
    trace!(%space, width = image.width(), height = image.height(), "to_achromatic");
    image.reduce_rgb(|rgb| achromatic(rgb, space).clamp(0.0, 1.0))
}
