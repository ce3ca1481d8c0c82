//! Transparency detection and recombination.
//!
//! Mixing reduces a pixel to one sample and drops alpha, so alpha is
//! pulled out first and put back after tone adjustment, untouched:
//!
//! ```text
//! extract_alpha(rgba) -> Some(A)   (only if mean(A) < 1)
//! mix + tone          -> G
//! recombine(G, A)     -> (G, G, G, A)
//! ```
//!
//! A fully opaque alpha channel is not carried: the output is plain gray.

use crate::OpsResult;
use c2g_core::{ImageBuffer, Layout, Plane};
use tracing::debug;

/// Mean alpha at or above this counts as fully opaque.
pub const OPAQUE: f64 = 1.0;

/// Returns the alpha plane if `image` has one that is not fully opaque.
pub fn extract_alpha(image: &ImageBuffer) -> Option<Plane> {
    let alpha = image.alpha()?;
    let mean = alpha.mean();
    if mean < OPAQUE {
        debug!(mean, "partial transparency, alpha kept");
        Some(alpha)
    } else {
        debug!("alpha fully opaque, dropped");
        None
    }
}

/// Builds the final image from the gray plane and the saved alpha.
///
/// With alpha the result is `Rgba` with the gray value in all three color
/// channels; without it the plane becomes a `Gray` image.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`](crate::OpsError::SizeMismatch) if the planes
/// disagree on dimensions.
pub fn recombine(gray: Plane, alpha: Option<Plane>) -> OpsResult<ImageBuffer> {
    match alpha {
        Some(alpha) => Ok(ImageBuffer::from_planes(
            Layout::Rgba,
            &[&gray, &gray, &gray, &alpha],
        )?),
        None => Ok(ImageBuffer::from(gray)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;

    #[test]
    fn no_alpha_channel() {
        let image = ImageBuffer::new(2, 2, Layout::Rgb);
        assert!(extract_alpha(&image).is_none());
    }

    #[test]
    fn opaque_alpha_is_dropped() {
        let data = vec![0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 1.0];
        let image = ImageBuffer::from_data(2, 1, Layout::Rgba, data).unwrap();
        assert!(extract_alpha(&image).is_none());
    }

    #[test]
    fn partial_alpha_is_kept_verbatim() {
        let data = vec![0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 0.25];
        let image = ImageBuffer::from_data(2, 1, Layout::Rgba, data).unwrap();
        let alpha = extract_alpha(&image).unwrap();
        assert_eq!(alpha.as_slice(), &[1.0, 0.25]);
    }

    #[test]
    fn gray_alpha_layout_counts() {
        let image = ImageBuffer::from_data(1, 1, Layout::GrayAlpha, vec![0.5, 0.0]).unwrap();
        assert!(extract_alpha(&image).is_some());
    }

    #[test]
    fn recombine_writes_gray_triple() {
        let gray = Plane::from_data(2, 1, vec![0.3, 0.7]).unwrap();
        let alpha = Plane::from_data(2, 1, vec![0.5, 0.0]).unwrap();
        let out = recombine(gray, Some(alpha)).unwrap();

        assert_eq!(out.layout(), Layout::Rgba);
        assert_eq!(out.as_slice(), &[0.3, 0.3, 0.3, 0.5, 0.7, 0.7, 0.7, 0.0]);
    }

    #[test]
    fn recombine_without_alpha_is_gray() {
        let gray = Plane::from_data(2, 1, vec![0.3, 0.7]).unwrap();
        let out = recombine(gray, None).unwrap();
        assert_eq!(out.layout(), Layout::Gray);
        assert_eq!(out.as_slice(), &[0.3, 0.7]);
    }

    #[test]
    fn recombine_rejects_size_mismatch() {
        let gray = Plane::new(2, 2);
        let alpha = Plane::new(3, 2);
        assert!(matches!(recombine(gray, Some(alpha)), Err(OpsError::SizeMismatch(_))));
    }
}
