//! Pixel buffers for the grayscale pipeline.
//!
//! Two containers cover every stage:
//! - [`Plane`] - a single channel (grayscale result, extracted alpha)
//! - [`ImageBuffer`] - interleaved multi-channel samples described by a [`Layout`]
//!
//! All samples are `f32` normalized to `[0.0, 1.0]`. Decoders normalize on
//! the way in and encoders quantize on the way out; nothing in between
//! knows about bit depth.
//!
//! # Memory Layout
//!
//! Row-major, top-to-bottom, channels interleaved:
//!
//! ```text
//! Rgba: [R G B A R G B A ...]  <- Row 0
//!       [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! # Parallelism
//!
//! Per-pixel work goes through [`ImageBuffer::reduce_rgb`] and
//! [`Plane::map_inplace`], which split the buffer into rows and process
//! them with rayon. Each output sample depends only on its own input pixel,
//! so the result is identical to a serial pass.

use crate::{Error, Result};
use rayon::prelude::*;

/// Channel arrangement of an [`ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Single luminance channel.
    Gray,
    /// Luminance plus alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Layout {
    /// Number of interleaved channels.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns true if the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }

    /// Index of the alpha channel within a pixel, if any.
    #[inline]
    pub const fn alpha_index(self) -> Option<usize> {
        match self {
            Self::GrayAlpha => Some(1),
            Self::Rgba => Some(3),
            Self::Gray | Self::Rgb => None,
        }
    }

    /// Same layout with the alpha channel removed.
    pub const fn without_alpha(self) -> Self {
        match self {
            Self::Gray | Self::GrayAlpha => Self::Gray,
            Self::Rgb | Self::Rgba => Self::Rgb,
        }
    }

    /// Reads the color part of one pixel as RGB. Gray layouts replicate
    /// the luminance sample into all three channels.
    #[inline]
    pub fn rgb(self, px: &[f32]) -> [f32; 3] {
        match self {
            Self::Gray | Self::GrayAlpha => [px[0], px[0], px[0]],
            Self::Rgb | Self::Rgba => [px[0], px[1], px[2]],
        }
    }
}

// ============================================================================
// Plane
// ============================================================================

/// A single-channel image.
///
/// Used for the mixed grayscale result and for an alpha channel carried
/// around the mixing stage.
///
/// # Example
///
/// ```rust
/// use c2g_core::Plane;
///
/// let mut plane = Plane::filled(2, 2, 0.25);
/// plane.map_inplace(|v| v * 2.0);
/// assert_eq!(plane.get(1, 1), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Plane {
    /// Creates a plane filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates a plane with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self { width, height, data })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-area plane.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(x, y)`, or `None` outside the plane.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Writes the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the plane.
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = value;
        Ok(())
    }

    /// Raw samples, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw samples, row-major.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the plane and returns its samples.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Arithmetic mean of all samples, accumulated in `f64`.
    ///
    /// An empty plane has mean `0.0`.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.par_iter().map(|&v| v as f64).sum();
        sum / self.data.len() as f64
    }

    /// Smallest and largest sample, or `None` for an empty plane.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().fold((f32::MAX, f32::MIN), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }

    /// Applies `f` to every sample in parallel.
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32 + Sync + Send,
    {
        self.data.par_iter_mut().for_each(|v| *v = f(*v));
    }

    /// Checks that `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn ensure_same_size(&self, other: &Plane) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }
}

// ============================================================================
// ImageBuffer
// ============================================================================

/// Interleaved multi-channel image.
///
/// # Example
///
/// ```rust
/// use c2g_core::{ImageBuffer, Layout};
///
/// let img = ImageBuffer::from_data(1, 1, Layout::Rgba, vec![0.2, 0.8, 0.5, 0.5]).unwrap();
/// let gray = img.reduce_rgb(|[r, _, _]| r);
/// assert_eq!(gray.as_slice(), &[0.2]);
/// assert_eq!(img.alpha().unwrap().as_slice(), &[0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    layout: Layout,
    data: Vec<f32>,
}

impl ImageBuffer {
    /// Creates a zero-filled buffer.
    pub fn new(width: u32, height: u32, layout: Layout) -> Self {
        Self {
            width,
            height,
            layout,
            data: vec![0.0; width as usize * height as usize * layout.channels()],
        }
    }

    /// Wraps existing interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the sample count does not
    /// equal `width * height * channels`.
    pub fn from_data(width: u32, height: u32, layout: Layout, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "{:?} expects {} samples, got {}",
                    layout,
                    expected,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Interleaves separate planes into one buffer.
    ///
    /// Planes are taken in channel order (e.g. R, G, B, A for `Rgba`).
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] if the plane count differs from the layout
    /// - [`Error::DimensionMismatch`] if the planes disagree on size
    pub fn from_planes(layout: Layout, planes: &[&Plane]) -> Result<Self> {
        let channels = layout.channels();
        if planes.len() != channels {
            return Err(Error::ChannelMismatch(format!(
                "{:?} needs {} planes, got {}",
                layout,
                channels,
                planes.len()
            )));
        }
        let first = planes[0];
        for plane in &planes[1..] {
            first.ensure_same_size(plane)?;
        }

        let (width, height) = first.dimensions();
        let mut data = vec![0.0f32; first.len() * channels];
        data.par_chunks_mut(channels)
            .enumerate()
            .for_each(|(i, px)| {
                for (c, plane) in planes.iter().enumerate() {
                    px[c] = plane.data[i];
                }
            });

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel arrangement.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * n;
        Some(&self.data[start..start + n])
    }

    /// Copies one channel out as a [`Plane`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `index` is not a channel of this layout.
    pub fn channel(&self, index: usize) -> Result<Plane> {
        let n = self.channels();
        if index >= n {
            return Err(Error::ChannelMismatch(format!(
                "channel {} requested from {:?} image",
                index, self.layout
            )));
        }
        let data = self.data.par_chunks(n).map(|px| px[index]).collect();
        Ok(Plane {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Copies the alpha channel out, if the layout has one.
    pub fn alpha(&self) -> Option<Plane> {
        let index = self.layout.alpha_index()?;
        self.channel(index).ok()
    }

    /// Reduces every pixel's RGB triple to one sample.
    ///
    /// Rows are processed in parallel. Gray layouts present their
    /// luminance as `[v, v, v]`; alpha is never passed to `f`.
    pub fn reduce_rgb<F>(&self, f: F) -> Plane
    where
        F: Fn([f32; 3]) -> f32 + Sync + Send,
    {
        let layout = self.layout;
        let n = layout.channels();
        let w = self.width as usize;
        let mut out = vec![0.0f32; self.pixel_count()];

        if w > 0 {
            out.par_chunks_mut(w)
                .zip(self.data.par_chunks(w * n))
                .for_each(|(dst, src)| {
                    for (d, px) in dst.iter_mut().zip(src.chunks_exact(n)) {
                        *d = f(layout.rgb(px));
                    }
                });
        }

        Plane {
            width: self.width,
            height: self.height,
            data: out,
        }
    }

    /// Re-lays the samples out in another arrangement.
    ///
    /// Gray expands to RGB by replication, RGB collapses to gray by taking
    /// the first channel, a missing alpha is filled with `1.0` and an
    /// unwanted one is dropped. Encoders use this to reach a layout their
    /// container supports.
    pub fn to_layout(&self, target: Layout) -> ImageBuffer {
        if target == self.layout {
            return self.clone();
        }
        let src_layout = self.layout;
        let (sn, dn) = (src_layout.channels(), target.channels());
        let mut data = vec![0.0f32; self.pixel_count() * dn];

        data.par_chunks_mut(dn)
            .zip(self.data.par_chunks(sn))
            .for_each(|(dst, src)| {
                let [r, g, b] = src_layout.rgb(src);
                let a = src_layout.alpha_index().map_or(1.0, |i| src[i]);
                match target {
                    Layout::Gray => dst[0] = r,
                    Layout::GrayAlpha => {
                        dst[0] = r;
                        dst[1] = a;
                    }
                    Layout::Rgb => dst.copy_from_slice(&[r, g, b]),
                    Layout::Rgba => dst.copy_from_slice(&[r, g, b, a]),
                }
            });

        ImageBuffer {
            width: self.width,
            height: self.height,
            layout: target,
            data,
        }
    }
}

impl From<Plane> for ImageBuffer {
    /// A plane is a `Gray` image.
    fn from(plane: Plane) -> Self {
        Self {
            width: plane.width,
            height: plane.height,
            layout: Layout::Gray,
            data: plane.data,
        }
    }
}
