//! # c2g-io
//!
//! Image I/O for color2gray.
//!
//! Decodes PNG, JPEG and TIFF into a float [`ImageBuffer`] tagged with the
//! color model the file declared, and encodes buffers back out:
//!
//! - **PNG** - Lossless, 8/16-bit, alpha
//! - **JPEG** - Lossy, 8-bit, no alpha
//! - **TIFF** - Uncompressed 8/16-bit and 32-bit float
//!
//! # Architecture
//!
//! - [`ImageReader`] / [`ImageWriter`] - implemented by each format codec
//! - [`read`] / [`write`] - dispatch on [`Format`]
//!
//! Every write goes through a temporary file in the destination directory
//! that is renamed into place only after encoding succeeded.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use c2g_io::{read, write, WriteOptions};
//!
//! let image = read("photo.png")?;
//! println!("{} ({})", image.metadata.format, image.metadata.color_model);
//! write("copy.tif", &image.buffer, &WriteOptions::default())?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG | Yes | Yes | 8, 16 |
//! | JPEG | Yes | Yes | 8 |
//! | TIFF | Yes | Yes | 8, 16, 32f |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `tiff` - TIFF support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod atomic;
mod detect;
mod error;
mod sample;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "tiff")]
pub mod tiff;

pub use atomic::write_atomic;
pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use c2g_core::{ColorModel, ImageBuffer, Plane};
use std::path::Path;
use tracing::{debug, trace, warn};

// ============================================================================
// Containers
// ============================================================================

/// What the decoder learned about the file besides its pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Container format the bytes were decoded as.
    pub format: Format,
    /// Color model declared by the file.
    pub color_model: ColorModel,
    /// Bits per stored sample (8, 16 or 32).
    pub bit_depth: u8,
}

/// A decoded image: float samples in `[0, 1]` plus file metadata.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Interleaved pixel samples.
    pub buffer: ImageBuffer,
    /// Format, color model and depth of the source file.
    pub metadata: Metadata,
}

impl ImageData {
    /// Pairs a decoded buffer with its metadata.
    pub fn new(buffer: ImageBuffer, metadata: Metadata) -> Self {
        Self { buffer, metadata }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Whether the stored layout carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.buffer.layout().has_alpha()
    }

    /// Mean alpha over all pixels, or `None` without an alpha channel.
    pub fn alpha_mean(&self) -> Option<f64> {
        self.buffer.alpha().as_ref().map(Plane::mean)
    }
}

/// Encoder settings shared by every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Requested sample depth. 16 writes 16-bit where the format allows
    /// it; 32 writes float TIFF and falls back to 16-bit elsewhere.
    pub bit_depth: u8,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            jpeg_quality: 92,
        }
    }
}

impl WriteOptions {
    /// Sets the output sample depth.
    pub fn with_bit_depth(mut self, bit_depth: u8) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Sets the JPEG quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

// ============================================================================
// Dispatch
// ============================================================================

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Decodes bytes already in memory; `hint` supplies the extension fallback.
pub fn read_from_memory<P: AsRef<Path>>(data: &[u8], hint: P) -> IoResult<ImageData> {
    let hint = hint.as_ref();
    let format = Format::detect(data, hint);
    trace!(%format, "decoding");

    let image = match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngCodec.read_from_memory(data)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegCodec.read_from_memory(data)?,

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::TiffCodec.read_from_memory(data)?,

        #[allow(unreachable_patterns)]
        _ => return Err(unsupported(hint)),
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(IoError::InvalidFile(format!(
            "{} has zero size ({}x{})",
            hint.display(),
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}

/// Reads an image from a file, auto-detecting the format.
///
/// Magic bytes take precedence over the extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or is empty
/// - The format is not supported
/// - The file is corrupted or has zero width/height
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Err(IoError::EmptyFile(path.display().to_string()));
    }

    let image = read_from_memory(&data, path)?;
    debug!(
        input = %path.display(),
        format = %image.metadata.format,
        model = %image.metadata.color_model,
        width = image.width(),
        height = image.height(),
        layout = ?image.buffer.layout(),
        bit_depth = image.metadata.bit_depth,
        "decoded"
    );
    Ok(image)
}

/// Encodes `image` in the given format into a byte vector.
pub fn encode_to_memory(
    format: Format,
    image: &ImageBuffer,
    options: &WriteOptions,
) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngCodec.write_to_memory(image, options),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegCodec.write_to_memory(image, options),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::TiffCodec.write_to_memory(image, options),

        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Writes an image, choosing the format from the path's extension.
///
/// Nothing is created at `path` unless encoding succeeds.
pub fn write<P: AsRef<Path>>(
    path: P,
    image: &ImageBuffer,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(output = %path.display(), %format, "encoding");
    if image.layout().has_alpha() && !format.supports_alpha() {
        warn!(%format, "format has no alpha channel; transparency is dropped");
    }

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image, options),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image, options),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::write(path, image, options),

        #[allow(unreachable_patterns)]
        _ => Err(unsupported(path)),
    }
}
