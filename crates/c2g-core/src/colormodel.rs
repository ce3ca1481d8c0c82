//! Color model tags reported by decoders.
//!
//! The grayscale conversion is only defined for RGB input, so decoders tag
//! every image with the model its container declared and the pipeline
//! checks the tag before touching any pixels.

use std::fmt;

/// Color model an image was stored in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColorModel {
    /// Device RGB with no transfer curve information (float TIFF).
    Rgb,
    /// sRGB-encoded RGB (8/16-bit PNG, JPEG, TIFF).
    #[default]
    Srgb,
    /// Single-channel luminance.
    Gray,
    /// Four-channel print separation.
    Cmyk,
    /// Anything else, carried by name.
    Other(String),
}

impl ColorModel {
    /// Returns true for the models the grayscale mixer accepts.
    pub fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb | Self::Srgb)
    }

    /// Tag name as shown in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Rgb => "RGB",
            Self::Srgb => "sRGB",
            Self::Gray => "Gray",
            Self::Cmyk => "CMYK",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
