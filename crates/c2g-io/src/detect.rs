//! Format detection utilities.
//!
//! Detects image formats from file extensions and magic bytes.

use std::fmt;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// TIFF format.
    Tiff,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file contents, falling back to the extension.
    ///
    /// Magic bytes win: a PNG saved as `photo.jpg` is read as PNG.
    pub fn detect<P: AsRef<Path>>(bytes: &[u8], path: P) -> Self {
        match Self::from_bytes(bytes) {
            Format::Unknown => Self::from_extension(path),
            format => format,
        }
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") | Some("jpe") => Format::Jpeg,
            Some("tif") | Some("tiff") => Format::Tiff,
            _ => Format::Unknown,
        }
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // PNG: 0x89 0x50 0x4E 0x47 0x0D 0x0A 0x1A 0x0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        // JPEG: 0xFF 0xD8 0xFF
        if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        if bytes.len() >= 4 {
            // Little-endian TIFF
            if bytes[0..4] == [0x49, 0x49, 0x2A, 0x00] {
                return Format::Tiff;
            }
            // Big-endian TIFF
            if bytes[0..4] == [0x4D, 0x4D, 0x00, 0x2A] {
                return Format::Tiff;
            }
        }

        Format::Unknown
    }

    /// Returns true if the container can store an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, Format::Png | Format::Tiff)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Png => "PNG",
            Format::Jpeg => "JPEG",
            Format::Tiff => "TIFF",
            Format::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(Format::from_extension("test.png"), Format::Png);
        assert_eq!(Format::from_extension("test.PNG"), Format::Png);
        assert_eq!(Format::from_extension("test.jpg"), Format::Jpeg);
        assert_eq!(Format::from_extension("test.jpeg"), Format::Jpeg);
        assert_eq!(Format::from_extension("test.tif"), Format::Tiff);
        assert_eq!(Format::from_extension("test.tiff"), Format::Tiff);
        assert_eq!(Format::from_extension("test.exr"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_magic_bytes() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(Format::from_bytes(&png), Format::Png);

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(Format::from_bytes(&jpeg), Format::Jpeg);

        let tiff_le = [0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        assert_eq!(Format::from_bytes(&tiff_le), Format::Tiff);

        let tiff_be = [0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
        assert_eq!(Format::from_bytes(&tiff_be), Format::Tiff);

        assert_eq!(Format::from_bytes(b"hello world"), Format::Unknown);
        assert_eq!(Format::from_bytes(&[]), Format::Unknown);
    }

    #[test]
    fn alpha_capable_containers() {
        assert!(Format::Png.supports_alpha());
        assert!(Format::Tiff.supports_alpha());
        assert!(!Format::Jpeg.supports_alpha());
    }

    #[test]
    fn magic_overrides_extension() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(Format::detect(&png, "mislabeled.jpg"), Format::Png);
        assert_eq!(Format::detect(b"????", "guess.tiff"), Format::Tiff);
    }
}
