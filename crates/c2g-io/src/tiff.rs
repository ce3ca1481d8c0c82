//! TIFF format support.
//!
//! Provides reading and writing of TIFF files, widely used in
//! print, scanning, and archival workflows.
//!
//! # Features
//!
//! - 8-bit, 16-bit and 32-bit float input
//! - Gray, Gray+Alpha, RGB, RGBA and CMYK input
//! - 8-bit, 16-bit or 32-bit float Gray, RGB and RGBA output
//!
//! CMYK is converted to an approximate RGB on read and tagged
//! [`ColorModel::Cmyk`], the same way the JPEG reader handles it.

use crate::sample::{cmyk_to_rgb, from_u16, from_u8, to_u16, to_u8};
use crate::{
    Format, ImageData, ImageReader, ImageWriter, IoError, IoResult, Metadata, WriteOptions,
};
use c2g_core::{ColorModel, ImageBuffer, Layout};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

/// TIFF reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffCodec;

impl ImageReader for TiffCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        use tiff::decoder::{Decoder, DecodingResult};
        use tiff::ColorType;

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

        let result = decoder
            .read_image()
            .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

        let (layout, color_model) = match color_type {
            ColorType::Gray(_) => (Layout::Gray, ColorModel::Gray),
            ColorType::GrayA(_) => (Layout::GrayAlpha, ColorModel::Gray),
            ColorType::RGB(32) => (Layout::Rgb, ColorModel::Rgb),
            ColorType::RGBA(32) => (Layout::Rgba, ColorModel::Rgb),
            ColorType::RGB(_) => (Layout::Rgb, ColorModel::Srgb),
            ColorType::RGBA(_) => (Layout::Rgba, ColorModel::Srgb),
            ColorType::CMYK(_) => (Layout::Rgb, ColorModel::Cmyk),
            ct => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "unsupported TIFF color type: {:?}",
                    ct
                )));
            }
        };

        let (bit_depth, samples): (u8, Vec<f32>) = match result {
            DecodingResult::U8(buf) => (8, buf.iter().map(|&v| from_u8(v)).collect()),
            DecodingResult::U16(buf) => (16, buf.iter().map(|&v| from_u16(v)).collect()),
            DecodingResult::F32(buf) => (32, buf),
            _ => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "unsupported TIFF sample type for {:?}",
                    color_type
                )));
            }
        };

        let samples = match color_type {
            ColorType::CMYK(_) => cmyk_to_rgb(&samples),
            _ => samples,
        };
        let buffer = ImageBuffer::from_data(width, height, layout, samples)?;
        Ok(ImageData::new(
            buffer,
            Metadata {
                format: Format::Tiff,
                color_model,
                bit_depth,
            },
        ))
    }
}

impl ImageWriter for TiffCodec {
    fn encode<W: Write + Seek>(
        &self,
        writer: &mut W,
        image: &ImageBuffer,
        options: &WriteOptions,
    ) -> IoResult<()> {
        use tiff::encoder::{colortype, TiffEncoder};

        let mut encoder = TiffEncoder::new(writer)
            .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?;

        let image = match image.layout() {
            Layout::GrayAlpha => image.to_layout(Layout::Rgba),
            _ => image.clone(),
        };
        let (width, height) = image.dimensions();

        let result = match options.bit_depth {
            32.. => {
                let data = image.as_slice();
                match image.layout() {
                    Layout::Gray => {
                        encoder.write_image::<colortype::Gray32Float>(width, height, data)
                    }
                    Layout::Rgb => {
                        encoder.write_image::<colortype::RGB32Float>(width, height, data)
                    }
                    _ => {
                        encoder.write_image::<colortype::RGBA32Float>(width, height, data)
                    }
                }
            }
            9.. => {
                let data: Vec<u16> = image.as_slice().iter().map(|&v| to_u16(v)).collect();
                match image.layout() {
                    Layout::Gray => encoder.write_image::<colortype::Gray16>(width, height, &data),
                    Layout::Rgb => encoder.write_image::<colortype::RGB16>(width, height, &data),
                    _ => encoder.write_image::<colortype::RGBA16>(width, height, &data),
                }
            }
            _ => {
                let data: Vec<u8> = image.as_slice().iter().map(|&v| to_u8(v)).collect();
                match image.layout() {
                    Layout::Gray => encoder.write_image::<colortype::Gray8>(width, height, &data),
                    Layout::Rgb => encoder.write_image::<colortype::RGB8>(width, height, &data),
                    _ => encoder.write_image::<colortype::RGBA8>(width, height, &data),
                }
            }
        };

        result.map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))
    }
}

/// Writes a TIFF file (through the atomic writer).
pub fn write<P: AsRef<Path>>(
    path: P,
    image: &ImageBuffer,
    options: &WriteOptions,
) -> IoResult<()> {
    crate::atomic::write_atomic(path.as_ref(), |file| TiffCodec.encode(file, image, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgb_8bit() {
        let data: Vec<f32> = (0..32 * 32 * 3).map(|i| (i % 256) as f32 / 255.0).collect();
        let image = ImageBuffer::from_data(32, 32, Layout::Rgb, data).unwrap();

        let bytes = TiffCodec.write_to_memory(&image, &WriteOptions::default()).unwrap();
        let loaded = TiffCodec.read_from_memory(&bytes).unwrap();

        assert_eq!(loaded.buffer.dimensions(), (32, 32));
        assert_eq!(loaded.buffer.layout(), Layout::Rgb);
        assert_eq!(loaded.metadata.color_model, ColorModel::Srgb);
        assert_eq!(loaded.metadata.bit_depth, 8);
        assert_eq!(loaded.buffer.as_slice(), image.as_slice());
    }

    #[test]
    fn test_roundtrip_rgba_16bit() {
        let image = ImageBuffer::from_data(16, 16, Layout::Rgba, vec![0.5; 16 * 16 * 4]).unwrap();
        let options = WriteOptions::default().with_bit_depth(16);

        let bytes = TiffCodec.write_to_memory(&image, &options).unwrap();
        let loaded = TiffCodec.read_from_memory(&bytes).unwrap();

        assert_eq!(loaded.buffer.layout(), Layout::Rgba);
        assert_eq!(loaded.metadata.bit_depth, 16);
        assert!(loaded.buffer.as_slice().iter().all(|&v| (v - 0.5).abs() < 1e-4));
    }

    #[test]
    fn test_gray_alpha_written_as_rgba() {
        let data = vec![0.2, 1.0, 0.6, 0.4];
        let image = ImageBuffer::from_data(2, 1, Layout::GrayAlpha, data).unwrap();
        let bytes = TiffCodec.write_to_memory(&image, &WriteOptions::default()).unwrap();
        let loaded = TiffCodec.read_from_memory(&bytes).unwrap();

        assert_eq!(loaded.buffer.layout(), Layout::Rgba);
        let alpha = loaded.buffer.alpha().unwrap();
        assert!((alpha.as_slice()[1] - 0.4).abs() < 1.0 / 255.0);
    }

    #[test]
    fn float_roundtrip_is_exact() {
        let data = vec![0.25, 0.3, 0.123456, 0.987654];
        let image = ImageBuffer::from_data(2, 1, Layout::GrayAlpha, data).unwrap();
        let options = WriteOptions::default().with_bit_depth(32);

        let bytes = TiffCodec.write_to_memory(&image, &options).unwrap();
        let loaded = TiffCodec.read_from_memory(&bytes).unwrap();

        assert_eq!(loaded.metadata.bit_depth, 32);
        assert_eq!(loaded.metadata.color_model, ColorModel::Rgb);
        let alpha = loaded.buffer.alpha().unwrap();
        assert_eq!(alpha.as_slice(), &[0.3, 0.987654]);
    }

    #[test]
    fn cmyk_reads_as_opaque_rgb() {
        use tiff::encoder::{colortype, TiffEncoder};

        let mut bytes = Cursor::new(Vec::new());
        TiffEncoder::new(&mut bytes)
            .unwrap()
            .write_image::<colortype::CMYK8>(2, 1, &[0, 0, 0, 0, 255, 0, 0, 128])
            .unwrap();
        let loaded = TiffCodec.read_from_memory(bytes.get_ref()).unwrap();

        assert_eq!(loaded.metadata.color_model, ColorModel::Cmyk);
        assert_eq!(loaded.buffer.layout(), Layout::Rgb);
        assert!(!loaded.has_alpha());
        assert_eq!(loaded.alpha_mean(), None);
        let px = loaded.buffer.as_slice();
        assert_eq!(&px[..3], &[1.0, 1.0, 1.0]);
        assert_eq!(px[3], 0.0);
    }
}
