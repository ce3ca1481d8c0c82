//! JPEG format support.
//!
//! Provides reading and writing of JPEG files.
//!
//! # Overview
//!
//! JPEG is 8-bit only and has no alpha channel:
//! - RGB, Grayscale and CMYK input are decoded
//! - Gray and RGB are written; an alpha channel is dropped
//!
//! CMYK input is converted to an approximate RGB so the pixels can still be
//! inspected, but the image is tagged [`ColorModel::Cmyk`] and the grayscale
//! pipeline refuses it.

use crate::sample::{be_bytes_to_u16, cmyk_to_rgb, from_u16, from_u8, to_u8};
use crate::{
    Format, ImageData, ImageReader, ImageWriter, IoError, IoResult, Metadata, WriteOptions,
};
use c2g_core::{ColorModel, ImageBuffer, Layout};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

/// JPEG reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl ImageReader for JpegCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        use jpeg_decoder::PixelFormat;

        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let (layout, color_model, samples): (Layout, ColorModel, Vec<f32>) =
            match info.pixel_format {
                PixelFormat::RGB24 => (Layout::Rgb, ColorModel::Srgb, bytes_to_unit(&pixels)),
                PixelFormat::L8 => (Layout::Gray, ColorModel::Gray, bytes_to_unit(&pixels)),
                PixelFormat::L16 => (
                    Layout::Gray,
                    ColorModel::Gray,
                    be_bytes_to_u16(&pixels).into_iter().map(from_u16).collect(),
                ),
                PixelFormat::CMYK32 => (
                    Layout::Rgb,
                    ColorModel::Cmyk,
                    cmyk_to_rgb(&bytes_to_unit(&pixels)),
                ),
                #[allow(unreachable_patterns)]
                other => {
                    return Err(IoError::UnsupportedBitDepth(format!("{:?}", other)));
                }
            };

        let buffer = ImageBuffer::from_data(width, height, layout, samples)?;
        Ok(ImageData::new(
            buffer,
            Metadata {
                format: Format::Jpeg,
                color_model,
                bit_depth: 8,
            },
        ))
    }
}

impl ImageWriter for JpegCodec {
    fn encode<W: Write + Seek>(
        &self,
        writer: &mut W,
        image: &ImageBuffer,
        options: &WriteOptions,
    ) -> IoResult<()> {
        use jpeg_encoder::{ColorType as JpegColorType, Encoder};

        let too_large = |what: &str, v: u32| {
            IoError::EncodeError(format!("{what} {v} exceeds JPEG limit"))
        };
        let width = u16::try_from(image.width()).map_err(|_| too_large("width", image.width()))?;
        let height =
            u16::try_from(image.height()).map_err(|_| too_large("height", image.height()))?;

        let opaque = image.to_layout(image.layout().without_alpha());
        let color_type = match opaque.layout() {
            Layout::Gray => JpegColorType::Luma,
            _ => JpegColorType::Rgb,
        };
        let pixel_data: Vec<u8> = opaque.as_slice().iter().map(|&v| to_u8(v)).collect();

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, options.jpeg_quality.clamp(1, 100));
        encoder
            .encode(&pixel_data, width, height, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        writer.write_all(&buffer)?;
        Ok(())
    }
}

/// Writes a JPEG file (through the atomic writer).
pub fn write<P: AsRef<Path>>(
    path: P,
    image: &ImageBuffer,
    options: &WriteOptions,
) -> IoResult<()> {
    crate::atomic::write_atomic(path.as_ref(), |file| JpegCodec.encode(file, image, options))
}

fn bytes_to_unit(bytes: &[u8]) -> Vec<f32> {
    bytes.iter().map(|&v| from_u8(v)).collect()
}
