//! PNG format support.
//!
//! Provides reading and writing of PNG files with support for
//! 8-bit and 16-bit images and alpha channels.
//!
//! # Features
//!
//! - Gray, Gray+Alpha, RGB and RGBA
//! - Palette and sub-byte images are expanded on read
//! - 8-bit and 16-bit output
//!
//! # Example
//!
//! ```rust,ignore
//! use c2g_io::{png, read};
//!
//! let image = read("input.png")?;
//! png::write("output.png", &image.buffer, &Default::default())?;
//! ```

use crate::sample::{be_bytes_to_u16, from_u16, from_u8, to_u16, to_u8};
use crate::{
    Format, ImageData, ImageReader, ImageWriter, IoError, IoResult, Metadata, WriteOptions,
};
use c2g_core::{ColorModel, ImageBuffer, Layout};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

/// PNG reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageReader for PngCodec {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let bytes = &buf[..info.buffer_size()];

        let (layout, color_model) = match info.color_type {
            png::ColorType::Rgb => (Layout::Rgb, ColorModel::Srgb),
            png::ColorType::Rgba => (Layout::Rgba, ColorModel::Srgb),
            png::ColorType::Grayscale => (Layout::Gray, ColorModel::Gray),
            png::ColorType::GrayscaleAlpha => (Layout::GrayAlpha, ColorModel::Gray),
            png::ColorType::Indexed => {
                return Err(IoError::UnsupportedBitDepth(
                    "indexed PNG was not expanded".into(),
                ));
            }
        };

        let (bit_depth, samples): (u8, Vec<f32>) = match info.bit_depth {
            png::BitDepth::Eight => (8, bytes.iter().map(|&v| from_u8(v)).collect()),
            png::BitDepth::Sixteen => (
                16,
                be_bytes_to_u16(bytes).into_iter().map(from_u16).collect(),
            ),
            depth => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    info.color_type, depth
                )));
            }
        };

        let buffer = ImageBuffer::from_data(info.width, info.height, layout, samples)?;
        Ok(ImageData::new(
            buffer,
            Metadata {
                format: Format::Png,
                color_model,
                bit_depth,
            },
        ))
    }
}

impl ImageWriter for PngCodec {
    fn encode<W: Write + Seek>(
        &self,
        writer: &mut W,
        image: &ImageBuffer,
        options: &WriteOptions,
    ) -> IoResult<()> {
        let color_type = match image.layout() {
            Layout::Gray => png::ColorType::Grayscale,
            Layout::GrayAlpha => png::ColorType::GrayscaleAlpha,
            Layout::Rgb => png::ColorType::Rgb,
            Layout::Rgba => png::ColorType::Rgba,
        };

        let mut encoder = png::Encoder::new(writer, image.width(), image.height());
        encoder.set_color(color_type);
        encoder.set_compression(png::Compression::default());
        encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

        let bytes: Vec<u8> = if options.bit_depth > 8 {
            encoder.set_depth(png::BitDepth::Sixteen);
            image
                .as_slice()
                .iter()
                .flat_map(|&v| to_u16(v).to_be_bytes())
                .collect()
        } else {
            encoder.set_depth(png::BitDepth::Eight);
            image.as_slice().iter().map(|&v| to_u8(v)).collect()
        };

        let mut png_writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .write_image_data(&bytes)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        png_writer
            .finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;

        Ok(())
    }
}

/// Writes an image to a PNG file (through the atomic writer).
pub fn write<P: AsRef<Path>>(
    path: P,
    image: &ImageBuffer,
    options: &WriteOptions,
) -> IoResult<()> {
    crate::atomic::write_atomic(path.as_ref(), |file| PngCodec.encode(file, image, options))
}
