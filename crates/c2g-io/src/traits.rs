//! I/O traits for image readers and writers.
//!
//! Each container format implements both traits on a unit struct
//! ([`PngCodec`](crate::png::PngCodec), ...). The top-level
//! [`read`](crate::read) / [`write`](crate::write) functions dispatch on
//! [`Format`](crate::Format).

use crate::{ImageData, IoResult, WriteOptions};
use c2g_core::ImageBuffer;
use std::io::{Cursor, Seek, Write};

/// Trait for image format readers.
pub trait ImageReader {
    /// Decodes an image held in memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData>;
}

/// Trait for image format writers.
pub trait ImageWriter {
    /// Encodes `image` into `writer`.
    fn encode<W: Write + Seek>(
        &self,
        writer: &mut W,
        image: &ImageBuffer,
        options: &WriteOptions,
    ) -> IoResult<()>;

    /// Encodes `image` into a byte vector.
    fn write_to_memory(&self, image: &ImageBuffer, options: &WriteOptions) -> IoResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.encode(&mut cursor, image, options)?;
        Ok(cursor.into_inner())
    }
}
