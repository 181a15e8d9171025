//! Per-format header decoders.
//!
//! Each decoder knows where its format stores the pixel dimensions and reads
//! only as far into the stream as that requires.

pub mod bmp;
pub mod gif;
pub mod jpeg;
pub mod png;
pub mod tiff;
pub mod webp;

use crate::buffer::LazyBuffer;
use crate::error::{CoreError, Result};
use crate::traits::StreamSource;
use crate::types::{ImageSize, ImageType};

/// Runs the decoder for `image_type`.
pub fn decode_size<S: StreamSource + ?Sized>(
    image_type: ImageType,
    buffer: &mut LazyBuffer<'_, S>,
) -> Result<ImageSize> {
    match image_type {
        ImageType::Bmp => bmp::decode(buffer),
        ImageType::Gif => gif::decode(buffer),
        ImageType::Jpeg => jpeg::decode(buffer),
        ImageType::Png => png::decode(buffer),
        ImageType::Tiff => tiff::decode(buffer),
        ImageType::Webp => webp::decode(buffer),
        ImageType::Unknown => Err(CoreError::UnrecognizedFormat {
            magic: buffer.read_array(0)?,
        }),
    }
}
