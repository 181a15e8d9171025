//! Sniff, decode, and report.

use crate::buffer::{DEFAULT_CHUNK_SIZE, LazyBuffer};
use crate::error::{DetectError, Result};
use crate::formats::decode_size;
use crate::sniff::{DetectOptions, SignatureCheck, sniff, verify_signature};
use crate::traits::StreamSource;
use crate::types::{ImageSize, ImageType};

/// Outcome of a successful detection, with the read footprint it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub image_type: ImageType,
    pub size: ImageSize,
    /// Bytes pulled from the source, including read-ahead.
    pub bytes_read: usize,
}

/// Detects the type and pixel size of the image at the head of `source`.
///
/// Reads only as far into the stream as the sniffed format requires. The
/// source is borrowed, never closed.
pub fn detect<S: StreamSource + ?Sized>(
    source: &mut S,
) -> std::result::Result<(ImageType, ImageSize), DetectError> {
    detect_with(source, &DetectOptions::default(), DEFAULT_CHUNK_SIZE)
        .map(|d| (d.image_type, d.size))
}

/// [`detect`] over an in-memory prefix of a file.
pub fn detect_bytes(data: &[u8]) -> std::result::Result<(ImageType, ImageSize), DetectError> {
    let mut source = data;
    detect(&mut source)
}

pub fn detect_with<S: StreamSource + ?Sized>(
    source: &mut S,
    options: &DetectOptions,
    chunk_size: usize,
) -> std::result::Result<Detection, DetectError> {
    let mut buffer = LazyBuffer::with_chunk_size(source, chunk_size);

    let image_type =
        sniff(&mut buffer).map_err(|e| DetectError::new(ImageType::Unknown, e))?;

    let size = decode_checked(&mut buffer, image_type, options)
        .map_err(|e| DetectError::new(image_type, e))?;

    Ok(Detection {
        image_type,
        size,
        bytes_read: buffer.buffered_len(),
    })
}

fn decode_checked<S: StreamSource + ?Sized>(
    buffer: &mut LazyBuffer<'_, S>,
    image_type: ImageType,
    options: &DetectOptions,
) -> Result<ImageSize> {
    if options.signature == SignatureCheck::Full {
        verify_signature(buffer, image_type)?;
    }
    decode_size(image_type, buffer)
}
