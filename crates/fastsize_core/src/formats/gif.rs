use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::Result;
use crate::traits::StreamSource;
use crate::types::ImageSize;

/// Logical Screen Descriptor follows the 6-byte "GIF87a"/"GIF89a" signature.
const SCREEN_WIDTH_OFFSET: u64 = 6;
const SCREEN_HEIGHT_OFFSET: u64 = 8;

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let width = buffer.read_u16(SCREEN_WIDTH_OFFSET, ByteOrder::Little)?;
    let height = buffer.read_u16(SCREEN_HEIGHT_OFFSET, ByteOrder::Little)?;
    Ok(ImageSize::new(width.into(), height.into()))
}
