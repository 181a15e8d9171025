use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::Result;
use crate::traits::StreamSource;
use crate::types::ImageSize;

pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// IHDR is always the first chunk: length(4) "IHDR"(4) width(4) height(4) ...
const IHDR_WIDTH_OFFSET: u64 = 16;
const IHDR_HEIGHT_OFFSET: u64 = 20;

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let width = buffer.read_u32(IHDR_WIDTH_OFFSET, ByteOrder::Big)?;
    let height = buffer.read_u32(IHDR_HEIGHT_OFFSET, ByteOrder::Big)?;
    Ok(ImageSize::new(width, height))
}
