use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::{CoreError, Result};
use crate::traits::StreamSource;
use crate::types::ImageSize;

const DIB_HEADER_SIZE_OFFSET: u64 = 14;
const WIDTH_OFFSET: u64 = 18;
const HEIGHT_OFFSET: u64 = 22;

/// OS/2 `BITMAPCOREHEADER` stores 16-bit unsigned dimensions at 18 and 20.
const CORE_HEADER_SIZE: u32 = 12;
const CORE_HEIGHT_OFFSET: u64 = 20;

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let header_size = buffer.read_u32(DIB_HEADER_SIZE_OFFSET, ByteOrder::Little)?;

    if header_size == CORE_HEADER_SIZE {
        let width = buffer.read_u16(WIDTH_OFFSET, ByteOrder::Little)?;
        let height = buffer.read_u16(CORE_HEIGHT_OFFSET, ByteOrder::Little)?;
        return Ok(ImageSize::new(width.into(), height.into()));
    }

    let width = buffer.read_i32(WIDTH_OFFSET, ByteOrder::Little)?;
    // Negative height marks a top-down bitmap.
    let height = buffer.read_i32(HEIGHT_OFFSET, ByteOrder::Little)?;

    let width = u32::try_from(width).map_err(|_| CoreError::InvalidDimension {
        value: width.into(),
    })?;

    Ok(ImageSize::new(width, height.unsigned_abs()))
}
