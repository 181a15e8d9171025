//! WebP dimensions from the first chunk of the RIFF container.
//!
//! Layout: "RIFF" size(4) "WEBP" fourcc(4) chunk-size(4) payload...

use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::{CoreError, Result};
use crate::traits::StreamSource;
use crate::types::ImageSize;

const FOURCC_OFFSET: u64 = 12;
const PAYLOAD_OFFSET: u64 = 20;

pub const VP8: [u8; 4] = *b"VP8 ";
pub const VP8L: [u8; 4] = *b"VP8L";
pub const VP8X: [u8; 4] = *b"VP8X";

// Lossy: frame tag(3) start code(3) then 16-bit fields whose low 14 bits are the size.
const VP8_WIDTH_OFFSET: u64 = PAYLOAD_OFFSET + 6;
const VP8_HEIGHT_OFFSET: u64 = PAYLOAD_OFFSET + 8;
const VP8_DIMENSION_MASK: u16 = 0x3FFF;

// Lossless: signature byte 0x2F, then 14 bits width-1, 14 bits height-1.
const VP8L_BITS_OFFSET: u64 = PAYLOAD_OFFSET + 1;
const VP8L_DIMENSION_MASK: u32 = 0x3FFF;

// Extended: flags(1) reserved(3), then 24-bit canvas width-1 and height-1.
const VP8X_WIDTH_OFFSET: u64 = PAYLOAD_OFFSET + 4;
const VP8X_HEIGHT_OFFSET: u64 = PAYLOAD_OFFSET + 7;

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let fourcc: [u8; 4] = buffer.read_array(FOURCC_OFFSET)?;

    match fourcc {
        VP8 => {
            let width = buffer.read_u16(VP8_WIDTH_OFFSET, ByteOrder::Little)?;
            let height = buffer.read_u16(VP8_HEIGHT_OFFSET, ByteOrder::Little)?;
            Ok(ImageSize::new(
                (width & VP8_DIMENSION_MASK).into(),
                (height & VP8_DIMENSION_MASK).into(),
            ))
        }
        VP8L => {
            let bits = buffer.read_u32(VP8L_BITS_OFFSET, ByteOrder::Little)?;
            Ok(ImageSize::new(
                (bits & VP8L_DIMENSION_MASK) + 1,
                ((bits >> 14) & VP8L_DIMENSION_MASK) + 1,
            ))
        }
        VP8X => {
            let width = read_u24(buffer, VP8X_WIDTH_OFFSET)?;
            let height = read_u24(buffer, VP8X_HEIGHT_OFFSET)?;
            Ok(ImageSize::new(width + 1, height + 1))
        }
        fourcc => Err(CoreError::UnsupportedWebpVariant { fourcc }),
    }
}

#[inline]
fn read_u24<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>, offset: u64) -> Result<u32> {
    let [b0, b1, b2] = buffer.read_array::<3>(offset)?;
    Ok(u32::from_le_bytes([b0, b1, b2, 0]))
}
