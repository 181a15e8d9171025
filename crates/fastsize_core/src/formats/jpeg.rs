//! JPEG frame-size lookup by walking the marker segments that precede the
//! first Start-Of-Frame.

use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::{CoreError, Result};
use crate::traits::StreamSource;
use crate::types::ImageSize;

pub const SOI: [u8; 2] = [0xFF, 0xD8];
pub const MARKER_PREFIX: u8 = 0xFF;
pub const TEM: u8 = 0x01;
pub const SOF0: u8 = 0xC0;
pub const SOF15: u8 = 0xCF;
pub const DHT: u8 = 0xC4;
pub const JPG: u8 = 0xC8;
pub const DAC: u8 = 0xCC;
pub const RST0: u8 = 0xD0;
pub const RST7: u8 = 0xD7;
pub const SOI_MARKER: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;

// Offsets relative to the marker's 0xFF byte: marker(2) length(2) precision(1) height(2) width(2)
const SOF_HEIGHT_OFFSET: u64 = 5;
const SOF_WIDTH_OFFSET: u64 = 7;

#[inline]
pub const fn is_sof_marker(marker: u8) -> bool {
    marker >= SOF0 && marker <= SOF15 && !matches!(marker, DHT | JPG | DAC)
}

#[inline]
pub const fn is_restart_marker(marker: u8) -> bool {
    marker >= RST0 && marker <= RST7
}

/// Markers that are not followed by a length field.
#[inline]
pub const fn is_standalone_marker(marker: u8) -> bool {
    matches!(marker, TEM | SOI_MARKER) || is_restart_marker(marker)
}

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let mut offset = SOI.len() as u64;

    loop {
        let [prefix, marker] = expect_marker(buffer.read_array::<2>(offset), offset)?;

        if prefix != MARKER_PREFIX {
            return Err(CoreError::MalformedJpeg {
                offset,
                reason: "expected 0xFF marker prefix",
            });
        }

        match marker {
            MARKER_PREFIX => offset += 1,
            m if is_sof_marker(m) => return read_frame_size(buffer, offset),
            EOI | SOS => return Err(CoreError::NoFrameMarker { offset }),
            m if is_standalone_marker(m) => offset += 2,
            _ => {
                let length =
                    expect_marker(buffer.read_u16(offset + 2, ByteOrder::Big), offset)?;
                if length < 2 {
                    return Err(CoreError::MalformedJpeg {
                        offset,
                        reason: "segment length shorter than its length field",
                    });
                }
                offset += 2 + u64::from(length);
            }
        }
    }
}

fn read_frame_size<S: StreamSource + ?Sized>(
    buffer: &mut LazyBuffer<'_, S>,
    sof_offset: u64,
) -> Result<ImageSize> {
    let height = buffer.read_u16(sof_offset + SOF_HEIGHT_OFFSET, ByteOrder::Big)?;
    let width = buffer.read_u16(sof_offset + SOF_WIDTH_OFFSET, ByteOrder::Big)?;
    Ok(ImageSize::new(width.into(), height.into()))
}

/// Running out of stream between segments means no frame header exists.
#[inline]
fn expect_marker<T>(result: Result<T>, offset: u64) -> Result<T> {
    result.map_err(|e| {
        if e.is_insufficient_data() {
            CoreError::NoFrameMarker { offset }
        } else {
            e
        }
    })
}
