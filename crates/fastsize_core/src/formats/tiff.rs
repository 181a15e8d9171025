//! TIFF dimensions from the first Image File Directory.
//!
//! The header fixes the byte order for every integer that follows. The first
//! IFD is a counted list of 12-byte entries; `ImageWidth` and `ImageLength`
//! are looked up there, dereferencing the value field when the value does not
//! fit in its four bytes.

use crate::buffer::{ByteOrder, LazyBuffer};
use crate::error::{CoreError, Result};
use crate::traits::StreamSource;
use crate::types::ImageSize;

pub const MAGIC: u16 = 42;
pub const TAG_IMAGE_WIDTH: u16 = 0x0100;
pub const TAG_IMAGE_LENGTH: u16 = 0x0101;

const FIRST_IFD_OFFSET: u64 = 4;
const ENTRY_COUNT_SIZE: u64 = 2;
const ENTRY_SIZE: u64 = 12;
const INLINE_VALUE_SIZE: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    Byte = 1,
    Short = 3,
    Long = 4,
}

impl FieldType {
    #[inline]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Byte),
            3 => Some(Self::Short),
            4 => Some(Self::Long),
            _ => None,
        }
    }

    #[inline]
    pub const fn size(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Long => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct IfdEntry {
    tag: u16,
    field_type: u16,
    count: u32,
    /// Absolute offset of the entry's 4-byte value/offset field.
    value_offset: u64,
}

pub fn byte_order<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ByteOrder> {
    match buffer.read_array::<2>(0)? {
        [b'I', b'I'] => Ok(ByteOrder::Little),
        [b'M', b'M'] => Ok(ByteOrder::Big),
        _ => Err(CoreError::SignatureMismatch { offset: 0 }),
    }
}

pub fn decode<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageSize> {
    let order = byte_order(buffer)?;
    let ifd_offset = u64::from(buffer.read_u32(FIRST_IFD_OFFSET, order)?);
    let entry_count = buffer.read_u16(ifd_offset, order)?;

    let mut width = None;
    let mut height = None;

    for index in 0..u64::from(entry_count) {
        let entry = read_entry(buffer, order, ifd_offset + ENTRY_COUNT_SIZE + index * ENTRY_SIZE)?;

        let slot = match entry.tag {
            TAG_IMAGE_WIDTH => &mut width,
            TAG_IMAGE_LENGTH => &mut height,
            _ => continue,
        };
        *slot = Some(read_dimension(buffer, order, &entry)?);

        if let (Some(width), Some(height)) = (width, height) {
            return Ok(ImageSize::new(width, height));
        }
    }

    let tag = if width.is_none() {
        TAG_IMAGE_WIDTH
    } else {
        TAG_IMAGE_LENGTH
    };
    Err(CoreError::MissingDimensionTag { tag })
}

fn read_entry<S: StreamSource + ?Sized>(
    buffer: &mut LazyBuffer<'_, S>,
    order: ByteOrder,
    offset: u64,
) -> Result<IfdEntry> {
    let raw: [u8; 8] = buffer.read_array(offset)?;
    Ok(IfdEntry {
        tag: order.u16([raw[0], raw[1]]),
        field_type: order.u16([raw[2], raw[3]]),
        count: order.u32([raw[4], raw[5], raw[6], raw[7]]),
        value_offset: offset + 8,
    })
}

fn read_dimension<S: StreamSource + ?Sized>(
    buffer: &mut LazyBuffer<'_, S>,
    order: ByteOrder,
    entry: &IfdEntry,
) -> Result<u32> {
    let field_type =
        FieldType::from_u16(entry.field_type).ok_or(CoreError::UnsupportedTiffField {
            tag: entry.tag,
            field_type: entry.field_type,
        })?;

    let value_size = field_type.size() * u64::from(entry.count);
    let at = if value_size <= INLINE_VALUE_SIZE {
        entry.value_offset
    } else {
        u64::from(buffer.read_u32(entry.value_offset, order)?)
    };

    Ok(match field_type {
        FieldType::Byte => buffer.read_u8(at)?.into(),
        FieldType::Short => buffer.read_u16(at, order)?.into(),
        FieldType::Long => buffer.read_u32(at, order)?,
    })
}
