//! Magic-byte dispatch.

use crate::buffer::LazyBuffer;
use crate::error::{CoreError, Result};
use crate::formats::{jpeg, png, tiff};
use crate::traits::StreamSource;
use crate::types::ImageType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureCheck {
    #[default]
    Prefix,
    /// The complete signature of the sniffed type is verified as well, so a
    /// RIFF file that is not WebP is rejected instead of misparsed.
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectOptions {
    pub signature: SignatureCheck,
}

impl DetectOptions {
    #[inline]
    pub const fn strict() -> Self {
        Self {
            signature: SignatureCheck::Full,
        }
    }
}

#[inline]
pub const fn classify(magic: [u8; 2]) -> ImageType {
    match magic {
        [b'B', b'M'] => ImageType::Bmp,
        [0x47, 0x49] => ImageType::Gif,
        [0xFF, 0xD8] => ImageType::Jpeg,
        [0x89, 0x50] => ImageType::Png,
        [b'I', b'I'] | [b'M', b'M'] => ImageType::Tiff,
        [b'R', b'I'] => ImageType::Webp,
        _ => ImageType::Unknown,
    }
}

/// Reads the two magic bytes at offset 0 and classifies them.
///
/// Never returns [`ImageType::Unknown`]; an unmatched prefix is reported as
/// [`CoreError::UnrecognizedFormat`] carrying the offending bytes.
pub fn sniff<S: StreamSource + ?Sized>(buffer: &mut LazyBuffer<'_, S>) -> Result<ImageType> {
    let magic: [u8; 2] = buffer.read_array(0)?;
    match classify(magic) {
        ImageType::Unknown => Err(CoreError::UnrecognizedFormat { magic }),
        image_type => Ok(image_type),
    }
}

pub fn verify_signature<S: StreamSource + ?Sized>(
    buffer: &mut LazyBuffer<'_, S>,
    image_type: ImageType,
) -> Result<()> {
    match image_type {
        ImageType::Bmp | ImageType::Unknown => Ok(()),
        ImageType::Gif => {
            let header: [u8; 6] = buffer.read_array(0)?;
            expect(&header == b"GIF87a" || &header == b"GIF89a", 0)
        }
        ImageType::Jpeg => {
            let header: [u8; 3] = buffer.read_array(0)?;
            expect(header == [jpeg::SOI[0], jpeg::SOI[1], 0xFF], 2)
        }
        ImageType::Png => {
            let header: [u8; 8] = buffer.read_array(0)?;
            expect(header == png::SIGNATURE, 0)
        }
        ImageType::Tiff => {
            let order = tiff::byte_order(buffer)?;
            let magic = buffer.read_u16(2, order)?;
            expect(magic == tiff::MAGIC, 2)
        }
        ImageType::Webp => {
            let riff: [u8; 4] = buffer.read_array(0)?;
            expect(&riff == b"RIFF", 0)?;
            let form: [u8; 4] = buffer.read_array(8)?;
            expect(&form == b"WEBP", 8)
        }
    }
}

#[inline]
fn expect(matched: bool, offset: u64) -> Result<()> {
    if matched {
        Ok(())
    } else {
        Err(CoreError::SignatureMismatch { offset })
    }
}
