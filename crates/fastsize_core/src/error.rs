use std::io;
use thiserror::Error;

use crate::types::ImageType;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("source error: {0}")]
    Source(#[source] io::Error),

    #[error("source timed out: {0}")]
    SourceTimeout(#[source] io::Error),

    #[error("insufficient data: needed {needed} bytes at offset {offset}, stream ended after {available}")]
    InsufficientData {
        offset: u64,
        needed: usize,
        available: u64,
    },

    #[error("unrecognized format: magic bytes {:02X} {:02X}", .magic[0], .magic[1])]
    UnrecognizedFormat { magic: [u8; 2] },

    #[error("signature mismatch at offset {offset}")]
    SignatureMismatch { offset: u64 },

    #[error("malformed JPEG at offset {offset}: {reason}")]
    MalformedJpeg { offset: u64, reason: &'static str },

    #[error("no JPEG frame marker found before offset {offset}")]
    NoFrameMarker { offset: u64 },

    #[error("TIFF directory has no tag 0x{tag:04X}")]
    MissingDimensionTag { tag: u16 },

    #[error("TIFF tag 0x{tag:04X} has unsupported field type {field_type}")]
    UnsupportedTiffField { tag: u16, field_type: u16 },

    #[error("unsupported WebP variant {:?}", String::from_utf8_lossy(.fourcc))]
    UnsupportedWebpVariant { fourcc: [u8; 4] },

    #[error("invalid dimension value {value}")]
    InvalidDimension { value: i64 },
}

impl CoreError {
    pub(crate) fn from_source(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::SourceTimeout(err),
            _ => Self::Source(err),
        }
    }

    #[inline]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure of a single detection call.
///
/// Carries the type that was being decoded when the failure happened, or
/// [`ImageType::Unknown`] when the magic bytes could not be read or matched.
#[derive(Debug, Error)]
#[error("{image_type} detection failed: {kind}")]
pub struct DetectError {
    image_type: ImageType,
    #[source]
    kind: CoreError,
}

impl DetectError {
    pub fn new(image_type: ImageType, kind: CoreError) -> Self {
        Self { image_type, kind }
    }

    #[inline]
    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    #[inline]
    pub fn kind(&self) -> &CoreError {
        &self.kind
    }

    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, CoreError::SourceTimeout(_))
    }
}
