//! Image type and pixel dimensions from the first bytes of a stream.
//!
//! The detector wraps a forward-only [`StreamSource`] in a [`LazyBuffer`],
//! sniffs the two magic bytes, and hands the buffer to the matching format
//! decoder. Only the bytes the decoder asks for are ever pulled from the
//! source.

pub mod buffer;
pub mod detect;
mod error;
pub mod formats;
pub mod sniff;
mod traits;
mod types;

pub use buffer::{ByteOrder, DEFAULT_CHUNK_SIZE, LazyBuffer};
pub use detect::{Detection, detect, detect_bytes, detect_with};
pub use error::{CoreError, DetectError, Result};
pub use sniff::{DetectOptions, SignatureCheck};
pub use traits::StreamSource;
pub use types::{ImageSize, ImageType};
