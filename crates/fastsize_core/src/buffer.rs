//! Random access over a forward-only stream.
//!
//! [`LazyBuffer`] keeps every byte it has pulled from its [`StreamSource`] in
//! an append-only arena. A request for `len` bytes at `offset` is served from
//! the arena when possible; otherwise the arena is grown forward until it
//! covers the request or the source runs dry. Nothing is ever discarded, so
//! decoders may revisit earlier offsets freely.

use std::io;

use crate::error::{CoreError, Result};
use crate::traits::StreamSource;

pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

// Caps a single pull, whatever the chunk size or requested offset.
const MAX_PULL_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    #[inline]
    pub const fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub const fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub const fn i32(self, bytes: [u8; 4]) -> i32 {
        match self {
            Self::Little => i32::from_le_bytes(bytes),
            Self::Big => i32::from_be_bytes(bytes),
        }
    }
}

pub struct LazyBuffer<'a, S: StreamSource + ?Sized> {
    source: &'a mut S,
    data: Vec<u8>,
    chunk_size: usize,
    exhausted: bool,
    reads: usize,
}

impl<'a, S: StreamSource + ?Sized> LazyBuffer<'a, S> {
    #[inline]
    pub fn new(source: &'a mut S) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    /// `chunk_size` is clamped to `1..=64 KiB`.
    pub fn with_chunk_size(source: &'a mut S, chunk_size: usize) -> Self {
        Self {
            source,
            data: Vec::new(),
            chunk_size: chunk_size.clamp(1, MAX_PULL_SIZE),
            exhausted: false,
            reads: 0,
        }
    }

    /// Returns exactly `len` bytes starting at absolute `offset`.
    ///
    /// Fails with [`CoreError::InsufficientData`] if the source ends first;
    /// a short result is never returned.
    pub fn read_at(&mut self, offset: u64, len: usize) -> Result<&[u8]> {
        let insufficient = |available: usize| CoreError::InsufficientData {
            offset,
            needed: len,
            available: available as u64,
        };

        let start = usize::try_from(offset).map_err(|_| insufficient(self.data.len()))?;
        let end = start
            .checked_add(len)
            .ok_or_else(|| insufficient(self.data.len()))?;

        self.fill_to(end)?;

        if end > self.data.len() {
            return Err(insufficient(self.data.len()));
        }

        Ok(&self.data[start..end])
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self, offset: u64) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_at(offset, N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self, offset: u64) -> Result<u8> {
        Ok(self.read_array::<1>(offset)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self, offset: u64, order: ByteOrder) -> Result<u16> {
        Ok(order.u16(self.read_array(offset)?))
    }

    #[inline]
    pub fn read_u32(&mut self, offset: u64, order: ByteOrder) -> Result<u32> {
        Ok(order.u32(self.read_array(offset)?))
    }

    #[inline]
    pub fn read_i32(&mut self, offset: u64, order: ByteOrder) -> Result<i32> {
        Ok(order.i32(self.read_array(offset)?))
    }

    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn fill_to(&mut self, end: usize) -> Result<()> {
        while self.data.len() < end && !self.exhausted {
            let filled = self.data.len();
            let want = (end - filled).max(self.chunk_size).min(MAX_PULL_SIZE);
            self.data.resize(filled.saturating_add(want), 0);

            self.reads += 1;
            match self.source.read_chunk(&mut self.data[filled..]) {
                Ok(0) => {
                    self.data.truncate(filled);
                    self.exhausted = true;
                }
                Ok(n) => self.data.truncate(filled + n.min(want)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.data.truncate(filled);
                }
                Err(e) => {
                    self.data.truncate(filled);
                    return Err(CoreError::from_source(e));
                }
            }
        }
        Ok(())
    }
}
