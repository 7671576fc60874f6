use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::error::DecodingError;

pub const WORD_SIZE: usize = 32;

pub type Word = [u8; WORD_SIZE];

/// Rounds `len` up to a whole number of words.
pub const fn align_up(len: usize) -> Option<usize> {
    match len.checked_add(WORD_SIZE - 1) {
        Some(padded) => Some(padded / WORD_SIZE * WORD_SIZE),
        None => None,
    }
}

/// A window over the call data that offsets are resolved against.
///
/// The top-level argument list is a scope starting at byte 0. Every dynamic
/// array, dynamic tuple and dynamic fixed array opens a new scope at the
/// position its offset word points to, and offsets found inside it are
/// relative to that position, not to the start of the buffer.
///
/// ```text
/// (uint256, uint256[]) = (7, [1, 2])
///
/// 000 : 07            <- scope 0, word 0
/// 032 : 40            <- scope 0, word 1: offset 64 from scope 0
/// 064 : 02            <- array length
/// 096 : 01            <- element scope (base 96), word 0
/// 128 : 02            <- element scope, word 1
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    buf: &'a Bytes,
    base: usize,
}

impl<'a> Scope<'a> {
    pub fn new(buf: &'a Bytes) -> Self {
        Self { buf, base: 0 }
    }

    /// Absolute position of this scope inside the buffer.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Absolute position of the word at `index`, if representable.
    pub fn position(&self, index: usize) -> usize {
        index
            .checked_mul(WORD_SIZE)
            .and_then(|rel| rel.checked_add(self.base))
            .unwrap_or(usize::MAX)
    }

    fn out_of_range(&self, offset: usize, len: usize) -> DecodingError {
        DecodingError::OffsetOutOfRange {
            offset,
            len,
            available: self.buf.len(),
        }
    }

    /// Bounds-checks `len` bytes at the scope-relative byte offset `rel` and
    /// returns their absolute range.
    fn range(&self, rel: usize, len: usize) -> Result<(usize, usize), DecodingError> {
        let start = self
            .base
            .checked_add(rel)
            .ok_or_else(|| self.out_of_range(usize::MAX, len))?;
        let end = start
            .checked_add(len)
            .ok_or_else(|| self.out_of_range(start, len))?;
        if end > self.buf.len() {
            return Err(self.out_of_range(start, len));
        }
        Ok((start, end))
    }

    fn word_at(&self, rel: usize) -> Result<&'a Word, DecodingError> {
        let (start, end) = self.range(rel, WORD_SIZE)?;
        let buf: &'a [u8] = self.buf.as_ref();
        buf[start..end]
            .try_into()
            .map_err(|_| self.out_of_range(start, WORD_SIZE))
    }

    /// Reads the word at word index `index` of this scope.
    pub fn read_word(&self, index: usize) -> Result<&'a Word, DecodingError> {
        let rel = index
            .checked_mul(WORD_SIZE)
            .ok_or_else(|| self.out_of_range(usize::MAX, WORD_SIZE))?;
        self.word_at(rel)
    }

    /// Interprets the word at scope-relative byte offset `rel` as a length or
    /// offset. Values that do not fit in `usize` can never address the buffer;
    /// they are reported at the word's position with `len` saturated.
    fn read_usize_at(&self, rel: usize) -> Result<usize, DecodingError> {
        let word = self.word_at(rel)?;
        let at = self.base.saturating_add(rel);
        let (high, low) = word.split_at(WORD_SIZE - 8);
        if high.iter().any(|b| *b != 0) {
            return Err(self.out_of_range(at, usize::MAX));
        }
        usize::try_from(BigEndian::read_u64(low)).map_err(|_| self.out_of_range(at, usize::MAX))
    }

    /// Reads the word at `index` as a byte offset relative to this scope.
    pub fn read_offset(&self, index: usize) -> Result<usize, DecodingError> {
        let rel = index
            .checked_mul(WORD_SIZE)
            .ok_or_else(|| self.out_of_range(usize::MAX, WORD_SIZE))?;
        self.read_usize_at(rel)
    }

    /// Reads the length word at `offset` from the start of this scope.
    pub fn read_length(&self, offset: usize) -> Result<usize, DecodingError> {
        self.read_usize_at(offset)
    }

    /// Reads a length-prefixed byte string whose length word sits at `offset`.
    ///
    /// Only the declared bytes are returned; the right padding is neither
    /// required nor inspected here (see [`Scope::read_padding`]).
    pub fn read_dynamic_bytes(&self, offset: usize) -> Result<Bytes, DecodingError> {
        let len = self.read_length(offset)?;
        let data = offset
            .checked_add(WORD_SIZE)
            .ok_or_else(|| self.out_of_range(usize::MAX, len))?;
        let (start, end) = self.range(data, len)?;
        log::trace!("dynamic bytes at {start}, {len} bytes");
        Ok(self.buf.slice(start..end))
    }

    /// Returns the padding that follows `len` content bytes whose length word
    /// sits at `offset`.
    pub fn read_padding(&self, offset: usize, len: usize) -> Result<&'a [u8], DecodingError> {
        let padded = align_up(len).ok_or_else(|| self.out_of_range(usize::MAX, len))?;
        let rel = offset
            .checked_add(WORD_SIZE)
            .and_then(|data| data.checked_add(len))
            .ok_or_else(|| self.out_of_range(usize::MAX, padded - len))?;
        let (start, end) = self.range(rel, padded - len)?;
        let buf: &'a [u8] = self.buf.as_ref();
        Ok(&buf[start..end])
    }

    /// Opens the scope that starts `offset` bytes into this one.
    pub fn nested(&self, offset: usize) -> Result<Scope<'a>, DecodingError> {
        let base = self
            .base
            .checked_add(offset)
            .ok_or_else(|| self.out_of_range(self.base, offset))?;
        if base > self.buf.len() {
            return Err(self.out_of_range(base, 0));
        }
        log::trace!("enter scope at {base} (offset {offset} from {})", self.base);
        Ok(Scope {
            buf: self.buf,
            base,
        })
    }

    /// Bytes between the start of this scope and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.base)
    }

    /// Fails unless `words` whole words fit between the start of this scope
    /// and the end of the buffer.
    pub fn ensure_words(&self, words: usize) -> Result<(), DecodingError> {
        let len = words
            .checked_mul(WORD_SIZE)
            .ok_or_else(|| self.out_of_range(self.base, usize::MAX))?;
        self.range(0, len).map(|_| ())
    }
}
