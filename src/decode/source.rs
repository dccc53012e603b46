//! Input shapes the decoder can read from.
//!
//! The grammar only ever needs one byte of lookahead and "give me the next
//! `n` bytes", so every input shape is reduced to the [`Source`] trait and
//! the parser is written once against it.

use std::io::{self, BufRead};
use std::iter::Fuse;

use bytes::Bytes;

use crate::constants::STREAM_CHUNK_SIZE;
use crate::error::BencodeError;

/// A forward-only byte source with one byte of lookahead.
pub trait Source {
    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Result<Option<u8>, BencodeError>;

    /// Consumes and returns the next byte, or `None` at end of input.
    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError>;

    /// Consumes exactly `len` bytes.
    ///
    /// Fails with [`BencodeError::CutOffString`] if the input ends first.
    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;
}

/// A borrowed contiguous buffer. Byte strings are copied out of it.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Source for SliceSource<'_> {
    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        Ok(self.data.get(self.pos).copied())
    }

    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError> {
        let available = self.data.len() - self.pos;
        if len > available {
            return Err(BencodeError::CutOffString {
                declared: len,
                available,
            });
        }
        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// An owned, shared buffer. Byte strings are zero-copy slices of it.
#[derive(Debug)]
pub struct BytesSource {
    data: Bytes,
    pos: usize,
}

impl BytesSource {
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }
}

impl Source for BytesSource {
    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        Ok(self.data.get(self.pos).copied())
    }

    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError> {
        let available = self.data.len() - self.pos;
        if len > available {
            return Err(BencodeError::CutOffString {
                declared: len,
                available,
            });
        }
        let bytes = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Any iterator of bytes.
///
/// The first `None` ends the input; the iterator is never polled past it.
#[derive(Debug)]
pub struct IterSource<I> {
    iter: Fuse<I>,
    peeked: Option<u8>,
    pos: usize,
}

impl<I: Iterator<Item = u8>> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            peeked: None,
            pos: 0,
        }
    }
}

impl<I: Iterator<Item = u8>> Source for IterSource<I> {
    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        Ok(self.peeked)
    }

    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = match self.peeked.take() {
            Some(b) => Some(b),
            None => self.iter.next(),
        };
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError> {
        let mut out = Vec::with_capacity(len.min(STREAM_CHUNK_SIZE));
        while out.len() < len {
            match self.next_byte()? {
                Some(b) => out.push(b),
                None => {
                    return Err(BencodeError::CutOffString {
                        declared: len,
                        available: out.len(),
                    })
                }
            }
        }
        Ok(Bytes::from(out))
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A buffered reader.
///
/// [`io::ErrorKind::Interrupted`] is not treated as a failure: the read is
/// reissued, as `std`'s `read_exact` does. Any other read error is returned
/// at once as [`BencodeError::Io`] with no retry.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pos: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Copies up to `want` buffered bytes into `out`, returning how many
    /// were copied. Zero means end of stream.
    fn read_chunk(&mut self, out: &mut Vec<u8>, want: usize) -> Result<usize, BencodeError> {
        let n = loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    let n = buf.len().min(want);
                    out.extend_from_slice(&buf[..n]);
                    break n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        self.reader.consume(n);
        self.pos += n;
        Ok(n)
    }
}

impl<R: BufRead> Source for ReaderSource<R> {
    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, BencodeError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
            self.pos += 1;
        }
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> Result<Bytes, BencodeError> {
        let mut out = Vec::with_capacity(len.min(STREAM_CHUNK_SIZE));
        while out.len() < len {
            let want = len - out.len();
            if self.read_chunk(&mut out, want)? == 0 {
                return Err(BencodeError::CutOffString {
                    declared: len,
                    available: out.len(),
                });
            }
        }
        Ok(Bytes::from(out))
    }

    fn position(&self) -> usize {
        self.pos
    }
}
