//! Strict bencode decoding.
//!
//! One recursive-descent parser, written against [`Source`], serves every
//! input shape: borrowed slices, shared [`Bytes`], byte iterators and
//! readers. The parser only accepts canonical encodings.

mod source;

pub use source::{BytesSource, IterSource, ReaderSource, SliceSource, Source};

use std::io::{BufReader, Read};

use bytes::Bytes;

use crate::constants::{
    DEFAULT_MAX_DEPTH, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START, MINUS,
};
use crate::error::BencodeError;
use crate::value::{Dict, Value};

/// Limits applied while decoding.
///
/// # Examples
///
/// ```
/// use rbencode::{BencodeError, DecodeOptions, Decoder};
///
/// let decoder = Decoder::new(DecodeOptions::default().with_max_depth(1));
/// assert!(decoder.decode(b"li1ee").is_ok());
/// assert!(matches!(
///     decoder.decode(b"lli1eee"),
///     Err(BencodeError::NestingTooDeep(1))
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested containers. The root container counts as one.
    pub max_depth: usize,
    /// Maximum number of input bytes a single value may span.
    pub max_size: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: None,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

/// A configured bencode decoder.
///
/// The free functions [`decode`], [`decode_bytes`], [`decode_iter`] and
/// [`decode_reader`] use a decoder with [`DecodeOptions::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes exactly one value from a byte slice.
    pub fn decode(&self, data: &[u8]) -> Result<Value, BencodeError> {
        self.decode_source(SliceSource::new(data))
    }

    /// Decodes exactly one value from shared bytes without copying byte strings.
    pub fn decode_bytes(&self, data: Bytes) -> Result<Value, BencodeError> {
        self.decode_source(BytesSource::new(data))
    }

    /// Decodes exactly one value from a byte iterator, which must be
    /// exhausted by the value.
    pub fn decode_iter<I>(&self, iter: I) -> Result<Value, BencodeError>
    where
        I: IntoIterator<Item = u8>,
    {
        self.decode_source(IterSource::new(iter.into_iter()))
    }

    /// Decodes exactly one value from a reader, which must reach end of
    /// stream right after the value.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Value, BencodeError> {
        self.decode_source(ReaderSource::new(BufReader::new(reader)))
    }

    /// Decodes exactly one value from any [`Source`].
    pub fn decode_source<S: Source>(&self, source: S) -> Result<Value, BencodeError> {
        let mut parser = Parser::new(source, &self.options);
        let result = parser.parse_root();
        log_outcome(&result, parser.source.position());
        result
    }

    /// Decodes one value from the start of `data` and returns it together
    /// with the number of bytes it occupied. Anything after the value is
    /// left alone.
    ///
    /// Useful for messages that append raw payload after a bencoded header,
    /// such as BEP-9 metadata pieces.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Decoder;
    ///
    /// let msg = b"d8:msg_typei1e5:piecei0eeRAW";
    /// let (header, used) = Decoder::default().decode_prefix(msg).unwrap();
    /// assert_eq!(header.get(b"piece").and_then(|v| v.as_integer()), Some(0));
    /// assert_eq!(&msg[used..], b"RAW");
    /// ```
    pub fn decode_prefix(&self, data: &[u8]) -> Result<(Value, usize), BencodeError> {
        let mut parser = Parser::new(SliceSource::new(data), &self.options);
        let result = parser.parse_value(0);
        let position = parser.source.position();
        log_outcome(&result, position);
        result.map(|value| (value, position))
    }
}

fn log_outcome(result: &Result<Value, BencodeError>, position: usize) {
    match result {
        Ok(_) => tracing::trace!("Decoded bencode value spanning {} bytes", position),
        Err(e) => tracing::trace!("Bencode decode failed at byte {}: {}", position, e),
    }
}

/// Decodes a bencode value from a byte slice.
///
/// The input must contain exactly one value; trailing bytes are an error.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, BencodeError, Value};
///
/// assert_eq!(decode(b"4:spam").unwrap(), Value::string("spam"));
/// assert_eq!(decode(b"i3e").unwrap(), Value::Integer(3));
/// assert!(matches!(decode(b"i1ei2e"), Err(BencodeError::TrailingData)));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::default().decode(data)
}

/// Decodes a bencode value from shared bytes. Decoded byte strings borrow
/// the input's storage instead of copying it.
pub fn decode_bytes(data: Bytes) -> Result<Value, BencodeError> {
    Decoder::default().decode_bytes(data)
}

/// Decodes a bencode value from a byte iterator.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_iter, Value};
///
/// let input = b"li1ei2ee".to_vec();
/// let value = decode_iter(input).unwrap();
/// assert_eq!(value, Value::list([Value::Integer(1), Value::Integer(2)]));
/// ```
pub fn decode_iter<I>(iter: I) -> Result<Value, BencodeError>
where
    I: IntoIterator<Item = u8>,
{
    Decoder::default().decode_iter(iter)
}

/// Decodes a bencode value from a reader.
///
/// Read errors are reported as [`BencodeError::Io`].
///
/// # Examples
///
/// ```
/// use rbencode::decode_reader;
///
/// let value = decode_reader(&b"d3:cow3:mooe"[..]).unwrap();
/// assert_eq!(value.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
/// ```
pub fn decode_reader<R: Read>(reader: R) -> Result<Value, BencodeError> {
    Decoder::default().decode_reader(reader)
}

struct Parser<'o, S> {
    source: S,
    options: &'o DecodeOptions,
}

impl<'o, S: Source> Parser<'o, S> {
    fn new(source: S, options: &'o DecodeOptions) -> Self {
        Self { source, options }
    }

    fn parse_root(&mut self) -> Result<Value, BencodeError> {
        let value = self.parse_value(0)?;

        if self.source.peek()?.is_some() {
            return Err(BencodeError::TrailingData);
        }

        Ok(value)
    }

    /// `depth` is the number of containers enclosing this value.
    fn parse_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        match self.source.peek()? {
            None => Err(BencodeError::EarlyEnd),
            Some(INTEGER_START) => {
                self.advance()?;
                self.parse_number(END).map(Value::Integer)
            }
            Some(LIST_START) => self.parse_list(depth + 1),
            Some(DICT_START) => self.parse_dict(depth + 1),
            Some(b'0'..=b'9') => self.parse_bytes().map(Value::Bytes),
            Some(END) => Err(BencodeError::ExpectingValue),
            Some(c) => Err(BencodeError::UnknownValueTag(c)),
        }
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.enter(depth)?;
        self.advance()?;
        let mut list = Vec::new();

        loop {
            match self.source.peek()? {
                None => return Err(BencodeError::EarlyEnd),
                Some(END) => break,
                Some(_) => list.push(self.parse_value(depth)?),
            }
        }

        self.advance()?;
        Ok(Value::List(list))
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.enter(depth)?;
        self.advance()?;
        let mut dict = Dict::new();

        loop {
            match self.source.peek()? {
                None => return Err(BencodeError::EarlyEnd),
                Some(END) => break,
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(BencodeError::ExpectingValue),
            }

            // Keys arrive in ascending order, so the map's last key is the previous one.
            let key = self.parse_bytes()?;
            if let Some((prev, _)) = dict.last_key_value() {
                if key <= *prev {
                    return Err(BencodeError::KeyOrderViolation);
                }
            }

            let value = self.parse_value(depth)?;
            dict.insert(key, value);
        }

        self.advance()?;
        Ok(Value::Dict(dict))
    }

    fn parse_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let len = self.parse_number(LENGTH_SEPARATOR)?;
        let len = usize::try_from(len).map_err(|_| BencodeError::IntegerOverflow)?;
        self.check_size(len)?;
        self.source.take(len)
    }

    /// Reads `-?[0-9]+` up to and including `terminator`.
    ///
    /// Only `0` may start with a zero, and `-0` is rejected. Digits are
    /// accumulated towards the sign so that `i64::MIN` is representable.
    fn parse_number(&mut self, terminator: u8) -> Result<i64, BencodeError> {
        let negative = if self.source.peek()? == Some(MINUS) {
            self.advance()?;
            true
        } else {
            false
        };

        let first = self.next_required()?;
        let mut acc = match first {
            b'0' if negative => return Err(BencodeError::ExpectingInteger),
            b'0' => {
                return if self.next_required()? == terminator {
                    Ok(0)
                } else {
                    Err(BencodeError::ExpectingInteger)
                };
            }
            b'1'..=b'9' => {
                let digit = i64::from(first - b'0');
                if negative {
                    -digit
                } else {
                    digit
                }
            }
            _ => return Err(BencodeError::ExpectingInteger),
        };

        loop {
            match self.next_required()? {
                b @ b'0'..=b'9' => {
                    let digit = i64::from(b - b'0');
                    acc = acc
                        .checked_mul(10)
                        .and_then(|a| {
                            if negative {
                                a.checked_sub(digit)
                            } else {
                                a.checked_add(digit)
                            }
                        })
                        .ok_or(BencodeError::IntegerOverflow)?;
                }
                b if b == terminator => return Ok(acc),
                _ => return Err(BencodeError::ExpectingInteger),
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<(), BencodeError> {
        if depth > self.options.max_depth {
            tracing::debug!(
                "Bencode nesting limit of {} reached at byte {}",
                self.options.max_depth,
                self.source.position()
            );
            return Err(BencodeError::NestingTooDeep(self.options.max_depth));
        }
        Ok(())
    }

    /// Checks that consuming `len` more bytes stays within `max_size`.
    fn check_size(&self, len: usize) -> Result<(), BencodeError> {
        if let Some(limit) = self.options.max_size {
            let end = self.source.position().saturating_add(len);
            if end > limit {
                tracing::debug!(
                    "Bencode size limit of {} bytes exceeded ({} requested)",
                    limit,
                    end
                );
                return Err(BencodeError::SizeLimitExceeded(limit));
            }
        }
        Ok(())
    }

    fn next_required(&mut self) -> Result<u8, BencodeError> {
        let byte = self.source.next_byte()?.ok_or(BencodeError::EarlyEnd)?;
        self.check_size(0)?;
        Ok(byte)
    }

    /// Consumes a byte already seen through `peek`.
    fn advance(&mut self) -> Result<(), BencodeError> {
        self.next_required().map(|_| ())
    }
}
