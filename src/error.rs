use thiserror::Error;

/// Errors produced while decoding bencode.
///
/// Decoding is fail-fast: the first variant raised aborts the whole decode and
/// no partial value is returned.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// Input ended before a required byte or terminator was found. This also
    /// covers input that ends where a value or container terminator is due.
    #[error("bencoded data ends early")]
    EarlyEnd,

    /// A value was required but the next byte cannot start one here
    /// (a container terminator, or a non-string dictionary key).
    #[error("expecting value in bencoded data")]
    ExpectingValue,

    /// Malformed integer or byte string length: leading zero, `-0`, missing
    /// digits, stray sign or wrong terminator.
    #[error("expecting integer in bencoded data")]
    ExpectingInteger,

    /// The integer does not fit in an `i64` (or a length does not fit in `usize`).
    #[error("integer overflow when reading bencoded integer")]
    IntegerOverflow,

    /// A byte string declares more bytes than the input holds.
    #[error("string cut off in bencoded data: declared {declared} bytes, {available} available")]
    CutOffString { declared: usize, available: usize },

    /// Dictionary keys are not strictly ascending, or a key is repeated.
    #[error("keys in bencoded dictionary must be strictly ascending")]
    KeyOrderViolation,

    /// The leading byte matches none of the four value kinds.
    #[error("unknown value tag in bencoded data: {0:#04x}")]
    UnknownValueTag(u8),

    /// Bytes remain after the root value.
    #[error("trailing data after value")]
    TrailingData,

    /// Containers are nested deeper than the configured limit.
    #[error("nesting too deep (limit {0})")]
    NestingTooDeep(usize),

    /// The input is larger than the configured limit.
    #[error("input exceeds size limit of {0} bytes")]
    SizeLimitExceeded(usize),

    /// The underlying stream failed while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
