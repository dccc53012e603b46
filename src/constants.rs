//! Codec limits and tuning parameters.
//!
//! The defaults are sized for the data bencode usually carries: `.torrent`
//! files, tracker responses and DHT/extension messages.

// ============================================================================
// Decoder limits
// ============================================================================

/// Default maximum container nesting depth.
///
/// Real torrents and protocol messages stay in single digits; the limit only
/// exists to stop hostile input from exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Size of the chunks used when reading a byte string from a stream.
///
/// A declared length is never trusted for an up-front allocation; the buffer
/// grows as the data actually arrives.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

// ============================================================================
// Wire format
// ============================================================================

pub(crate) const INTEGER_START: u8 = b'i';
pub(crate) const LIST_START: u8 = b'l';
pub(crate) const DICT_START: u8 = b'd';
pub(crate) const END: u8 = b'e';
pub(crate) const LENGTH_SEPARATOR: u8 = b':';
pub(crate) const MINUS: u8 = b'-';
