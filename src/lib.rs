//! rbencode - strict, canonical bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files, tracker
//! responses and DHT messages.
//!
//! The decoder only accepts canonical input, so every valid byte string maps to
//! exactly one [`Value`] and every `Value` encodes to exactly one byte string.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbencode::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a list
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Decode a dictionary
//! let value = decode(b"d3:foo3:bare").unwrap();
//! let foo = value.get(b"foo").unwrap();
//! assert_eq!(foo.as_str(), Some("bar"));
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use rbencode::{encode, serialized_size, Value};
//!
//! let torrent = Value::dict([
//!     ("announce", Value::string("http://tracker.example.com/announce")),
//!     (
//!         "info",
//!         Value::dict([
//!             ("name", Value::string("example.txt")),
//!             ("length", Value::Integer(1024)),
//!             ("piece length", Value::Integer(16384)),
//!         ]),
//!     ),
//! ]);
//!
//! let encoded = encode(&torrent);
//! assert_eq!(encoded.len(), serialized_size(&torrent));
//! assert!(encoded.starts_with(b"d8:announce"));
//! ```
//!
//! ## Limiting untrusted input
//!
//! ```
//! use rbencode::{BencodeError, DecodeOptions, Decoder};
//!
//! let decoder = Decoder::new(
//!     DecodeOptions::default()
//!         .with_max_depth(16)
//!         .with_max_size(1 << 20),
//! );
//! let err = decoder.decode(b"100000000:truncated").unwrap_err();
//! assert!(matches!(err, BencodeError::SizeLimitExceeded(_)));
//! ```
//!
//! # Error Handling
//!
//! Decoding is fail-fast and never returns a partial value. Failures include:
//!
//! - [`BencodeError::EarlyEnd`] - Input ended unexpectedly
//! - [`BencodeError::ExpectingInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::IntegerOverflow`] - Integer does not fit in 64 bits
//! - [`BencodeError::KeyOrderViolation`] - Dictionary keys unsorted or repeated
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod constants;
pub mod decode;
mod encode;
mod error;
mod path;
mod value;

pub use decode::{
    decode, decode_bytes, decode_iter, decode_reader, DecodeOptions, Decoder,
};
pub use encode::{encode, encode_into, encode_to_writer, serialized_size};
pub use error::BencodeError;
pub use path::{PathLookup, PathStep};
pub use value::{Dict, Value, ValueKind};
