use std::io::{self, Write};

use super::value::Value;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// Encoding cannot fail, and the output buffer is allocated exactly once
/// with the size reported by [`serialized_size`].
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// // Encode an integer
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
///
/// // Encode a string
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// // Encode a list
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf);
    buf
}

/// Appends the encoding of `value` to `buf`, growing it at most once.
///
/// # Examples
///
/// ```
/// use rbencode::{encode_into, Value};
///
/// let mut buf = b"prefix:".to_vec();
/// encode_into(&Value::Integer(-7), &mut buf);
/// assert_eq!(buf, b"prefix:i-7e");
/// ```
pub fn encode_into(value: &Value, buf: &mut Vec<u8>) {
    buf.reserve_exact(serialized_size(value));
    encode_value(value, buf);
}

/// Writes the encoding of `value` to `writer`.
///
/// Only errors reported by the writer itself are returned.
pub fn encode_to_writer<W: Write>(value: &Value, mut writer: W) -> io::Result<()> {
    write_value(value, &mut writer)?;
    writer.flush()
}

/// Returns the exact number of bytes [`encode`] would produce, without
/// encoding anything.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, encode, serialized_size};
///
/// let value = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
/// assert_eq!(serialized_size(&value), encode(&value).len());
/// ```
pub fn serialized_size(value: &Value) -> usize {
    match value {
        Value::Integer(i) => 2 + integer_len(*i),
        Value::Bytes(b) => string_len(b.len()),
        Value::List(l) => 2 + l.iter().map(serialized_size).sum::<usize>(),
        Value::Dict(d) => {
            2 + d
                .iter()
                .map(|(key, val)| string_len(key.len()) + serialized_size(val))
                .sum::<usize>()
        }
    }
}

impl Value {
    /// Encodes this value. Same as [`encode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    /// Size of this value's encoding. Same as [`serialized_size`].
    pub fn encoded_len(&self) -> usize {
        serialized_size(self)
    }
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Integer(i) => {
            buf.push(b'i');
            push_integer(buf, *i);
            buf.push(b'e');
        }
        Value::Bytes(b) => push_string(buf, b),
        Value::List(l) => {
            buf.push(b'l');
            for item in l {
                encode_value(item, buf);
            }
            buf.push(b'e');
        }
        Value::Dict(d) => {
            buf.push(b'd');
            for (key, val) in d {
                push_string(buf, key);
                encode_value(val, buf);
            }
            buf.push(b'e');
        }
    }
}

fn write_value<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    match value {
        Value::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Value::Bytes(b) => {
            write!(writer, "{}:", b.len())?;
            writer.write_all(b)?;
        }
        Value::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                write_value(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(d) => {
            writer.write_all(b"d")?;
            for (key, val) in d {
                write!(writer, "{}:", key.len())?;
                writer.write_all(key)?;
                write_value(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn push_string(buf: &mut Vec<u8>, s: &[u8]) {
    push_unsigned(buf, s.len() as u64);
    buf.push(b':');
    buf.extend_from_slice(s);
}

fn push_integer(buf: &mut Vec<u8>, i: i64) {
    if i < 0 {
        buf.push(b'-');
    }
    push_unsigned(buf, i.unsigned_abs());
}

fn push_unsigned(buf: &mut Vec<u8>, mut n: u64) {
    // u64::MAX has 20 digits.
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.extend_from_slice(&digits[start..]);
}

fn string_len(len: usize) -> usize {
    digit_count(len as u64) + 1 + len
}

fn integer_len(i: i64) -> usize {
    usize::from(i < 0) + digit_count(i.unsigned_abs())
}

fn digit_count(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
