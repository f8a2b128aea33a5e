//! Low-level readers and writers for the native protocol notations.
//!
//! These are the building blocks the codecs share: big-endian `[int]` and
//! `[short]`, length-prefixed `[bytes]` and `[short bytes]`, Cassandra's
//! variable-length integers, and the version-dependent collection framing.
//!
//! Readers take `&mut &[u8]` and advance the slice past what they consumed.
//!
//! ```
//! use cql_codec::primitive::{read_bytes, write_bytes};
//!
//! let mut buf = Vec::new();
//! write_bytes(&mut buf, Some(b"abc")).unwrap();
//! write_bytes(&mut buf, None).unwrap();
//! assert_eq!(buf, [0, 0, 0, 3, b'a', b'b', b'c', 0xff, 0xff, 0xff, 0xff]);
//!
//! let mut source = buf.as_slice();
//! assert_eq!(read_bytes(&mut source).unwrap(), Some(&b"abc"[..]));
//! assert_eq!(read_bytes(&mut source).unwrap(), None);
//! assert!(source.is_empty());
//! ```

use zerocopy::byteorder::{self, BigEndian};

use crate::{Error, ProtocolVersion, Result};

fn take<'a>(source: &mut &'a [u8], what: &'static str, len: usize) -> Result<&'a [u8]> {
    if source.len() < len {
        return Err(Error::UnexpectedEof {
            what,
            expected: len,
            remaining: source.len(),
        });
    }
    let (head, tail) = source.split_at(len);
    *source = tail;
    Ok(head)
}

fn take_array<const N: usize>(source: &mut &[u8], what: &'static str) -> Result<[u8; N]> {
    let head = take(source, what, N)?;
    let mut array = [0u8; N];
    array.copy_from_slice(head);
    Ok(array)
}

/// Copies an exactly-`N`-byte value out of `bytes`.
pub(crate) fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(bytes).map_err(|_| Error::WrongFixedLength {
        expected: N,
        actual: bytes.len(),
    })
}

#[inline]
pub fn write_int(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&byteorder::I32::<BigEndian>::new(value).to_bytes());
}

#[inline]
pub fn read_int(source: &mut &[u8]) -> Result<i32> {
    let bytes = take_array::<4>(source, "[int]")?;
    Ok(byteorder::I32::<BigEndian>::from_bytes(bytes).get())
}

#[inline]
pub fn write_short(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&byteorder::U16::<BigEndian>::new(value).to_bytes());
}

#[inline]
pub fn read_short(source: &mut &[u8]) -> Result<u16> {
    let bytes = take_array::<2>(source, "[short]")?;
    Ok(byteorder::U16::<BigEndian>::from_bytes(bytes).get())
}

/// Writes `[bytes]`: an `[int]` length followed by the bytes, or `-1` for
/// NULL.
pub fn write_bytes(buf: &mut Vec<u8>, value: Option<&[u8]>) -> Result<()> {
    match value {
        None => write_int(buf, -1),
        Some(bytes) => {
            let len = i32::try_from(bytes.len())
                .map_err(|_| Error::CollectionTooLarge(bytes.len()))?;
            write_int(buf, len);
            buf.extend_from_slice(bytes);
        }
    }
    Ok(())
}

/// Reads `[bytes]`. Any negative length is NULL.
pub fn read_bytes<'a>(source: &mut &'a [u8]) -> Result<Option<&'a [u8]>> {
    let len = read_int(source)?;
    if len < 0 {
        return Ok(None);
    }
    take(source, "[bytes]", len as usize).map(Some)
}

/// Writes `[short bytes]`: a `[short]` length followed by the bytes.
pub fn write_short_bytes(buf: &mut Vec<u8>, value: &[u8]) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| Error::CollectionTooLarge(value.len()))?;
    write_short(buf, len);
    buf.extend_from_slice(value);
    Ok(())
}

pub fn read_short_bytes<'a>(source: &mut &'a [u8]) -> Result<&'a [u8]> {
    let len = read_short(source)?;
    take(source, "[short bytes]", len as usize)
}

/// Number of bytes the unsigned vint encoding of `value` takes (1 to 9).
#[inline]
pub const fn unsigned_vint_size(value: u64) -> usize {
    ((639 - (value | 1).leading_zeros() * 9) >> 6) as usize
}

/// Writes Cassandra's unsigned variable-length integer.
///
/// The number of leading one bits in the first byte is the number of extra
/// bytes that follow; the remaining bits of the first byte are the most
/// significant bits of the value.
pub fn write_unsigned_vint(buf: &mut Vec<u8>, value: u64) {
    let size = unsigned_vint_size(value);
    let bytes = value.to_be_bytes();
    if size == 9 {
        buf.push(0xff);
        buf.extend_from_slice(&bytes);
        return;
    }
    let extra = (size - 1) as u32;
    let start = buf.len();
    buf.extend_from_slice(&bytes[8 - size..]);
    buf[start] |= !((0xff_u32 >> extra) as u8);
}

pub fn read_unsigned_vint(source: &mut &[u8]) -> Result<u64> {
    let [first] = take_array::<1>(source, "vint")?;
    let extra = (!first).leading_zeros();
    if extra == 0 {
        return Ok(first as u64);
    }
    let mut value = (first as u32 & (0xff_u32 >> extra)) as u64;
    for byte in take(source, "vint", extra as usize)? {
        value = (value << 8) | *byte as u64;
    }
    Ok(value)
}

#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    (value >> 1) as i64 ^ -((value & 1) as i64)
}

/// Writes a signed vint: zigzag, then the unsigned encoding.
pub fn write_vint(buf: &mut Vec<u8>, value: i64) {
    write_unsigned_vint(buf, zigzag_encode(value));
}

pub fn read_vint(source: &mut &[u8]) -> Result<i64> {
    read_unsigned_vint(source).map(zigzag_decode)
}

/// Writes the element count of a collection: `[short]` in v2, `[int]` after.
pub fn write_collection_size(
    buf: &mut Vec<u8>,
    len: usize,
    version: ProtocolVersion,
) -> Result<()> {
    if version.uses_4_byte_collection_length() {
        write_int(buf, i32::try_from(len).map_err(|_| Error::CollectionTooLarge(len))?);
    } else {
        write_short(buf, u16::try_from(len).map_err(|_| Error::CollectionTooLarge(len))?);
    }
    Ok(())
}

pub fn read_collection_size(source: &mut &[u8], version: ProtocolVersion) -> Result<usize> {
    if version.uses_4_byte_collection_length() {
        let size = read_int(source)?;
        usize::try_from(size).map_err(|_| Error::InvalidSize(size as i64))
    } else {
        Ok(read_short(source)? as usize)
    }
}

/// Rejects an element count that cannot fit in `remaining` bytes.
///
/// Every element is framed by at least its length prefix, so `len` entries of
/// `frames` elements each need `len * frames` prefixes. Checked before any
/// destination is sized from `len`.
pub fn check_collection_size(
    len: usize,
    frames: usize,
    remaining: usize,
    version: ProtocolVersion,
) -> Result<()> {
    let prefix = if version.uses_4_byte_collection_length() { 4 } else { 2 };
    let expected = len.saturating_mul(frames).saturating_mul(prefix);
    if expected > remaining {
        return Err(Error::UnexpectedEof {
            what: "collection",
            expected,
            remaining,
        });
    }
    Ok(())
}

/// Writes one collection element: `[short bytes]` in v2, `[bytes]` after.
///
/// Protocol v2 has no NULL element, so `None` is rejected there.
pub fn write_collection_element(
    buf: &mut Vec<u8>,
    value: Option<&[u8]>,
    version: ProtocolVersion,
) -> Result<()> {
    if version.uses_4_byte_collection_length() {
        return write_bytes(buf, value);
    }
    match value {
        Some(bytes) => write_short_bytes(buf, bytes),
        None => Err(Error::DataTypeNotSupported {
            data_type: "null collection element".to_string(),
            version,
        }),
    }
}

pub fn read_collection_element<'a>(
    source: &mut &'a [u8],
    version: ProtocolVersion,
) -> Result<Option<&'a [u8]>> {
    if version.uses_4_byte_collection_length() {
        read_bytes(source)
    } else {
        read_short_bytes(source).map(Some)
    }
}
