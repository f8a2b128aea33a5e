use num_bigint::BigInt;

use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::{bigint_to, parse_bigint},
};

/// Writes `value` as a minimal big-endian two's complement byte string.
///
/// Positive values whose top bit would be set get a leading `0x00`;
/// negative values drop a leading `0xff` when the next byte already carries
/// the sign. Zero is a single `0x00`.
///
/// ```
/// use cql_codec::codec::encode_varint;
/// use num_bigint::BigInt;
///
/// assert_eq!(encode_varint(&BigInt::from(0)), [0x00]);
/// assert_eq!(encode_varint(&BigInt::from(128)), [0x00, 0x80]);
/// assert_eq!(encode_varint(&BigInt::from(-128)), [0x80]);
/// assert_eq!(encode_varint(&BigInt::from(-129)), [0xff, 0x7f]);
/// ```
pub fn encode_varint(value: &BigInt) -> Vec<u8> {
    value.to_signed_bytes_be()
}

/// Reads a big-endian two's complement byte string, sign-extending from the
/// top bit of the first byte.
pub fn decode_varint(bytes: &[u8]) -> BigInt {
    BigInt::from_signed_bytes_be(bytes)
}

pub(crate) fn to_bigint(source: Visit<'_>) -> Result<BigInt> {
    Ok(match source {
        Visit::I8(v) => v.into(),
        Visit::I16(v) => v.into(),
        Visit::I32(v) => v.into(),
        Visit::I64(v) => v.into(),
        Visit::Isize(v) => v.into(),
        Visit::U8(v) => v.into(),
        Visit::U16(v) => v.into(),
        Visit::U32(v) => v.into(),
        Visit::U64(v) => v.into(),
        Visit::Usize(v) => v.into(),
        Visit::BigInt(v) => v.clone(),
        Visit::Str(v) => parse_bigint(v)?,
        other => return Err(Error::UnsupportedSource(other.kind())),
    })
}

fn from_bigint(value: BigInt, dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::I8(d) => *d = bigint_to(&value)?,
        VisitMut::I16(d) => *d = bigint_to(&value)?,
        VisitMut::I32(d) => *d = bigint_to(&value)?,
        VisitMut::I64(d) => *d = bigint_to(&value)?,
        VisitMut::Isize(d) => *d = bigint_to(&value)?,
        VisitMut::U8(d) => *d = bigint_to(&value)?,
        VisitMut::U16(d) => *d = bigint_to(&value)?,
        VisitMut::U32(d) => *d = bigint_to(&value)?,
        VisitMut::U64(d) => *d = bigint_to(&value)?,
        VisitMut::Usize(d) => *d = bigint_to(&value)?,
        VisitMut::BigInt(d) => *d = value,
        VisitMut::String(d) => *d = value.to_string(),
        VisitMut::Value(d) => *d = Value::Varint(value),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

/// `varint`: an arbitrary-precision integer.
#[derive(Clone, Debug)]
pub struct VarintCodec {
    data_type: DataType,
}

impl VarintCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Varint,
        }
    }
}

impl Codec for VarintCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        to_bigint(source).map(|value| Some(encode_varint(&value)))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        from_bigint(decode_varint(source), dest)
    }
}

pub static VARINT: VarintCodec = VarintCodec::new();
