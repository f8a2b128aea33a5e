use crate::{
    Codec, CqlDecimal, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    primitive::{read_int, write_int},
};

use super::varint::{decode_varint, encode_varint};

/// `decimal`: a 4-byte scale followed by the unscaled value as a varint.
#[derive(Clone, Debug)]
pub struct DecimalCodec {
    data_type: DataType,
}

impl DecimalCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Decimal,
        }
    }
}

impl Codec for DecimalCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let decimal = match source {
            Visit::Decimal(decimal) => decimal,
            other => return Err(Error::UnsupportedSource(other.kind())),
        };
        let mut buf = Vec::with_capacity(8);
        write_int(&mut buf, decimal.scale);
        buf.extend_from_slice(&encode_varint(&decimal.unscaled));
        Ok(Some(buf))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        if source.len() < 5 {
            return Err(Error::WrongMinimumLength {
                expected: 5,
                actual: source.len(),
            });
        }
        let mut rest = source;
        let scale = read_int(&mut rest)?;
        let value = CqlDecimal {
            unscaled: decode_varint(rest),
            scale,
        };
        match dest {
            VisitMut::Decimal(d) => *d = value,
            VisitMut::Value(d) => *d = Value::Decimal(value),
            other => return Err(Error::UnsupportedDestination(other.kind())),
        }
        Ok(())
    }
}

pub static DECIMAL: DecimalCodec = DecimalCodec::new();
