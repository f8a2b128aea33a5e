use zerocopy::byteorder::{self, BigEndian};

use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::float64_to_float32, primitive::fixed,
};

/// `float`: 4-byte IEEE-754.
///
/// Accepts `f32`, and `f64` values that are exactly representable as `f32`.
#[derive(Clone, Debug)]
pub struct FloatCodec {
    data_type: DataType,
}

impl FloatCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Float,
        }
    }
}

fn to_f32(source: Visit<'_>) -> Result<f32> {
    match source {
        Visit::F32(v) => Ok(v),
        Visit::F64(v) => float64_to_float32(v),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

fn from_f32(value: f32, dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::F32(d) => *d = value,
        VisitMut::F64(d) => *d = value as f64,
        VisitMut::Value(d) => *d = Value::Float(value),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

impl Codec for FloatCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let value = to_f32(source)?;
        Ok(Some(byteorder::F32::<BigEndian>::new(value).to_bytes().to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let value = byteorder::F32::<BigEndian>::from_bytes(fixed(source)?).get();
        from_f32(value, dest)
    }
}

/// `double`: 8-byte IEEE-754.
///
/// Decodes into `f32` destinations only when the value is exactly
/// representable.
#[derive(Clone, Debug)]
pub struct DoubleCodec {
    data_type: DataType,
}

impl DoubleCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Double,
        }
    }
}

fn to_f64(source: Visit<'_>) -> Result<f64> {
    match source {
        Visit::F64(v) => Ok(v),
        Visit::F32(v) => Ok(v as f64),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

fn from_f64(value: f64, dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::F64(d) => *d = value,
        VisitMut::F32(d) => *d = float64_to_float32(value)?,
        VisitMut::Value(d) => *d = Value::Double(value),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

impl Codec for DoubleCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let value = to_f64(source)?;
        Ok(Some(byteorder::F64::<BigEndian>::new(value).to_bytes().to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let value = byteorder::F64::<BigEndian>::from_bytes(fixed(source)?).get();
        from_f64(value, dest)
    }
}

pub static FLOAT: FloatCodec = FloatCodec::new();
pub static DOUBLE: DoubleCodec = DoubleCodec::new();
