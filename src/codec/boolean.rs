use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut, primitive::fixed,
};

/// `boolean`: one byte, zero is false and anything else is true.
#[derive(Clone, Debug)]
pub struct BooleanCodec {
    data_type: DataType,
}

impl BooleanCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Boolean,
        }
    }
}

impl Codec for BooleanCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        match source {
            Visit::Bool(v) => Ok(Some(vec![v as u8])),
            other => Err(Error::UnsupportedSource(other.kind())),
        }
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let [byte] = fixed::<1>(source)?;
        let value = byte != 0;
        match dest {
            VisitMut::Bool(d) => *d = value,
            VisitMut::Value(d) => *d = Value::Boolean(value),
            other => return Err(Error::UnsupportedDestination(other.kind())),
        }
        Ok(())
    }
}

pub static BOOLEAN: BooleanCodec = BooleanCodec::new();
