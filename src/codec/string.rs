use crate::{Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut};

use super::blob::to_bytes;

/// `ascii` and `varchar`: the string's bytes, unframed.
#[derive(Clone, Debug)]
pub struct StringCodec {
    data_type: DataType,
}

impl StringCodec {
    pub const fn ascii() -> Self {
        Self {
            data_type: DataType::Ascii,
        }
    }

    pub const fn varchar() -> Self {
        Self {
            data_type: DataType::Varchar,
        }
    }
}

impl Codec for StringCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        to_bytes(source).map(|bytes| Some(bytes.to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::String(d) => {
                d.clear();
                d.push_str(std::str::from_utf8(source)?);
            }
            VisitMut::Bytes(d) => {
                d.clear();
                d.extend_from_slice(source);
            }
            VisitMut::Value(d) => *d = Value::Varchar(std::str::from_utf8(source)?.to_string()),
            other => return Err(Error::UnsupportedDestination(other.kind())),
        }
        Ok(())
    }
}

pub static ASCII: StringCodec = StringCodec::ascii();
pub static VARCHAR: StringCodec = StringCodec::varchar();
