use crate::{Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut};

/// `blob` and custom types: the bytes pass through unchanged.
#[derive(Clone, Debug)]
pub struct BlobCodec {
    data_type: DataType,
}

impl BlobCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Blob,
        }
    }

    /// A pass-through codec for a server-side custom type.
    pub fn custom(class: impl Into<String>) -> Self {
        Self {
            data_type: DataType::Custom(class.into()),
        }
    }
}

pub(crate) fn to_bytes(source: Visit<'_>) -> Result<&[u8]> {
    match source {
        Visit::Bytes(v) => Ok(v),
        Visit::Str(v) => Ok(v.as_bytes()),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

impl Codec for BlobCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        to_bytes(source).map(|bytes| Some(bytes.to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::Bytes(d) => {
                d.clear();
                d.extend_from_slice(source);
            }
            VisitMut::FixedBytes(d) => {
                if d.len() != source.len() {
                    return Err(Error::WrongFixedLength {
                        expected: d.len(),
                        actual: source.len(),
                    });
                }
                d.copy_from_slice(source);
            }
            #[cfg(feature = "bytes")]
            VisitMut::SharedBytes(d) => *d = bytes::Bytes::copy_from_slice(source),
            VisitMut::String(d) => *d = std::str::from_utf8(source)?.to_string(),
            VisitMut::Value(d) => *d = Value::Blob(source.to_vec()),
            other => return Err(Error::UnsupportedDestination(other.kind())),
        }
        Ok(())
    }
}

pub static BLOB: BlobCodec = BlobCodec::new();
