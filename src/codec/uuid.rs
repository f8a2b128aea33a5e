use uuid::Uuid;

use crate::{Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut, primitive::fixed};

/// `uuid` and `timeuuid`: 16 raw bytes.
///
/// Wire input and byte-slice sources must be exactly 16 bytes. Fixed-size
/// byte array destinations are filled leniently: a shorter array takes the
/// leading bytes, a longer one is zero padded.
#[derive(Clone, Debug)]
pub struct UuidCodec {
    data_type: DataType,
}

impl UuidCodec {
    pub const fn uuid() -> Self {
        Self {
            data_type: DataType::Uuid,
        }
    }

    pub const fn timeuuid() -> Self {
        Self {
            data_type: DataType::Timeuuid,
        }
    }
}

fn to_uuid(source: Visit<'_>) -> Result<[u8; 16]> {
    match source {
        Visit::Uuid(uuid) => Ok(uuid.into_bytes()),
        Visit::Str(text) => Uuid::parse_str(text)
            .map(Uuid::into_bytes)
            .map_err(|err| Error::cannot_parse(text, err)),
        Visit::Bytes(bytes) => fixed(bytes),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

fn from_uuid(bytes: [u8; 16], dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::Uuid(d) => *d = Uuid::from_bytes(bytes),
        VisitMut::String(d) => *d = Uuid::from_bytes(bytes).hyphenated().to_string(),
        VisitMut::Bytes(d) => *d = bytes.to_vec(),
        VisitMut::FixedBytes(d) => {
            let len = d.len().min(bytes.len());
            d[..len].copy_from_slice(&bytes[..len]);
            d[len..].fill(0);
        }
        VisitMut::Value(d) => *d = Value::Uuid(Uuid::from_bytes(bytes)),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

impl Codec for UuidCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        to_uuid(source).map(|bytes| Some(bytes.to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        from_uuid(fixed(source)?, dest)
    }
}

pub static UUID: UuidCodec = UuidCodec::uuid();
pub static TIMEUUID: UuidCodec = UuidCodec::timeuuid();
