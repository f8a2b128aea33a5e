use std::{collections::BTreeMap, sync::Arc};

use tracing::trace;

use crate::{
    Codec, DataType, Error, KeyValueExtractor, KeyValueInjector, MapInjector, Operation,
    ProtocolVersion, Result, Value, Visit, VisitMut,
    codec::VARCHAR,
    primitive::{read_bytes, write_bytes},
};

/// User-defined types: each field as `[bytes]`, in declaration order.
///
/// Encodes from records, matched by field name, and from maps keyed by
/// field name, where a missing key encodes as NULL. Decodes into records
/// and maps keyed by field name; [`Value`] destinations receive
/// [`Value::Udt`].
///
/// A value may end before its last fields. Those fields decode as NULL.
#[derive(Debug)]
pub struct UdtCodec {
    data_type: DataType,
    fields: Vec<(String, Arc<dyn Codec>)>,
}

impl UdtCodec {
    pub fn new(
        keyspace: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<(String, Arc<dyn Codec>)>,
    ) -> Self {
        let data_type = DataType::udt(
            keyspace,
            name,
            fields
                .iter()
                .map(|(field, codec)| (field.clone(), codec.data_type().clone())),
        );
        Self { data_type, fields }
    }

    pub fn fields(&self) -> &[(String, Arc<dyn Codec>)] {
        &self.fields
    }

    fn encode_fields(
        &self,
        extractor: &dyn KeyValueExtractor,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>> {
        trace!(data_type = %self.data_type, "encoding user-defined type");
        let mut buf = Vec::new();
        for (index, (name, codec)) in self.fields.iter().enumerate() {
            let wrap = |err: Error| err.in_field(Operation::Encode, name);
            let field = extractor.get_elem(index, Some(name.as_str())).map_err(wrap)?;
            let bytes = codec.encode(field, version).map_err(wrap)?;
            write_bytes(&mut buf, bytes.as_deref()).map_err(wrap)?;
        }
        Ok(buf)
    }

    // `keyed` destinations are maps and take each field name as an entry key.
    fn decode_fields(
        &self,
        source: &[u8],
        injector: &mut dyn KeyValueInjector,
        keyed: bool,
        version: ProtocolVersion,
    ) -> Result<()> {
        trace!(data_type = %self.data_type, "decoding user-defined type");
        injector.resize(self.fields.len())?;
        let mut rest = source;
        for (index, (name, codec)) in self.fields.iter().enumerate() {
            let wrap = |err: Error| err.in_field(Operation::Decode, name);
            let field = match rest {
                [] => None,
                _ => read_bytes(&mut rest).map_err(wrap)?,
            };
            if keyed {
                let key = injector.zero_key(index).map_err(wrap)?;
                VARCHAR
                    .decode(Some(name.as_bytes()), key, version)
                    .map_err(wrap)?;
            }
            let slot = injector.zero_elem(index, Some(name.as_str())).map_err(wrap)?;
            let was_null = codec.decode(field, slot, version).map_err(wrap)?;
            injector
                .set_elem(index, Some(name.as_str()), false, was_null)
                .map_err(wrap)?;
        }
        if !rest.is_empty() {
            return Err(Error::BytesRemaining(rest.len()));
        }
        Ok(())
    }
}

impl Codec for UdtCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        match source {
            Visit::Record(extractor) | Visit::Map(extractor) => {
                self.encode_fields(&*extractor, version).map(Some)
            }
            other => Err(Error::UnsupportedSource(other.kind())),
        }
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::Record(mut injector) => {
                self.decode_fields(source, &mut *injector, false, version)
            }
            VisitMut::Map(mut injector) => self.decode_fields(source, &mut *injector, true, version),
            VisitMut::Value(value) => {
                let mut fields: BTreeMap<String, Value> = BTreeMap::new();
                let mut injector = MapInjector::<_, String, Value>::new(&mut fields);
                self.decode_fields(source, &mut injector, true, version)?;
                *value = Value::Udt(fields);
                Ok(())
            }
            other => Err(Error::UnsupportedDestination(other.kind())),
        }
    }
}
