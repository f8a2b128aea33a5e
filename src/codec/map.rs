use std::sync::Arc;

use tracing::trace;

use crate::{
    Codec, DataType, Error, KeyValueExtractor, KeyValueInjector, MapInjector, Operation,
    ProtocolVersion, Result, Value, Visit, VisitMut,
    primitive::{
        check_collection_size, read_collection_element, read_collection_size,
        write_collection_element, write_collection_size,
    },
};

/// `map`: an entry count followed by each key and value, length-prefixed.
///
/// Encodes from any map or record and decodes into any map or record.
/// Neither keys nor values may be NULL on encode.
#[derive(Debug)]
pub struct MapCodec {
    data_type: DataType,
    key: Arc<dyn Codec>,
    value: Arc<dyn Codec>,
}

impl MapCodec {
    pub fn new(key: Arc<dyn Codec>, value: Arc<dyn Codec>) -> Self {
        Self {
            data_type: DataType::map(key.data_type().clone(), value.data_type().clone()),
            key,
            value,
        }
    }

    pub fn key(&self) -> &Arc<dyn Codec> {
        &self.key
    }

    pub fn value(&self) -> &Arc<dyn Codec> {
        &self.value
    }

    fn encode_entries(
        &self,
        extractor: &dyn KeyValueExtractor,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>> {
        let len = extractor.len();
        trace!(data_type = %self.data_type, entries = len, "encoding map");
        let mut buf = Vec::new();
        write_collection_size(&mut buf, len, version)?;
        for index in 0..len {
            let key = extractor
                .get_key(index)
                .map_err(|err| err.in_map_key(Operation::Encode, index))?;
            if key.is_null() {
                return Err(Error::NilMapKey(index));
            }
            let key = self
                .key
                .encode(key, version)
                .map_err(|err| err.in_map_key(Operation::Encode, index))?
                .ok_or(Error::NilMapKey(index))?;
            let value = extractor
                .get_elem(index, None)
                .map_err(|err| err.in_map_value(Operation::Encode, index))?;
            if value.is_null() {
                return Err(Error::NilMapValue(index));
            }
            let value = self
                .value
                .encode(value, version)
                .map_err(|err| err.in_map_value(Operation::Encode, index))?
                .ok_or(Error::NilMapValue(index))?;
            write_collection_element(&mut buf, Some(&key), version)?;
            write_collection_element(&mut buf, Some(&value), version)?;
        }
        Ok(buf)
    }

    fn decode_entries(
        &self,
        source: &[u8],
        injector: &mut dyn KeyValueInjector,
        version: ProtocolVersion,
    ) -> Result<()> {
        let mut rest = source;
        let len = read_collection_size(&mut rest, version)?;
        check_collection_size(len, 2, rest.len(), version)?;
        trace!(data_type = %self.data_type, entries = len, "decoding map");
        injector.resize(len)?;
        for index in 0..len {
            let key_error = |err: Error| err.in_map_key(Operation::Decode, index);
            let value_error = |err: Error| err.in_map_value(Operation::Decode, index);

            let key = read_collection_element(&mut rest, version).map_err(key_error)?;
            let value = read_collection_element(&mut rest, version).map_err(value_error)?;

            let slot = injector.zero_key(index).map_err(key_error)?;
            let key_was_null = self.key.decode(key, slot, version).map_err(key_error)?;
            let slot = injector.zero_elem(index, None).map_err(value_error)?;
            let value_was_null = self.value.decode(value, slot, version).map_err(value_error)?;
            injector
                .set_elem(index, None, key_was_null, value_was_null)
                .map_err(value_error)?;
        }
        if !rest.is_empty() {
            return Err(Error::BytesRemaining(rest.len()));
        }
        Ok(())
    }
}

impl Codec for MapCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        match source {
            Visit::Map(extractor) | Visit::Record(extractor) => {
                self.encode_entries(&*extractor, version).map(Some)
            }
            other => Err(Error::UnsupportedSource(other.kind())),
        }
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::Map(mut injector) | VisitMut::Record(mut injector) => {
                self.decode_entries(source, &mut *injector, version)
            }
            VisitMut::Value(value) => {
                let mut entries: Vec<(Value, Value)> = Vec::new();
                let mut injector = MapInjector::<_, Value, Value>::new(&mut entries);
                self.decode_entries(source, &mut injector, version)?;
                *value = Value::Map(entries);
                Ok(())
            }
            other => Err(Error::UnsupportedDestination(other.kind())),
        }
    }
}
