use std::sync::Arc;

use tracing::trace;

use crate::{
    Codec, DataType, Error, Extractor, Injector, Operation, ProtocolVersion, Result,
    SliceExtractor, SliceInjector, Value, VecInjector, Visit, VisitMut,
    primitive::{
        check_collection_size, read_collection_element, read_collection_size,
        write_collection_element, write_collection_size,
    },
};

/// `list` and `set`: an element count followed by each element,
/// length-prefixed.
///
/// Any sequence encodes, and decodes into any sequence: `Vec`, arrays,
/// `VecDeque`, `HashSet`, `BTreeSet`. Byte blocks are sequences of `u8`
/// here. Elements may not be NULL on encode.
#[derive(Debug)]
pub struct ListCodec {
    data_type: DataType,
    element: Arc<dyn Codec>,
}

impl ListCodec {
    pub fn list(element: Arc<dyn Codec>) -> Self {
        Self {
            data_type: DataType::list(element.data_type().clone()),
            element,
        }
    }

    pub fn set(element: Arc<dyn Codec>) -> Self {
        Self {
            data_type: DataType::set(element.data_type().clone()),
            element,
        }
    }

    pub fn element(&self) -> &Arc<dyn Codec> {
        &self.element
    }

    fn encode_elements<E: Extractor + ?Sized>(
        &self,
        extractor: &E,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>> {
        let len = extractor.len();
        trace!(data_type = %self.data_type, elements = len, "encoding collection");
        let mut buf = Vec::new();
        write_collection_size(&mut buf, len, version)?;
        for index in 0..len {
            let elem = extractor
                .get_elem(index, None)
                .map_err(|err| err.in_element(Operation::Encode, index))?;
            if elem.is_null() {
                return Err(Error::NilElement(index));
            }
            let bytes = self
                .element
                .encode(elem, version)
                .map_err(|err| err.in_element(Operation::Encode, index))?
                .ok_or(Error::ElementEncodedToNil(index))?;
            write_collection_element(&mut buf, Some(&bytes), version)?;
        }
        Ok(buf)
    }

    fn decode_elements(
        &self,
        source: &[u8],
        injector: &mut dyn Injector,
        version: ProtocolVersion,
    ) -> Result<()> {
        let mut rest = source;
        let len = read_collection_size(&mut rest, version)?;
        check_collection_size(len, 1, rest.len(), version)?;
        trace!(data_type = %self.data_type, elements = len, "decoding collection");
        injector.resize(len)?;
        for index in 0..len {
            let wrap = |err: Error| err.in_element(Operation::Decode, index);
            let elem = read_collection_element(&mut rest, version).map_err(wrap)?;
            let slot = injector.zero_elem(index, None).map_err(wrap)?;
            let was_null = self.element.decode(elem, slot, version).map_err(wrap)?;
            injector.set_elem(index, None, false, was_null).map_err(wrap)?;
        }
        if !rest.is_empty() {
            return Err(Error::BytesRemaining(rest.len()));
        }
        Ok(())
    }
}

impl Codec for ListCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        match source {
            Visit::Seq(extractor) => self.encode_elements(&*extractor, version),
            Visit::Bytes(bytes) => self.encode_elements(&SliceExtractor::new(bytes), version),
            other => Err(Error::UnsupportedSource(other.kind())),
        }
        .map(Some)
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::Seq(mut injector) => self.decode_elements(source, &mut *injector, version),
            VisitMut::Bytes(bytes) => {
                self.decode_elements(source, &mut VecInjector::new(bytes), version)
            }
            VisitMut::FixedBytes(bytes) => {
                self.decode_elements(source, &mut SliceInjector::new(bytes), version)
            }
            VisitMut::Value(value) => {
                let mut elements: Vec<Value> = Vec::new();
                self.decode_elements(source, &mut VecInjector::new(&mut elements), version)?;
                *value = Value::List(elements);
                Ok(())
            }
            other => Err(Error::UnsupportedDestination(other.kind())),
        }
    }
}
