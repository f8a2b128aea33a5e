use std::sync::Arc;

use tracing::trace;

use crate::{
    Codec, DataType, Error, Extractor, Injector, Operation, ProtocolVersion, Result, Value,
    VecInjector, Visit, VisitMut,
    primitive::{read_bytes, write_bytes},
};

/// `tuple<...>`: each element as `[bytes]`, without a count.
///
/// Sources and destinations are sequences (Rust tuples, slices, vectors)
/// or records, read positionally. Their length must match the tuple's
/// arity. Unlike collections, elements may be NULL.
#[derive(Debug)]
pub struct TupleCodec {
    data_type: DataType,
    elements: Vec<Arc<dyn Codec>>,
}

impl TupleCodec {
    pub fn new(elements: Vec<Arc<dyn Codec>>) -> Self {
        Self {
            data_type: DataType::tuple(elements.iter().map(|codec| codec.data_type().clone())),
            elements,
        }
    }

    pub fn elements(&self) -> &[Arc<dyn Codec>] {
        &self.elements
    }

    fn encode_elements<E: Extractor + ?Sized>(
        &self,
        extractor: &E,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>> {
        if extractor.len() != self.elements.len() {
            return Err(Error::WrongElementCount {
                expected: self.elements.len(),
                actual: extractor.len(),
            });
        }
        trace!(data_type = %self.data_type, "encoding tuple");
        let mut buf = Vec::new();
        for (index, codec) in self.elements.iter().enumerate() {
            let wrap = |err: Error| err.in_element(Operation::Encode, index);
            let elem = extractor.get_elem(index, None).map_err(wrap)?;
            let bytes = codec.encode(elem, version).map_err(wrap)?;
            write_bytes(&mut buf, bytes.as_deref()).map_err(wrap)?;
        }
        Ok(buf)
    }

    fn decode_elements<I: Injector + ?Sized>(
        &self,
        source: &[u8],
        injector: &mut I,
        version: ProtocolVersion,
    ) -> Result<()> {
        trace!(data_type = %self.data_type, "decoding tuple");
        let len = self.elements.len();
        match injector.fixed_len() {
            Some(capacity) if capacity != len => {
                return Err(Error::WrongElementCount {
                    expected: capacity,
                    actual: len,
                });
            }
            _ => {}
        }
        injector.resize(len)?;
        let mut rest = source;
        for (index, codec) in self.elements.iter().enumerate() {
            let wrap = |err: Error| err.in_element(Operation::Decode, index);
            let elem = read_bytes(&mut rest).map_err(wrap)?;
            let slot = injector.zero_elem(index, None).map_err(wrap)?;
            let was_null = codec.decode(elem, slot, version).map_err(wrap)?;
            injector.set_elem(index, None, false, was_null).map_err(wrap)?;
        }
        if !rest.is_empty() {
            return Err(Error::BytesRemaining(rest.len()));
        }
        Ok(())
    }
}

impl Codec for TupleCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        match source {
            Visit::Seq(extractor) => self.encode_elements(&*extractor, version),
            Visit::Record(extractor) => self.encode_elements(&*extractor, version),
            other => Err(Error::UnsupportedSource(other.kind())),
        }
        .map(Some)
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()> {
        match dest {
            VisitMut::Seq(mut injector) => self.decode_elements(source, &mut *injector, version),
            VisitMut::Record(mut injector) => self.decode_elements(source, &mut *injector, version),
            VisitMut::Value(value) => {
                let mut elements: Vec<Value> = Vec::new();
                self.decode_elements(source, &mut VecInjector::new(&mut elements), version)?;
                *value = Value::Tuple(elements);
                Ok(())
            }
            other => Err(Error::UnsupportedDestination(other.kind())),
        }
    }
}
