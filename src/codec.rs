//! The [`Codec`] trait and one codec per CQL type.
//!
//! Primitive codecs have a shared instance each (see [`BIGINT`], [`INT`],
//! [`VARCHAR`], ...). Composite codecs own the codecs of their children and
//! are built with [`new_codec`](crate::new_codec).

mod blob;
mod boolean;
mod date;
mod decimal;
mod duration;
mod float;
mod inet;
mod integer;
mod list;
mod map;
mod string;
mod time;
mod timestamp;
mod tuple;
mod udt;
mod uuid;
mod varint;

use std::fmt::Debug;

pub use blob::*;
pub use boolean::*;
pub use date::*;
pub use decimal::*;
pub use duration::*;
pub use float::*;
pub use inet::*;
pub use integer::*;
pub use list::*;
pub use map::*;
pub use string::*;
pub use time::*;
pub use timestamp::*;
pub use tuple::*;
pub use udt::*;
pub use self::uuid::*;
pub use varint::*;

use crate::{DataType, Decodable, Encodable, Error, ProtocolVersion, Result, Visit, VisitMut};

/// Encodes native values to, and decodes them from, the wire form of one
/// CQL type.
///
/// Implementors provide [`Codec::encode_visit`] and [`Codec::decode_visit`]
/// for non-null values; the provided [`Codec::encode`] and
/// [`Codec::decode`] add the protocol version check, NULL handling and error
/// context.
pub trait Codec: Send + Sync + Debug {
    fn data_type(&self) -> &DataType;

    /// Encodes a non-null source.
    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>>;

    /// Decodes a non-empty byte block into `dest`.
    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()>;

    /// Encodes `source`, returning `None` for wire NULL.
    fn encode(
        &self,
        source: &dyn Encodable,
        version: ProtocolVersion,
    ) -> Result<Option<Vec<u8>>> {
        check_version(self.data_type(), version)
            .and_then(|()| match source.visit() {
                Visit::Null => Ok(None),
                visit => self.encode_visit(visit, version),
            })
            .map_err(|err| Error::Encode {
                native: source.type_name(),
                data_type: self.data_type().to_string(),
                version,
                source: Box::new(err),
            })
    }

    /// Decodes `source` into `dest` and returns whether it was wire NULL.
    ///
    /// `None` and zero-length blocks are NULL: `dest` receives its zero
    /// value, `None` for an `Option` and [`Value::Null`](crate::Value::Null)
    /// for a `Value`.
    fn decode(
        &self,
        source: Option<&[u8]>,
        dest: &mut dyn Decodable,
        version: ProtocolVersion,
    ) -> Result<bool> {
        let native = dest.type_name();
        check_version(self.data_type(), version)
            .and_then(|()| match source {
                None | Some([]) => dest.visit_mut().set_zero().map(|()| true),
                Some(bytes) => decode_present(self, bytes, dest.visit_mut(), version).map(|()| false),
            })
            .map_err(|err| Error::Decode {
                data_type: self.data_type().to_string(),
                native,
                version,
                source: Box::new(err),
            })
    }
}

/// Lets a `static` codec stand behind an `Arc<dyn Codec>` without a copy.
impl<C: Codec + ?Sized> Codec for &'static C {
    fn data_type(&self) -> &DataType {
        (**self).data_type()
    }

    fn encode_visit(&self, source: Visit<'_>, version: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        (**self).encode_visit(source, version)
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, version: ProtocolVersion) -> Result<()> {
        (**self).decode_visit(source, dest, version)
    }
}

fn check_version(data_type: &DataType, version: ProtocolVersion) -> Result<()> {
    if version.supports(data_type) {
        Ok(())
    } else {
        Err(Error::DataTypeNotSupported {
            data_type: data_type.to_string(),
            version,
        })
    }
}

// Unwraps `Option` destinations down to the value they hold.
fn decode_present<C: Codec + ?Sized>(
    codec: &C,
    bytes: &[u8],
    dest: VisitMut<'_>,
    version: ProtocolVersion,
) -> Result<()> {
    match dest {
        VisitMut::Nullable(nullable) => {
            decode_present(codec, bytes, nullable.get_or_insert().visit_mut(), version)
        }
        dest => codec.decode_visit(bytes, dest, version),
    }
}
