//! # cql_codec
//!
//! Bidirectional marshaling between CQL wire values and native Rust types.
//!
//! Given a [`DataType`] (primitive, collection, tuple or user-defined type),
//! a [`Codec`] produces byte-exact wire encodings from native values and
//! reconstructs native values from wire bytes.
//!
//! Native values reach the codecs through two shape views:
//!
//! - [`Encodable::visit`] turns a value into a [`Visit`]: a scalar, or an
//!   [`Extractor`] over a sequence, mapping or record.
//! - [`Decodable::visit_mut`] turns a destination into a [`VisitMut`]: a
//!   mutable scalar slot, or an [`Injector`] that hands out element slots.
//!
//! Composite codecs only ever talk to extractors and injectors, so the same
//! list codec reads from a `Vec<i32>`, a `HashSet<i32>` or a `[i32; 3]`.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use cql_codec::{DataType, ProtocolVersion, new_codec};
//!
//! let data_type: DataType = "map<int, varchar>".parse().unwrap();
//! let codec = new_codec(&data_type).unwrap();
//!
//! let source = HashMap::from([(12, "abc")]);
//! let bytes = codec.encode(&source, ProtocolVersion::V4).unwrap().unwrap();
//! assert_eq!(
//!     bytes,
//!     [0, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 12, 0, 0, 0, 3, b'a', b'b', b'c']
//! );
//!
//! let mut decoded: HashMap<i32, String> = HashMap::new();
//! let was_null = codec
//!     .decode(Some(bytes.as_slice()), &mut decoded, ProtocolVersion::V4)
//!     .unwrap();
//! assert!(!was_null);
//! assert_eq!(decoded[&12], "abc");
//! ```

pub mod codec;
pub mod convert;
mod data_type;
mod error;
mod extract;
mod inject;
pub mod math;
mod native;
pub mod primitive;
mod record;
mod registry;
mod value;
mod version;

pub use codec::Codec;
pub use data_type::*;
pub use error::*;
pub use extract::*;
pub use inject::*;
pub use native::*;
pub use record::*;
pub use registry::*;
pub use value::*;
pub use version::*;
