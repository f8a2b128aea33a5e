//! Named-field records.
//!
//! A record is a struct whose fields codecs can address by index or by
//! name. Structs opt in through [`record!`](crate::record), which lists the
//! visible fields and optionally renames them:
//!
//! ```
//! use cql_codec::{DataType, ProtocolVersion, new_codec, record};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Address {
//!     street: String,
//!     zip_code: i32,
//! }
//!
//! record!(Address { street, zip_code => "zip" });
//!
//! let codec = new_codec(&DataType::udt(
//!     "shop",
//!     "address",
//!     [("street", DataType::Varchar), ("zip", DataType::Int)],
//! ))
//! .unwrap();
//!
//! let address = Address { street: "Main".into(), zip_code: 12345 };
//! let bytes = codec.encode(&address, ProtocolVersion::V4).unwrap().unwrap();
//!
//! let mut decoded = Address::default();
//! codec.decode(Some(bytes.as_slice()), &mut decoded, ProtocolVersion::V4).unwrap();
//! assert_eq!(decoded, address);
//! ```

use crate::{Decodable, Encodable, Error, Extractor, Injector, KeyValueExtractor, KeyValueInjector, Result};

pub trait Record {
    /// Names of the visible fields, in declaration order.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    fn field(&self, index: usize) -> Option<&dyn Encodable>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Decodable>;
}

/// Finds a field by exact name, then case-insensitively.
fn field_index<R: Record>(name: &str) -> Option<usize> {
    let names = R::field_names();
    names
        .iter()
        .position(|field| *field == name)
        .or_else(|| names.iter().position(|field| field.eq_ignore_ascii_case(name)))
}

fn resolve<R: Record>(index: usize, key: Option<&str>) -> Result<usize> {
    match key {
        Some(name) => field_index::<R>(name).ok_or_else(|| Error::FieldNotFound {
            record: std::any::type_name::<R>(),
            field: name.to_string(),
        }),
        None if index < R::field_names().len() => Ok(index),
        None => Err(Error::FieldIndexNotFound {
            record: std::any::type_name::<R>(),
            index,
        }),
    }
}

pub struct RecordExtractor<'s, R> {
    record: &'s R,
}

impl<'s, R: Record> RecordExtractor<'s, R> {
    pub fn new(record: &'s R) -> Self {
        Self { record }
    }
}

impl<R: Record> Extractor for RecordExtractor<'_, R> {
    fn len(&self) -> usize {
        R::field_names().len()
    }

    fn get_elem(&self, index: usize, key: Option<&str>) -> Result<&dyn Encodable> {
        let index = resolve::<R>(index, key)?;
        self.record.field(index).ok_or(Error::FieldIndexNotFound {
            record: std::any::type_name::<R>(),
            index,
        })
    }
}

impl<R: Record> KeyValueExtractor for RecordExtractor<'_, R> {
    fn get_key(&self, index: usize) -> Result<&dyn Encodable> {
        R::field_names()
            .get(index)
            .map(|name| name as &dyn Encodable)
            .ok_or(Error::FieldIndexNotFound {
                record: std::any::type_name::<R>(),
                index,
            })
    }
}

/// Record injector.
///
/// When a record stands in for a map, each entry's key is decoded into a
/// pending string first and the following value goes to the field of that
/// name.
pub struct RecordInjector<'s, R> {
    record: &'s mut R,
    pending_key: Option<String>,
}

impl<'s, R: Record> RecordInjector<'s, R> {
    pub fn new(record: &'s mut R) -> Self {
        Self {
            record,
            pending_key: None,
        }
    }
}

impl<R: Record> Injector for RecordInjector<'_, R> {
    fn resize(&mut self, _len: usize) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        for index in 0..R::field_names().len() {
            if let Some(field) = self.record.field_mut(index) {
                field.visit_mut().set_zero()?;
            }
        }
        Ok(())
    }

    fn zero_elem(&mut self, index: usize, key: Option<&str>) -> Result<&mut dyn Decodable> {
        let index = match (key, self.pending_key.take()) {
            (Some(name), _) => resolve::<R>(index, Some(name))?,
            (None, Some(name)) => resolve::<R>(index, Some(&name))?,
            (None, None) => resolve::<R>(index, None)?,
        };
        let field = self.record.field_mut(index).ok_or(Error::FieldIndexNotFound {
            record: std::any::type_name::<R>(),
            index,
        })?;
        field.visit_mut().set_zero()?;
        Ok(field)
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        Ok(())
    }
}

impl<R: Record> KeyValueInjector for RecordInjector<'_, R> {
    fn zero_key(&mut self, _index: usize) -> Result<&mut dyn Decodable> {
        Ok(self.pending_key.insert(String::new()))
    }
}

/// Registers a struct as a [`Record`] and makes it [`Encodable`] and
/// [`Decodable`].
///
/// Only the listed fields are visible. `field => "name"` exposes a field
/// under another name. The struct must implement `Default`.
#[macro_export]
macro_rules! record {
    ($record:ty { $($field:ident $(=> $name:literal)?),* $(,)? }) => {
        impl $crate::Record for $record {
            fn field_names() -> &'static [&'static str] {
                &[$($crate::__record_field_name!($field $(, $name)?)),*]
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field(&self, mut index: usize) -> Option<&dyn $crate::Encodable> {
                $(
                    if index == 0 {
                        return Some(&self.$field);
                    }
                    index -= 1;
                )*
                None
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(&mut self, mut index: usize) -> Option<&mut dyn $crate::Decodable> {
                $(
                    if index == 0 {
                        return Some(&mut self.$field);
                    }
                    index -= 1;
                )*
                None
            }
        }

        impl $crate::Encodable for $record {
            fn visit(&self) -> $crate::Visit<'_> {
                $crate::Visit::Record(Box::new($crate::RecordExtractor::new(self)))
            }
        }

        impl $crate::Decodable for $record {
            fn visit_mut(&mut self) -> $crate::VisitMut<'_> {
                $crate::VisitMut::Record(Box::new($crate::RecordInjector::new(self)))
            }

            fn zero() -> Self {
                Default::default()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
