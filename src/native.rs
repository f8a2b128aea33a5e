mod container;
mod scalar;
mod tuple;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use num_bigint::BigInt;
use uuid::Uuid;

use crate::{
    CqlDecimal, CqlDuration, Extractor, Injector, KeyValueExtractor, KeyValueInjector, Result,
    Value,
};

/// Read-only view of a native value, as seen by a codec.
///
/// Scalars are carried by value or by reference; containers are carried as
/// an [`Extractor`] so composite codecs never learn the concrete container.
pub enum Visit<'s> {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    BigInt(&'s BigInt),
    Str(&'s str),
    Bytes(&'s [u8]),
    Uuid(Uuid),
    Inet(IpAddr),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    NaiveDateTime(NaiveDateTime),
    Time(NaiveTime),
    TimeDelta(TimeDelta),
    Decimal(&'s CqlDecimal),
    Duration(&'s CqlDuration),
    /// An ordered sequence: slices, vectors, sets, Rust tuples.
    Seq(Box<dyn Extractor + 's>),
    /// A key-ordered mapping.
    Map(Box<dyn KeyValueExtractor + 's>),
    /// A registered record; keys are field names.
    Record(Box<dyn KeyValueExtractor + 's>),
}

impl Visit<'_> {
    /// Short name of the shape, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Visit::Null => "null",
            Visit::Bool(_) => "bool",
            Visit::I8(_) => "i8",
            Visit::I16(_) => "i16",
            Visit::I32(_) => "i32",
            Visit::I64(_) => "i64",
            Visit::Isize(_) => "isize",
            Visit::U8(_) => "u8",
            Visit::U16(_) => "u16",
            Visit::U32(_) => "u32",
            Visit::U64(_) => "u64",
            Visit::Usize(_) => "usize",
            Visit::F32(_) => "f32",
            Visit::F64(_) => "f64",
            Visit::BigInt(_) => "BigInt",
            Visit::Str(_) => "string",
            Visit::Bytes(_) => "bytes",
            Visit::Uuid(_) => "Uuid",
            Visit::Inet(_) => "IpAddr",
            Visit::Date(_) => "NaiveDate",
            Visit::DateTime(_) => "DateTime",
            Visit::NaiveDateTime(_) => "NaiveDateTime",
            Visit::Time(_) => "NaiveTime",
            Visit::TimeDelta(_) => "TimeDelta",
            Visit::Decimal(_) => "CqlDecimal",
            Visit::Duration(_) => "CqlDuration",
            Visit::Seq(_) => "sequence",
            Visit::Map(_) => "map",
            Visit::Record(_) => "record",
        }
    }
}

/// Writable view of a native destination, as seen by a codec.
pub enum VisitMut<'s> {
    Bool(&'s mut bool),
    I8(&'s mut i8),
    I16(&'s mut i16),
    I32(&'s mut i32),
    I64(&'s mut i64),
    Isize(&'s mut isize),
    U8(&'s mut u8),
    U16(&'s mut u16),
    U32(&'s mut u32),
    U64(&'s mut u64),
    Usize(&'s mut usize),
    F32(&'s mut f32),
    F64(&'s mut f64),
    BigInt(&'s mut BigInt),
    String(&'s mut String),
    Bytes(&'s mut Vec<u8>),
    /// A byte array whose length is fixed by the destination type.
    FixedBytes(&'s mut [u8]),
    #[cfg(feature = "bytes")]
    SharedBytes(&'s mut bytes::Bytes),
    Uuid(&'s mut Uuid),
    Inet(&'s mut IpAddr),
    Ipv4(&'s mut Ipv4Addr),
    Ipv6(&'s mut Ipv6Addr),
    Date(&'s mut NaiveDate),
    DateTime(&'s mut DateTime<Utc>),
    NaiveDateTime(&'s mut NaiveDateTime),
    Time(&'s mut NaiveTime),
    TimeDelta(&'s mut TimeDelta),
    Decimal(&'s mut CqlDecimal),
    Duration(&'s mut CqlDuration),
    /// A destination that can hold NULL, i.e. an `Option`.
    Nullable(&'s mut dyn Nullable),
    /// The untyped destination; receives the preferred type for the wire type.
    Value(&'s mut Value),
    Seq(Box<dyn Injector + 's>),
    Map(Box<dyn KeyValueInjector + 's>),
    Record(Box<dyn KeyValueInjector + 's>),
}

impl VisitMut<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            VisitMut::Bool(_) => "bool",
            VisitMut::I8(_) => "i8",
            VisitMut::I16(_) => "i16",
            VisitMut::I32(_) => "i32",
            VisitMut::I64(_) => "i64",
            VisitMut::Isize(_) => "isize",
            VisitMut::U8(_) => "u8",
            VisitMut::U16(_) => "u16",
            VisitMut::U32(_) => "u32",
            VisitMut::U64(_) => "u64",
            VisitMut::Usize(_) => "usize",
            VisitMut::F32(_) => "f32",
            VisitMut::F64(_) => "f64",
            VisitMut::BigInt(_) => "BigInt",
            VisitMut::String(_) => "String",
            VisitMut::Bytes(_) => "Vec<u8>",
            VisitMut::FixedBytes(_) => "byte array",
            #[cfg(feature = "bytes")]
            VisitMut::SharedBytes(_) => "Bytes",
            VisitMut::Uuid(_) => "Uuid",
            VisitMut::Inet(_) => "IpAddr",
            VisitMut::Ipv4(_) => "Ipv4Addr",
            VisitMut::Ipv6(_) => "Ipv6Addr",
            VisitMut::Date(_) => "NaiveDate",
            VisitMut::DateTime(_) => "DateTime<Utc>",
            VisitMut::NaiveDateTime(_) => "NaiveDateTime",
            VisitMut::Time(_) => "NaiveTime",
            VisitMut::TimeDelta(_) => "TimeDelta",
            VisitMut::Decimal(_) => "CqlDecimal",
            VisitMut::Duration(_) => "CqlDuration",
            VisitMut::Nullable(_) => "Option",
            VisitMut::Value(_) => "Value",
            VisitMut::Seq(_) => "sequence",
            VisitMut::Map(_) => "map",
            VisitMut::Record(_) => "record",
        }
    }

    /// Stores the zero value of the destination: `None` for options,
    /// [`Value::Null`] for untyped destinations, empty for containers.
    pub fn set_zero(self) -> Result<()> {
        match self {
            VisitMut::Bool(v) => *v = false,
            VisitMut::I8(v) => *v = 0,
            VisitMut::I16(v) => *v = 0,
            VisitMut::I32(v) => *v = 0,
            VisitMut::I64(v) => *v = 0,
            VisitMut::Isize(v) => *v = 0,
            VisitMut::U8(v) => *v = 0,
            VisitMut::U16(v) => *v = 0,
            VisitMut::U32(v) => *v = 0,
            VisitMut::U64(v) => *v = 0,
            VisitMut::Usize(v) => *v = 0,
            VisitMut::F32(v) => *v = 0.0,
            VisitMut::F64(v) => *v = 0.0,
            VisitMut::BigInt(v) => *v = BigInt::default(),
            VisitMut::String(v) => v.clear(),
            VisitMut::Bytes(v) => v.clear(),
            VisitMut::FixedBytes(v) => v.fill(0),
            #[cfg(feature = "bytes")]
            VisitMut::SharedBytes(v) => *v = bytes::Bytes::new(),
            VisitMut::Uuid(v) => *v = Uuid::nil(),
            VisitMut::Inet(v) => *v = IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            VisitMut::Ipv4(v) => *v = Ipv4Addr::UNSPECIFIED,
            VisitMut::Ipv6(v) => *v = Ipv6Addr::UNSPECIFIED,
            VisitMut::Date(v) => *v = NaiveDate::default(),
            VisitMut::DateTime(v) => *v = DateTime::<Utc>::default(),
            VisitMut::NaiveDateTime(v) => *v = NaiveDateTime::default(),
            VisitMut::Time(v) => *v = NaiveTime::default(),
            VisitMut::TimeDelta(v) => *v = TimeDelta::zero(),
            VisitMut::Decimal(v) => *v = CqlDecimal::default(),
            VisitMut::Duration(v) => *v = CqlDuration::default(),
            VisitMut::Nullable(v) => v.set_null(),
            VisitMut::Value(v) => *v = Value::Null,
            VisitMut::Seq(mut injector) => injector.reset()?,
            VisitMut::Map(mut injector) | VisitMut::Record(mut injector) => injector.reset()?,
        }
        Ok(())
    }
}

/// A native value that codecs can read.
///
/// Implemented for the integer and float primitives, strings, byte blocks,
/// the standard collections, Rust tuples, `Option`, smart pointers, the
/// chrono, uuid and num-bigint types, and [`Value`]. Record types opt in
/// with [`record!`](crate::record).
pub trait Encodable {
    fn visit(&self) -> Visit<'_>;

    /// Name of the native type, used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` if the value encodes as wire NULL.
    fn is_null(&self) -> bool {
        matches!(self.visit(), Visit::Null)
    }

    #[doc(hidden)]
    fn slice_as_bytes(_slice: &[Self]) -> Option<&[u8]>
    where
        Self: Sized,
    {
        None
    }
}

/// A native destination that codecs can write.
pub trait Decodable {
    fn visit_mut(&mut self) -> VisitMut<'_>;

    /// The value a fresh slot starts with, and what wire NULL decodes to.
    fn zero() -> Self
    where
        Self: Sized;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    #[doc(hidden)]
    fn vec_as_bytes(vec: &mut Vec<Self>) -> std::result::Result<&mut Vec<u8>, &mut Vec<Self>>
    where
        Self: Sized,
    {
        Err(vec)
    }

    #[doc(hidden)]
    fn slice_as_bytes_mut(slice: &mut [Self]) -> std::result::Result<&mut [u8], &mut [Self]>
    where
        Self: Sized,
    {
        Err(slice)
    }
}

/// A destination that has its own representation of NULL.
pub trait Nullable {
    fn set_null(&mut self);

    /// Returns the inner destination, creating a zero value first if the
    /// destination currently holds NULL.
    fn get_or_insert(&mut self) -> &mut dyn Decodable;
}

impl<T: Decodable> Nullable for Option<T> {
    fn set_null(&mut self) {
        *self = None;
    }

    fn get_or_insert(&mut self) -> &mut dyn Decodable {
        self.get_or_insert_with(T::zero)
    }
}
