use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    net::IpAddr,
};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use num_bigint::BigInt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Decodable, Encodable, MapExtractor, SliceExtractor, Visit, VisitMut};

/// An arbitrary-precision decimal: `unscaled * 10^-scale`.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CqlDecimal {
    pub unscaled: BigInt,
    pub scale: i32,
}

impl CqlDecimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: i32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }
}

impl Display for CqlDecimal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}E{}", self.unscaled, -(self.scale as i64))
    }
}

/// A CQL duration. Months, days and nanoseconds are independent: a month is
/// not a fixed number of days and a day is not always 24 hours.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CqlDuration {
    pub months: i32,
    pub days: i32,
    pub nanoseconds: i64,
}

impl CqlDuration {
    pub const fn new(months: i32, days: i32, nanoseconds: i64) -> Self {
        Self {
            months,
            days,
            nanoseconds,
        }
    }
}

impl Display for CqlDuration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}mo{}d{}ns",
            self.months, self.days, self.nanoseconds
        )
    }
}

/// An untyped CQL value.
///
/// Decoding into a `Value` picks the preferred native type for the wire
/// type, e.g. `Value::Bigint` for `bigint` and `counter`, `Value::Varchar`
/// for `ascii` and `varchar`, `Value::Udt` keyed by field name for UDTs.
/// Wire NULL decodes to [`Value::Null`], including inside collections.
#[derive(Clone, Default, PartialEq, Debug)]
pub enum Value {
    #[default]
    Null,
    Bigint(i64),
    Blob(Vec<u8>),
    Boolean(bool),
    Date(NaiveDate),
    Decimal(CqlDecimal),
    Double(f64),
    Duration(CqlDuration),
    Float(f32),
    Inet(IpAddr),
    Int(i32),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Smallint(i16),
    /// Time since midnight.
    Time(TimeDelta),
    Timestamp(DateTime<Utc>),
    Tinyint(i8),
    Tuple(Vec<Value>),
    Udt(BTreeMap<String, Value>),
    Uuid(Uuid),
    Varchar(String),
    Varint(BigInt),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

from_native! {
    i64 => Bigint,
    Vec<u8> => Blob,
    bool => Boolean,
    NaiveDate => Date,
    CqlDecimal => Decimal,
    f64 => Double,
    CqlDuration => Duration,
    f32 => Float,
    IpAddr => Inet,
    i32 => Int,
    i16 => Smallint,
    TimeDelta => Time,
    DateTime<Utc> => Timestamp,
    i8 => Tinyint,
    Uuid => Uuid,
    String => Varchar,
    BigInt => Varint,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Encodable for Value {
    fn visit(&self) -> Visit<'_> {
        match self {
            Value::Null => Visit::Null,
            Value::Bigint(v) => Visit::I64(*v),
            Value::Blob(v) => Visit::Bytes(v),
            Value::Boolean(v) => Visit::Bool(*v),
            Value::Date(v) => Visit::Date(*v),
            Value::Decimal(v) => Visit::Decimal(v),
            Value::Double(v) => Visit::F64(*v),
            Value::Duration(v) => Visit::Duration(v),
            Value::Float(v) => Visit::F32(*v),
            Value::Inet(v) => Visit::Inet(*v),
            Value::Int(v) => Visit::I32(*v),
            Value::List(v) | Value::Tuple(v) => {
                Visit::Seq(Box::new(SliceExtractor::new(v.as_slice())))
            }
            Value::Map(v) => Visit::Map(Box::new(MapExtractor::new(
                v.iter()
                    .map(|(key, value)| (key as &dyn Encodable, value as &dyn Encodable)),
            ))),
            Value::Smallint(v) => Visit::I16(*v),
            Value::Time(v) => Visit::TimeDelta(*v),
            Value::Timestamp(v) => Visit::DateTime(*v),
            Value::Tinyint(v) => Visit::I8(*v),
            Value::Udt(v) => Visit::Map(Box::new(MapExtractor::new(
                v.iter()
                    .map(|(key, value)| (key as &dyn Encodable, value as &dyn Encodable)),
            ))),
            Value::Uuid(v) => Visit::Uuid(*v),
            Value::Varchar(v) => Visit::Str(v),
            Value::Varint(v) => Visit::BigInt(v),
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl Decodable for Value {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Value(self)
    }

    fn zero() -> Self {
        Value::Null
    }
}
