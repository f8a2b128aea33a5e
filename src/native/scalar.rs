use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use num_bigint::BigInt;
use uuid::Uuid;

use crate::{CqlDecimal, CqlDuration, Decodable, Encodable, Visit, VisitMut};

macro_rules! scalar {
    ($($ty:ty => $variant:ident, $zero:expr;)*) => {
        $(
            impl Encodable for $ty {
                #[inline]
                fn visit(&self) -> Visit<'_> {
                    Visit::$variant(*self)
                }
            }

            impl Decodable for $ty {
                #[inline]
                fn visit_mut(&mut self) -> VisitMut<'_> {
                    VisitMut::$variant(self)
                }

                #[inline]
                fn zero() -> Self {
                    $zero
                }
            }
        )*
    };
}

scalar! {
    bool => Bool, false;
    i8 => I8, 0;
    i16 => I16, 0;
    i32 => I32, 0;
    i64 => I64, 0;
    isize => Isize, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    usize => Usize, 0;
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    Uuid => Uuid, Uuid::nil();
    NaiveDate => Date, NaiveDate::default();
    DateTime<Utc> => DateTime, DateTime::<Utc>::default();
    NaiveDateTime => NaiveDateTime, NaiveDateTime::default();
    NaiveTime => Time, NaiveTime::default();
    TimeDelta => TimeDelta, TimeDelta::zero();
    IpAddr => Inet, IpAddr::V4(Ipv4Addr::UNSPECIFIED);
}

// u8 doubles as the element type of byte blocks.
impl Encodable for u8 {
    #[inline]
    fn visit(&self) -> Visit<'_> {
        Visit::U8(*self)
    }

    fn slice_as_bytes(slice: &[Self]) -> Option<&[u8]> {
        Some(slice)
    }
}

impl Decodable for u8 {
    #[inline]
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::U8(self)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    fn vec_as_bytes(vec: &mut Vec<Self>) -> Result<&mut Vec<u8>, &mut Vec<Self>> {
        Ok(vec)
    }

    fn slice_as_bytes_mut(slice: &mut [Self]) -> Result<&mut [u8], &mut [Self]> {
        Ok(slice)
    }
}

impl Encodable for Ipv4Addr {
    fn visit(&self) -> Visit<'_> {
        Visit::Inet(IpAddr::V4(*self))
    }
}

impl Decodable for Ipv4Addr {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Ipv4(self)
    }

    fn zero() -> Self {
        Ipv4Addr::UNSPECIFIED
    }
}

impl Encodable for Ipv6Addr {
    fn visit(&self) -> Visit<'_> {
        Visit::Inet(IpAddr::V6(*self))
    }
}

impl Decodable for Ipv6Addr {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Ipv6(self)
    }

    fn zero() -> Self {
        Ipv6Addr::UNSPECIFIED
    }
}

impl Encodable for DateTime<FixedOffset> {
    fn visit(&self) -> Visit<'_> {
        Visit::DateTime(self.to_utc())
    }
}

impl Encodable for BigInt {
    fn visit(&self) -> Visit<'_> {
        Visit::BigInt(self)
    }
}

impl Decodable for BigInt {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::BigInt(self)
    }

    fn zero() -> Self {
        BigInt::default()
    }
}

impl Encodable for CqlDecimal {
    fn visit(&self) -> Visit<'_> {
        Visit::Decimal(self)
    }
}

impl Decodable for CqlDecimal {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Decimal(self)
    }

    fn zero() -> Self {
        CqlDecimal::default()
    }
}

impl Encodable for CqlDuration {
    fn visit(&self) -> Visit<'_> {
        Visit::Duration(self)
    }
}

impl Decodable for CqlDuration {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Duration(self)
    }

    fn zero() -> Self {
        CqlDuration::default()
    }
}

impl Encodable for str {
    fn visit(&self) -> Visit<'_> {
        Visit::Str(self)
    }
}

impl Encodable for String {
    fn visit(&self) -> Visit<'_> {
        Visit::Str(self)
    }
}

impl Decodable for String {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::String(self)
    }

    fn zero() -> Self {
        String::new()
    }
}

/// The unit value always encodes as NULL.
impl Encodable for () {
    fn visit(&self) -> Visit<'_> {
        Visit::Null
    }

    fn is_null(&self) -> bool {
        true
    }
}

#[cfg(feature = "bytes")]
impl Encodable for bytes::Bytes {
    fn visit(&self) -> Visit<'_> {
        Visit::Bytes(self)
    }
}

#[cfg(feature = "bytes")]
impl Decodable for bytes::Bytes {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::SharedBytes(self)
    }

    fn zero() -> Self {
        bytes::Bytes::new()
    }
}
