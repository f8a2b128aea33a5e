//! Numeric conversions shared by the codecs.
//!
//! Every narrowing or cross-signedness conversion is range checked and
//! fails with [`Error::OutOfRange`] carrying the rejected value, so no codec
//! ever truncates silently.

use std::fmt::Display;

use num_bigint::BigInt;

use crate::{Error, Result, Value, Visit, VisitMut};

/// Converts between integer types, failing if `value` does not fit.
///
/// ```
/// use cql_codec::{Error, convert::narrow};
///
/// assert_eq!(narrow::<i64, i8>(127).unwrap(), 127i8);
/// assert!(matches!(narrow::<i64, i8>(128), Err(Error::OutOfRange(v)) if v == "128"));
/// assert!(matches!(narrow::<i32, u32>(-1), Err(Error::OutOfRange(v)) if v == "-1"));
/// ```
#[inline]
pub fn narrow<S, D>(value: S) -> Result<D>
where
    S: Copy + Display,
    D: TryFrom<S>,
{
    D::try_from(value).map_err(|_| Error::out_of_range(value))
}

/// Parses a base-10 integer into `T`.
///
/// The text is read as an `i64` first, so values outside `T` but inside
/// `i64` report [`Error::OutOfRange`] rather than a parse failure.
pub fn parse_integer<T: TryFrom<i64>>(input: &str) -> Result<T> {
    let value: i64 = input
        .parse()
        .map_err(|err| Error::cannot_parse(input, err))?;
    narrow(value)
}

/// Parses a base-10 arbitrary-precision integer.
pub fn parse_bigint(input: &str) -> Result<BigInt> {
    input
        .parse()
        .map_err(|err| Error::cannot_parse(input, err))
}

/// Converts a `BigInt` to a fixed-width integer, failing if it does not fit.
pub fn bigint_to<T>(value: &BigInt) -> Result<T>
where
    T: for<'a> TryFrom<&'a BigInt>,
{
    T::try_from(value).map_err(|_| Error::out_of_range(value))
}

/// Narrows a double to a float.
///
/// Finite values must survive the round trip `f64 -> f32 -> f64` exactly;
/// NaN and the infinities pass through.
///
/// ```
/// use cql_codec::convert::float64_to_float32;
///
/// assert_eq!(float64_to_float32(0.5).unwrap(), 0.5f32);
/// assert!(float64_to_float32(0.1).is_err());
/// assert!(float64_to_float32(f64::NAN).unwrap().is_nan());
/// ```
pub fn float64_to_float32(value: f64) -> Result<f32> {
    let narrowed = value as f32;
    if value.is_finite() && narrowed as f64 != value {
        return Err(Error::out_of_range(value));
    }
    Ok(narrowed)
}

// Generates the integer funnel for one canonical width: every integer,
// BigInt or decimal string converts to the canonical type, and the canonical
// type converts to every integer, BigInt, String or the untyped Value.
macro_rules! integer_funnel {
    ($($to:ident, $from:ident: $ty:ty => $variant:ident;)*) => {
        $(
            pub(crate) fn $to(source: Visit<'_>) -> Result<$ty> {
                match source {
                    Visit::I8(v) => narrow(v),
                    Visit::I16(v) => narrow(v),
                    Visit::I32(v) => narrow(v),
                    Visit::I64(v) => narrow(v),
                    Visit::Isize(v) => narrow(v),
                    Visit::U8(v) => narrow(v),
                    Visit::U16(v) => narrow(v),
                    Visit::U32(v) => narrow(v),
                    Visit::U64(v) => narrow(v),
                    Visit::Usize(v) => narrow(v),
                    Visit::BigInt(v) => bigint_to(v),
                    Visit::Str(v) => parse_integer(v),
                    other => Err(Error::UnsupportedSource(other.kind())),
                }
            }

            pub(crate) fn $from(value: $ty, dest: VisitMut<'_>) -> Result<()> {
                match dest {
                    VisitMut::I8(d) => *d = narrow(value)?,
                    VisitMut::I16(d) => *d = narrow(value)?,
                    VisitMut::I32(d) => *d = narrow(value)?,
                    VisitMut::I64(d) => *d = narrow(value)?,
                    VisitMut::Isize(d) => *d = narrow(value)?,
                    VisitMut::U8(d) => *d = narrow(value)?,
                    VisitMut::U16(d) => *d = narrow(value)?,
                    VisitMut::U32(d) => *d = narrow(value)?,
                    VisitMut::U64(d) => *d = narrow(value)?,
                    VisitMut::Usize(d) => *d = narrow(value)?,
                    VisitMut::BigInt(d) => *d = BigInt::from(value),
                    VisitMut::String(d) => *d = value.to_string(),
                    VisitMut::Value(d) => *d = Value::$variant(value),
                    other => return Err(Error::UnsupportedDestination(other.kind())),
                }
                Ok(())
            }
        )*
    };
}

integer_funnel! {
    to_i64, from_i64: i64 => Bigint;
    to_i32, from_i32: i32 => Int;
    to_i16, from_i16: i16 => Smallint;
    to_i8, from_i8: i8 => Tinyint;
}
