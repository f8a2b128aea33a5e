//! Floor division and checked arithmetic on `i64`, used by the calendar
//! conversions.

use crate::{Error, Result};

/// Division rounding toward negative infinity.
///
/// `floor_div(i64::MIN, -1)` wraps to `i64::MIN`.
///
/// # Panics
///
/// Panics if `y` is zero.
///
/// ```
/// use cql_codec::math::floor_div;
///
/// assert_eq!(floor_div(7, 2), 3);
/// assert_eq!(floor_div(-7, 2), -4);
/// assert_eq!(floor_div(i64::MIN, -1), i64::MIN);
/// ```
#[inline]
pub fn floor_div(x: i64, y: i64) -> i64 {
    let r = x.wrapping_div(y);
    if (x ^ y) < 0 && r.wrapping_mul(y) != x {
        r - 1
    } else {
        r
    }
}

/// Remainder matching [`floor_div`]: the result has the sign of `y`.
///
/// ```
/// use cql_codec::math::floor_mod;
///
/// assert_eq!(floor_mod(-7, 2), 1);
/// assert_eq!(floor_mod(7, -2), -1);
/// ```
#[inline]
pub fn floor_mod(x: i64, y: i64) -> i64 {
    x.wrapping_sub(floor_div(x, y).wrapping_mul(y))
}

#[inline]
pub fn add_exact(x: i64, y: i64) -> Result<i64> {
    x.checked_add(y).ok_or(Error::Overflow("long"))
}

#[inline]
pub fn multiply_exact(x: i64, y: i64) -> Result<i64> {
    x.checked_mul(y).ok_or(Error::Overflow("long"))
}
