use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use zerocopy::byteorder::{self, BigEndian};

use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::{from_i64, to_i64},
    math::{add_exact, floor_div, floor_mod, multiply_exact},
    primitive::fixed,
};

use super::date::format_with;

pub const DEFAULT_TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

fn millis_from_datetime(datetime: DateTime<Utc>) -> Result<i64> {
    add_exact(
        multiply_exact(datetime.timestamp(), 1000)?,
        datetime.timestamp_subsec_millis() as i64,
    )
}

fn datetime_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    let seconds = floor_div(millis, 1000);
    let nanos = floor_mod(millis, 1000) * 1_000_000;
    DateTime::from_timestamp(seconds, nanos as u32).ok_or_else(|| Error::out_of_range(millis))
}

/// `timestamp`: milliseconds since the Unix epoch.
///
/// Strings are read and written with a strftime layout. Strings and naive
/// date-times carry no offset of their own and are taken to be in the
/// codec's location, UTC unless configured otherwise.
#[derive(Clone, Debug)]
pub struct TimestampCodec {
    data_type: DataType,
    layout: Cow<'static, str>,
    location: Option<FixedOffset>,
}

impl TimestampCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Timestamp,
            layout: Cow::Borrowed(DEFAULT_TIMESTAMP_LAYOUT),
            location: None,
        }
    }

    /// ```
    /// use chrono::FixedOffset;
    /// use cql_codec::{Codec, ProtocolVersion, codec::TimestampCodec};
    ///
    /// let codec = TimestampCodec::with_layout(
    ///     "%Y-%m-%d %H:%M",
    ///     FixedOffset::east_opt(3600),
    /// );
    /// let bytes = codec.encode(&"1970-01-01 01:00", ProtocolVersion::V4).unwrap().unwrap();
    /// assert_eq!(bytes, [0; 8]);
    /// ```
    pub fn with_layout(
        layout: impl Into<Cow<'static, str>>,
        location: Option<FixedOffset>,
    ) -> Self {
        Self {
            data_type: DataType::Timestamp,
            layout: layout.into(),
            location,
        }
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn location(&self) -> FixedOffset {
        self.location.unwrap_or_else(|| Utc.fix())
    }

    fn localize(&self, datetime: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.location()
            .from_local_datetime(&datetime)
            .single()
            .map(|datetime| datetime.to_utc())
            .ok_or_else(|| Error::out_of_range(datetime))
    }

    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        match DateTime::parse_from_str(text, &self.layout) {
            Ok(datetime) => Ok(datetime.to_utc()),
            Err(err) => match NaiveDateTime::parse_from_str(text, &self.layout) {
                Ok(datetime) => self.localize(datetime),
                Err(_) => Err(Error::cannot_parse(text, err)),
            },
        }
    }

    fn to_millis(&self, source: Visit<'_>) -> Result<i64> {
        match source {
            Visit::DateTime(datetime) => millis_from_datetime(datetime),
            Visit::NaiveDateTime(datetime) => millis_from_datetime(self.localize(datetime)?),
            Visit::Date(date) => {
                millis_from_datetime(self.localize(date.and_time(NaiveTime::MIN))?)
            }
            Visit::Str(text) => millis_from_datetime(self.parse(text)?),
            other => to_i64(other),
        }
    }

    fn from_millis(&self, millis: i64, dest: VisitMut<'_>) -> Result<()> {
        match dest {
            VisitMut::DateTime(d) => *d = datetime_from_millis(millis)?,
            VisitMut::NaiveDateTime(d) => {
                *d = datetime_from_millis(millis)?
                    .with_timezone(&self.location())
                    .naive_local();
            }
            VisitMut::Date(d) => {
                *d = datetime_from_millis(millis)?
                    .with_timezone(&self.location())
                    .date_naive();
            }
            VisitMut::String(d) => {
                let datetime = datetime_from_millis(millis)?.with_timezone(&self.location());
                *d = format_with(&self.layout, datetime.format(&self.layout))?;
            }
            VisitMut::Value(d) => *d = Value::Timestamp(datetime_from_millis(millis)?),
            other => from_i64(millis, other)?,
        }
        Ok(())
    }
}

impl Default for TimestampCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for TimestampCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let millis = self.to_millis(source)?;
        Ok(Some(byteorder::I64::<BigEndian>::new(millis).to_bytes().to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let millis = byteorder::I64::<BigEndian>::from_bytes(fixed(source)?).get();
        self.from_millis(millis, dest)
    }
}

pub static TIMESTAMP: TimestampCodec = TimestampCodec::new();
