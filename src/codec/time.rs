use std::borrow::Cow;

use chrono::{NaiveTime, TimeDelta, Timelike};
use zerocopy::byteorder::{self, BigEndian};

use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::{from_i64, to_i64},
    primitive::fixed,
};

use super::date::format_with;

pub const DEFAULT_TIME_LAYOUT: &str = "%H:%M:%S%.f";

const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Last nanosecond of the day.
pub const MAX_TIME_NANOS: i64 = 86_399_999_999_999;

fn nanos_from_time(time: NaiveTime) -> i64 {
    time.num_seconds_from_midnight() as i64 * NANOS_PER_SECOND + time.nanosecond() as i64
}

fn checked_nanos(nanos: i64) -> Result<i64> {
    if (0..=MAX_TIME_NANOS).contains(&nanos) {
        Ok(nanos)
    } else {
        Err(Error::out_of_range(nanos))
    }
}

fn time_from_nanos(nanos: i64) -> Result<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(
        (nanos / NANOS_PER_SECOND) as u32,
        (nanos % NANOS_PER_SECOND) as u32,
    )
    .ok_or_else(|| Error::out_of_range(nanos))
}

/// `time`: nanoseconds since midnight, from 0 to 86 399 999 999 999.
/// Protocol v4 and later.
#[derive(Clone, Debug)]
pub struct TimeCodec {
    data_type: DataType,
    layout: Cow<'static, str>,
}

impl TimeCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Time,
            layout: Cow::Borrowed(DEFAULT_TIME_LAYOUT),
        }
    }

    pub fn with_layout(layout: impl Into<Cow<'static, str>>) -> Self {
        Self {
            data_type: DataType::Time,
            layout: layout.into(),
        }
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    fn to_nanos(&self, source: Visit<'_>) -> Result<i64> {
        let nanos = match source {
            Visit::Time(time) => nanos_from_time(time),
            Visit::DateTime(datetime) => nanos_from_time(datetime.time()),
            Visit::NaiveDateTime(datetime) => nanos_from_time(datetime.time()),
            Visit::TimeDelta(delta) => delta
                .num_nanoseconds()
                .ok_or_else(|| Error::out_of_range(delta))?,
            Visit::Str(text) => NaiveTime::parse_from_str(text, &self.layout)
                .map(nanos_from_time)
                .map_err(|err| Error::cannot_parse(text, err))?,
            other => to_i64(other)?,
        };
        checked_nanos(nanos)
    }

    fn from_nanos(&self, nanos: i64, dest: VisitMut<'_>) -> Result<()> {
        let nanos = checked_nanos(nanos)?;
        match dest {
            VisitMut::Time(d) => *d = time_from_nanos(nanos)?,
            VisitMut::TimeDelta(d) => *d = TimeDelta::nanoseconds(nanos),
            VisitMut::String(d) => {
                let time = time_from_nanos(nanos)?;
                *d = format_with(&self.layout, time.format(&self.layout))?;
            }
            VisitMut::Value(d) => *d = Value::Time(TimeDelta::nanoseconds(nanos)),
            other => from_i64(nanos, other)?,
        }
        Ok(())
    }
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for TimeCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let nanos = self.to_nanos(source)?;
        Ok(Some(byteorder::I64::<BigEndian>::new(nanos).to_bytes().to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let nanos = byteorder::I64::<BigEndian>::from_bytes(fixed(source)?).get();
        self.from_nanos(nanos, dest)
    }
}

pub static TIME: TimeCodec = TimeCodec::new();
