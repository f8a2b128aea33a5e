use std::{borrow::Cow, fmt::Write};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use zerocopy::byteorder::{self, BigEndian};

use crate::{
    Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::{from_i32, narrow, to_i32},
    math::floor_div,
    primitive::fixed,
};

pub const DEFAULT_DATE_LAYOUT: &str = "%Y-%m-%d";

const MILLIS_PER_DAY: i64 = 86_400_000;
/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Renders `value` with a strftime layout, failing instead of panicking on
/// a bad layout.
pub(crate) fn format_with(layout: &str, value: impl std::fmt::Display) -> Result<String> {
    let mut out = String::new();
    write!(out, "{value}").map_err(|_| Error::cannot_parse(layout, "invalid format layout"))?;
    Ok(out)
}

fn days_from_date(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 - UNIX_EPOCH_DAYS_FROM_CE
}

fn days_from_datetime(datetime: DateTime<Utc>) -> i64 {
    floor_div(datetime.timestamp_millis(), MILLIS_PER_DAY)
}

fn date_from_days(days: i32) -> Result<NaiveDate> {
    i32::try_from(days as i64 + UNIX_EPOCH_DAYS_FROM_CE)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| Error::out_of_range(days))
}

/// `date`: days since the Unix epoch, biased by `2^31` so the unsigned wire
/// value orders like the date. Protocol v4 and later.
///
/// Strings are read and written with a strftime layout, `%Y-%m-%d` unless
/// configured otherwise.
#[derive(Clone, Debug)]
pub struct DateCodec {
    data_type: DataType,
    layout: Cow<'static, str>,
}

impl DateCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Date,
            layout: Cow::Borrowed(DEFAULT_DATE_LAYOUT),
        }
    }

    pub fn with_layout(layout: impl Into<Cow<'static, str>>) -> Self {
        Self {
            data_type: DataType::Date,
            layout: layout.into(),
        }
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    fn to_days(&self, source: Visit<'_>) -> Result<i32> {
        match source {
            Visit::Date(date) => narrow(days_from_date(date)),
            Visit::DateTime(datetime) => narrow(days_from_datetime(datetime)),
            Visit::NaiveDateTime(datetime) => narrow(days_from_datetime(datetime.and_utc())),
            Visit::Str(text) => NaiveDate::parse_from_str(text, &self.layout)
                .map_err(|err| Error::cannot_parse(text, err))
                .and_then(|date| narrow(days_from_date(date))),
            other => to_i32(other),
        }
    }

    fn from_days(&self, days: i32, dest: VisitMut<'_>) -> Result<()> {
        match dest {
            VisitMut::Date(d) => *d = date_from_days(days)?,
            VisitMut::DateTime(d) => *d = date_from_days(days)?.and_time(NaiveTime::MIN).and_utc(),
            VisitMut::NaiveDateTime(d) => *d = date_from_days(days)?.and_time(NaiveTime::MIN),
            VisitMut::String(d) => {
                let date = date_from_days(days)?;
                *d = format_with(&self.layout, date.format(&self.layout))?;
            }
            VisitMut::Value(d) => *d = Value::Date(date_from_days(days)?),
            other => from_i32(days, other)?,
        }
        Ok(())
    }
}

impl Default for DateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for DateCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let days = self.to_days(source)?;
        let raw = (days as i64 - i32::MIN as i64) as u32;
        Ok(Some(byteorder::U32::<BigEndian>::new(raw).to_bytes().to_vec()))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let raw = byteorder::U32::<BigEndian>::from_bytes(fixed(source)?).get();
        let days = (raw as i64 + i32::MIN as i64) as i32;
        self.from_days(days, dest)
    }
}

pub static DATE: DateCodec = DateCodec::new();
