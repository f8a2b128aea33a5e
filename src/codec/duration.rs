use chrono::TimeDelta;

use crate::{
    Codec, CqlDuration, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut,
    convert::narrow,
    primitive::{read_vint, write_vint},
};

/// `duration`: months, days and nanoseconds as three signed vints.
/// Protocol v5 and DSE v2.
#[derive(Clone, Debug)]
pub struct DurationCodec {
    data_type: DataType,
}

impl DurationCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Duration,
        }
    }
}

fn to_duration(source: Visit<'_>) -> Result<CqlDuration> {
    match source {
        Visit::Duration(duration) => Ok(*duration),
        Visit::TimeDelta(delta) => delta
            .num_nanoseconds()
            .map(|nanos| CqlDuration::new(0, 0, nanos))
            .ok_or_else(|| Error::out_of_range(delta)),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

fn from_duration(duration: CqlDuration, dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::Duration(d) => *d = duration,
        // months and days have no fixed length
        VisitMut::TimeDelta(d) if duration.months == 0 && duration.days == 0 => {
            *d = TimeDelta::nanoseconds(duration.nanoseconds);
        }
        VisitMut::TimeDelta(_) => return Err(Error::out_of_range(duration)),
        VisitMut::Value(d) => *d = Value::Duration(duration),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

impl Codec for DurationCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        let duration = to_duration(source)?;
        let mut buf = Vec::with_capacity(12);
        write_vint(&mut buf, duration.months as i64);
        write_vint(&mut buf, duration.days as i64);
        write_vint(&mut buf, duration.nanoseconds);
        Ok(Some(buf))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        let mut rest = source;
        let months = narrow(read_vint(&mut rest)?)?;
        let days = narrow(read_vint(&mut rest)?)?;
        let nanoseconds = read_vint(&mut rest)?;
        if !rest.is_empty() {
            return Err(Error::BytesRemaining(rest.len()));
        }
        from_duration(CqlDuration::new(months, days, nanoseconds), dest)
    }
}

pub static DURATION: DurationCodec = DurationCodec::new();
