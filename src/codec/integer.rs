use zerocopy::byteorder::{self, BigEndian};

use crate::{
    Codec, DataType, ProtocolVersion, Result, Visit, VisitMut,
    convert::{from_i8, from_i16, from_i32, from_i64, to_i8, to_i16, to_i32, to_i64},
    primitive::fixed,
};

macro_rules! integer_codec {
    ($(
        $(#[$doc:meta])*
        $codec:ident: $ty:ty, $width:literal, $to:ident, $from:ident,
        |$v:ident| $encode:expr, |$b:ident| $decode:expr;
    )*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug)]
            pub struct $codec {
                data_type: DataType,
            }

            impl Codec for $codec {
                fn data_type(&self) -> &DataType {
                    &self.data_type
                }

                fn encode_visit(
                    &self,
                    source: Visit<'_>,
                    _version: ProtocolVersion,
                ) -> Result<Option<Vec<u8>>> {
                    let $v: $ty = $to(source)?;
                    Ok(Some($encode.to_vec()))
                }

                fn decode_visit(
                    &self,
                    source: &[u8],
                    dest: VisitMut<'_>,
                    _version: ProtocolVersion,
                ) -> Result<()> {
                    let $b = fixed::<$width>(source)?;
                    $from($decode, dest)
                }
            }
        )*
    };
}

integer_codec! {
    /// `bigint` and `counter`: 8-byte big-endian two's complement.
    BigintCodec: i64, 8, to_i64, from_i64,
        |v| byteorder::I64::<BigEndian>::new(v).to_bytes(),
        |b| byteorder::I64::<BigEndian>::from_bytes(b).get();
    /// `int`: 4-byte big-endian two's complement.
    IntCodec: i32, 4, to_i32, from_i32,
        |v| byteorder::I32::<BigEndian>::new(v).to_bytes(),
        |b| byteorder::I32::<BigEndian>::from_bytes(b).get();
    /// `smallint`: 2-byte big-endian two's complement. Protocol v4 and later.
    SmallintCodec: i16, 2, to_i16, from_i16,
        |v| byteorder::I16::<BigEndian>::new(v).to_bytes(),
        |b| byteorder::I16::<BigEndian>::from_bytes(b).get();
    /// `tinyint`: a single byte. Protocol v4 and later.
    TinyintCodec: i8, 1, to_i8, from_i8,
        |v| [v as u8],
        |b| b[0] as i8;
}

impl BigintCodec {
    pub const fn bigint() -> Self {
        Self {
            data_type: DataType::Bigint,
        }
    }

    pub const fn counter() -> Self {
        Self {
            data_type: DataType::Counter,
        }
    }
}

impl IntCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Int,
        }
    }
}

impl SmallintCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Smallint,
        }
    }
}

impl TinyintCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Tinyint,
        }
    }
}

pub static BIGINT: BigintCodec = BigintCodec::bigint();
pub static COUNTER: BigintCodec = BigintCodec::counter();
pub static INT: IntCodec = IntCodec::new();
pub static SMALLINT: SmallintCodec = SmallintCodec::new();
pub static TINYINT: TinyintCodec = TinyintCodec::new();
