use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, LazyLock},
};

use tracing::debug;

use crate::{
    Codec, DataType, DataTypeCode, Error, Result,
    codec::{
        ASCII, BIGINT, BLOB, BOOLEAN, BlobCodec, COUNTER, DATE, DECIMAL, DOUBLE, DURATION, FLOAT,
        INET, INT, ListCodec, MapCodec, SMALLINT, TIME, TIMESTAMP, TIMEUUID, TINYINT, TupleCodec,
        UUID, UdtCodec, VARCHAR, VARINT,
    },
};

static PRIMITIVES: LazyLock<HashMap<DataTypeCode, Arc<dyn Codec>>> = LazyLock::new(|| {
    let codecs: [(DataTypeCode, &'static dyn Codec); 21] = [
        (DataTypeCode::Ascii, &ASCII),
        (DataTypeCode::Bigint, &BIGINT),
        (DataTypeCode::Blob, &BLOB),
        (DataTypeCode::Boolean, &BOOLEAN),
        (DataTypeCode::Counter, &COUNTER),
        (DataTypeCode::Date, &DATE),
        (DataTypeCode::Decimal, &DECIMAL),
        (DataTypeCode::Double, &DOUBLE),
        (DataTypeCode::Duration, &DURATION),
        (DataTypeCode::Float, &FLOAT),
        (DataTypeCode::Inet, &INET),
        (DataTypeCode::Int, &INT),
        (DataTypeCode::Smallint, &SMALLINT),
        (DataTypeCode::Time, &TIME),
        (DataTypeCode::Timestamp, &TIMESTAMP),
        (DataTypeCode::Timeuuid, &TIMEUUID),
        (DataTypeCode::Tinyint, &TINYINT),
        (DataTypeCode::Uuid, &UUID),
        (DataTypeCode::Varchar, &VARCHAR),
        (DataTypeCode::Varint, &VARINT),
        (DataTypeCode::Custom, &BLOB),
    ];
    debug!(codecs = codecs.len(), "built primitive codec table");
    codecs
        .into_iter()
        .map(|(code, codec)| (code, Arc::new(codec) as Arc<dyn Codec>))
        .collect()
});

/// Returns the shared codec of a primitive type code: the `static` in
/// [`codec`](crate::codec), such as [`BIGINT`].
///
/// `None` for composite codes, which need their child types. The entry
/// for [`DataTypeCode::Custom`] is a plain blob codec; use [`new_codec`] to
/// keep the class name.
pub fn primitive_codec(code: DataTypeCode) -> Option<Arc<dyn Codec>> {
    PRIMITIVES.get(&code).cloned()
}

/// Returns a codec for `data_type`.
///
/// Primitive types share one codec instance each. Composite types get a
/// fresh codec owning the codecs of their children, built recursively.
/// Custom types pass their bytes through unchanged.
///
/// ```
/// use cql_codec::{DataType, ProtocolVersion, new_codec};
///
/// let codec = new_codec(&DataType::list(DataType::Int)).unwrap();
/// let bytes = codec.encode(&vec![1, 2], ProtocolVersion::V4).unwrap().unwrap();
/// assert_eq!(bytes.len(), 4 + 2 * (4 + 4));
///
/// assert!(new_codec(&DataType::Tuple(Vec::new())).is_err());
/// ```
pub fn new_codec(data_type: &DataType) -> Result<Arc<dyn Codec>> {
    let invalid = || Error::InvalidCodec(data_type.to_string());
    let codec: Arc<dyn Codec> = match data_type {
        DataType::Custom(class) => Arc::new(BlobCodec::custom(class.as_str())),
        DataType::List(element) => Arc::new(ListCodec::list(new_codec(element)?)),
        DataType::Set(element) => Arc::new(ListCodec::set(new_codec(element)?)),
        DataType::Map(key, value) => Arc::new(MapCodec::new(new_codec(key)?, new_codec(value)?)),
        DataType::Tuple(elements) => {
            if elements.is_empty() {
                return Err(invalid());
            }
            let elements = elements.iter().map(new_codec).collect::<Result<_>>()?;
            Arc::new(TupleCodec::new(elements))
        }
        DataType::Udt(udt) => {
            let mut names = HashSet::new();
            if udt.fields.is_empty()
                || !udt
                    .fields
                    .iter()
                    .all(|(name, _)| !name.is_empty() && names.insert(name.as_str()))
            {
                return Err(invalid());
            }
            let fields = udt
                .fields
                .iter()
                .map(|(name, field)| new_codec(field).map(|codec| (name.clone(), codec)))
                .collect::<Result<_>>()?;
            Arc::new(UdtCodec::new(udt.keyspace.as_str(), udt.name.as_str(), fields))
        }
        primitive => return primitive_codec(primitive.code()).ok_or_else(invalid),
    };
    debug!(data_type = %codec.data_type(), "built codec");
    Ok(codec)
}
