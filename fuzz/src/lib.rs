use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, LazyLock},
};

use bytes::Bytes;
use cql_codec::{Codec, DataType, ProtocolVersion, Value, new_codec};

#[derive(Debug, Default, Clone, PartialEq)]
struct Address {
    street: String,
    zip: i32,
    tags: Vec<String>,
}

cql_codec::record!(Address { street, zip, tags });

const TYPES: &[&str] = &[
    "bigint",
    "blob",
    "boolean",
    "date",
    "decimal",
    "double",
    "duration",
    "float",
    "inet",
    "int",
    "smallint",
    "time",
    "timestamp",
    "timeuuid",
    "tinyint",
    "uuid",
    "varchar",
    "varint",
    "list<int>",
    "set<text>",
    "map<text, bigint>",
    "list<frozen<map<int, list<blob>>>>",
    "tuple<int, text, list<double>>",
];

static CODECS: LazyLock<Vec<Arc<dyn Codec>>> = LazyLock::new(|| {
    let mut codecs: Vec<Arc<dyn Codec>> = TYPES
        .iter()
        .filter_map(|name| name.parse::<DataType>().ok())
        .filter_map(|data_type| new_codec(&data_type).ok())
        .collect();
    let address = DataType::udt(
        "fuzz",
        "address",
        [
            ("street", DataType::Varchar),
            ("zip", DataType::Int),
            ("tags", DataType::list(DataType::Varchar)),
        ],
    );
    codecs.extend(new_codec(&address).ok());
    codecs
});

/// Decodes `data` into untyped values with every codec and every version,
/// re-encoding whatever decodes.
pub fn test_value(data: &[u8]) {
    for codec in CODECS.iter() {
        for version in ProtocolVersion::ALL {
            let mut value = Value::Null;
            if codec.decode(Some(data), &mut value, version).is_ok() {
                let _ = codec.encode(&value, version);
            }
        }
    }
}

/// Decodes `data` into typed destinations and re-encodes whatever decodes.
pub fn test_typed(data: &[u8]) {
    let version = ProtocolVersion::V4;
    for codec in CODECS.iter() {
        let mut strings: Vec<String> = Vec::new();
        if let Ok(false) = codec.decode(Some(data), &mut strings, version) {
            let _ = codec.encode(&strings, version);
        }

        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        let _ = codec.decode(Some(data), &mut map, version);

        let mut entries: HashMap<String, Value> = HashMap::new();
        let _ = codec.decode(Some(data), &mut entries, version);

        let mut address = Address::default();
        if let Ok(false) = codec.decode(Some(data), &mut address, version) {
            let _ = codec.encode(&address, version);
        }

        let mut blob = Bytes::new();
        if let Ok(false) = codec.decode(Some(data), &mut blob, version) {
            let _ = codec.encode(&blob, version);
        }
    }
}

pub fn test(data: &[u8]) {
    test_value(data);
    test_typed(data);
}
