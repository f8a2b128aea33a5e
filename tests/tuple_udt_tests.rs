//! Tests for tuples, user-defined types and records

use std::collections::{BTreeMap, HashMap};

use cql_codec::{DataType, Error, ProtocolVersion, Value, new_codec, record};

const V4: ProtocolVersion = ProtocolVersion::V4;

#[derive(Default, Debug, PartialEq)]
struct Address {
    street: String,
    zip_code: i32,
    tags: Vec<String>,
}

record!(Address { street, zip_code => "zip", tags });

#[derive(Default, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

record!(Point { x, y });

fn address_type() -> DataType {
    DataType::udt(
        "shop",
        "address",
        [
            ("zip", DataType::Int),
            ("street", DataType::Varchar),
            ("tags", DataType::list(DataType::Varchar)),
        ],
    )
}

fn sample_address() -> Address {
    Address {
        street: "Main".to_string(),
        zip_code: 12345,
        tags: vec!["home".to_string()],
    }
}

const ADDRESS_BYTES: [u8; 32] = [
    0, 0, 0, 4, 0, 0, 0x30, 0x39, // zip
    0, 0, 0, 4, b'M', b'a', b'i', b'n', // street
    0, 0, 0, 12, 0, 0, 0, 1, 0, 0, 0, 4, b'h', b'o', b'm', b'e', // tags
];

#[test]
fn test_tuple_roundtrip() {
    let codec = new_codec(&DataType::tuple([DataType::Int, DataType::Varchar])).unwrap();
    let bytes = codec.encode(&(1i32, "a"), V4).unwrap().unwrap();
    assert_eq!(bytes, [0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0, 1, b'a']);

    let mut decoded = (0i32, String::new());
    assert!(!codec.decode(Some(bytes.as_slice()), &mut decoded, V4).unwrap());
    assert_eq!(decoded, (1, "a".to_string()));

    let mut value = Value::Null;
    codec.decode(Some(bytes.as_slice()), &mut value, V4).unwrap();
    assert_eq!(
        value,
        Value::Tuple(vec![Value::Int(1), Value::Varchar("a".into())])
    );
    assert_eq!(codec.encode(&value, V4).unwrap().unwrap(), bytes);
}

#[test]
fn test_tuple_null_elements() {
    let codec = new_codec(&DataType::tuple([DataType::Int, DataType::Varchar])).unwrap();
    let bytes = codec
        .encode(&(Some(1i32), None::<String>), V4)
        .unwrap()
        .unwrap();
    assert_eq!(bytes, [0, 0, 0, 4, 0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]);

    let mut decoded: (Option<i32>, Option<String>) = (None, Some("x".into()));
    codec.decode(Some(bytes.as_slice()), &mut decoded, V4).unwrap();
    assert_eq!(decoded, (Some(1), None));
}

#[test]
fn test_tuple_arity_mismatch() {
    let codec = new_codec(&DataType::tuple([DataType::Int, DataType::Int])).unwrap();
    let err = codec.encode(&(1i32,), V4).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongElementCount {
            expected: 2,
            actual: 1
        }
    ));

    let bytes = codec.encode(&(1i32, 2i32), V4).unwrap().unwrap();
    let mut three = (0i32, 0i32, 0i32);
    let err = codec
        .decode(Some(bytes.as_slice()), &mut three, V4)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongElementCount {
            expected: 3,
            actual: 2
        }
    ));

    let mut extra = bytes.clone();
    extra.extend_from_slice(&[0, 0, 0, 0]);
    let mut pair = (0i32, 0i32);
    let err = codec
        .decode(Some(extra.as_slice()), &mut pair, V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::BytesRemaining(4)));
}

#[test]
fn test_tuple_into_fixed_array() {
    let codec = new_codec(&DataType::tuple([DataType::Int, DataType::Int])).unwrap();
    let bytes = codec.encode(&(1i32, 2i32), V4).unwrap().unwrap();

    let mut three = [7i32; 3];
    let err = codec
        .decode(Some(bytes.as_slice()), &mut three, V4)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongElementCount {
            expected: 3,
            actual: 2
        }
    ));
    assert_eq!(three, [7, 7, 7]);

    let mut one = [0i32; 1];
    let err = codec
        .decode(Some(bytes.as_slice()), &mut one, V4)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongElementCount {
            expected: 1,
            actual: 2
        }
    ));

    let mut two = [0i32; 2];
    codec.decode(Some(bytes.as_slice()), &mut two, V4).unwrap();
    assert_eq!(two, [1, 2]);

    // lists still fill a longer array and zero the tail
    let list = new_codec(&DataType::list(DataType::Int)).unwrap();
    let bytes = list.encode(&vec![1i32, 2], V4).unwrap().unwrap();
    let mut three = [7i32; 3];
    list.decode(Some(bytes.as_slice()), &mut three, V4).unwrap();
    assert_eq!(three, [1, 2, 0]);
}

#[test]
fn test_tuple_from_record_and_slice() {
    let codec = new_codec(&DataType::tuple([DataType::Int, DataType::Int])).unwrap();
    let from_record = codec.encode(&Point { x: 3, y: 4 }, V4).unwrap().unwrap();
    let from_slice = codec.encode(&[3i32, 4], V4).unwrap().unwrap();
    assert_eq!(from_record, from_slice);

    let mut point = Point::default();
    codec
        .decode(Some(from_slice.as_slice()), &mut point, V4)
        .unwrap();
    assert_eq!(point, Point { x: 3, y: 4 });
}

#[test]
fn test_tuple_not_supported_in_v2() {
    let codec = new_codec(&DataType::tuple([DataType::Int])).unwrap();
    let err = codec.encode(&(1i32,), ProtocolVersion::V2).unwrap_err();
    assert!(matches!(err.root_cause(), Error::DataTypeNotSupported { .. }));
}

#[test]
fn test_udt_record_roundtrip() {
    let codec = new_codec(&address_type()).unwrap();
    let address = sample_address();
    let bytes = codec.encode(&address, V4).unwrap().unwrap();
    assert_eq!(bytes, ADDRESS_BYTES);

    let mut decoded = Address::default();
    assert!(!codec.decode(Some(bytes.as_slice()), &mut decoded, V4).unwrap());
    assert_eq!(decoded, address);
}

#[test]
fn test_udt_fields_match_case_insensitively() {
    let codec = new_codec(&DataType::udt(
        "shop",
        "point",
        [("X", DataType::Int), ("Y", DataType::Int)],
    ))
    .unwrap();
    let bytes = codec.encode(&Point { x: 1, y: 2 }, V4).unwrap().unwrap();
    assert_eq!(bytes, [0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 2]);

    let mut point = Point::default();
    codec.decode(Some(bytes.as_slice()), &mut point, V4).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn test_udt_missing_record_field() {
    let codec = new_codec(&DataType::udt(
        "shop",
        "point",
        [("x", DataType::Int), ("z", DataType::Int)],
    ))
    .unwrap();
    let err = codec.encode(&Point { x: 1, y: 2 }, V4).unwrap_err();
    assert!(err.to_string().contains("cannot encode field z"), "{err}");
    assert!(matches!(
        err.root_cause(),
        Error::FieldNotFound { field, .. } if field == "z"
    ));
}

#[test]
fn test_udt_from_map() {
    let codec = new_codec(&address_type()).unwrap();
    let source: BTreeMap<&str, Value> = BTreeMap::from([
        ("street", Value::from("Main")),
        ("zip", Value::Int(12345)),
    ]);
    let bytes = codec.encode(&source, V4).unwrap().unwrap();
    // the absent "tags" field is NULL
    assert_eq!(&bytes[..16], &ADDRESS_BYTES[..16]);
    assert_eq!(&bytes[16..], [0xff, 0xff, 0xff, 0xff]);

    let err = codec
        .encode(&HashMap::from([(1, 2)]), V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::KeyMustBeString));
}

#[test]
fn test_udt_into_map_and_value() {
    let codec = new_codec(&address_type()).unwrap();

    let mut map: HashMap<String, Value> = HashMap::new();
    codec
        .decode(Some(ADDRESS_BYTES.as_slice()), &mut map, V4)
        .unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map["zip"], Value::Int(12345));
    assert_eq!(map["street"], Value::Varchar("Main".into()));
    assert_eq!(
        map["tags"],
        Value::List(vec![Value::Varchar("home".into())])
    );

    let mut value = Value::Null;
    codec
        .decode(Some(ADDRESS_BYTES.as_slice()), &mut value, V4)
        .unwrap();
    let Value::Udt(fields) = &value else {
        panic!("expected a UDT value, got {value:?}");
    };
    assert_eq!(
        fields.keys().collect::<Vec<_>>(),
        ["street", "tags", "zip"]
    );
    assert_eq!(codec.encode(&value, V4).unwrap().unwrap(), ADDRESS_BYTES);
}

#[test]
fn test_udt_short_value() {
    let codec = new_codec(&address_type()).unwrap();
    let mut address = sample_address();
    codec
        .decode(Some(&ADDRESS_BYTES[..8]), &mut address, V4)
        .unwrap();
    assert_eq!(
        address,
        Address {
            street: String::new(),
            zip_code: 12345,
            tags: Vec::new(),
        }
    );
}

#[test]
fn test_udt_trailing_bytes() {
    let codec = new_codec(&address_type()).unwrap();
    let mut bytes = ADDRESS_BYTES.to_vec();
    bytes.push(1);
    let mut address = Address::default();
    let err = codec
        .decode(Some(bytes.as_slice()), &mut address, V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::BytesRemaining(1)));
}

#[test]
fn test_record_as_map() {
    let codec = new_codec(&DataType::map(DataType::Varchar, DataType::Int)).unwrap();
    let bytes = codec.encode(&Point { x: 5, y: 6 }, V4).unwrap().unwrap();

    let mut map: BTreeMap<String, i32> = BTreeMap::new();
    codec.decode(Some(bytes.as_slice()), &mut map, V4).unwrap();
    assert_eq!(map, BTreeMap::from([("x".into(), 5), ("y".into(), 6)]));

    let swapped = codec
        .encode(&BTreeMap::from([("Y", 1), ("X", 2)]), V4)
        .unwrap()
        .unwrap();
    let mut point = Point::default();
    codec
        .decode(Some(swapped.as_slice()), &mut point, V4)
        .unwrap();
    assert_eq!(point, Point { x: 2, y: 1 });

    let unknown = codec
        .encode(&BTreeMap::from([("w", 1)]), V4)
        .unwrap()
        .unwrap();
    let err = codec
        .decode(Some(unknown.as_slice()), &mut point, V4)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::FieldNotFound { field, .. } if field == "w"
    ));
}

#[test]
fn test_udt_inside_list() {
    let codec = new_codec(&DataType::list(address_type())).unwrap();
    let addresses = vec![sample_address(), Address::default()];
    let bytes = codec.encode(&addresses, V4).unwrap().unwrap();

    let mut decoded: Vec<Address> = Vec::new();
    codec.decode(Some(bytes.as_slice()), &mut decoded, V4).unwrap();
    assert_eq!(decoded, addresses);
}
