//! Tests for the single-valued codecs

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use cql_codec::codec::{
    ASCII, BIGINT, BLOB, BOOLEAN, BlobCodec, COUNTER, DATE, DECIMAL, DOUBLE, DURATION, DateCodec,
    FLOAT, INET, INT, SMALLINT, TIME, TIMESTAMP, TIMEUUID, TINYINT, UUID, VARCHAR, VARINT,
    encode_varint,
};
use cql_codec::{
    Codec, CqlDecimal, CqlDuration, DataType, Encodable, Error, ProtocolVersion, Value,
};
use num_bigint::BigInt;
use uuid::Uuid;

const V4: ProtocolVersion = ProtocolVersion::V4;
const V5: ProtocolVersion = ProtocolVersion::V5;

fn encode(codec: &dyn Codec, source: &dyn cql_codec::Encodable) -> Vec<u8> {
    codec.encode(source, V4).unwrap().unwrap()
}

fn decode<T: cql_codec::Decodable>(codec: &dyn Codec, bytes: &[u8]) -> T {
    let mut dest = T::zero();
    codec.decode(Some(bytes), &mut dest, V4).unwrap();
    dest
}

#[test]
fn test_integer_widths() {
    assert_eq!(encode(&INT, &-2i32), [0xff, 0xff, 0xff, 0xfe]);
    assert_eq!(encode(&SMALLINT, &258i16), [0x01, 0x02]);
    assert_eq!(encode(&TINYINT, &-5i8), [0xfb]);
    assert_eq!(encode(&COUNTER, &7u8), [0, 0, 0, 0, 0, 0, 0, 7]);

    assert_eq!(decode::<i32>(&INT, &[0xff, 0xff, 0xff, 0xfe]), -2);
    assert_eq!(decode::<i64>(&SMALLINT, &[0x01, 0x02]), 258);
    assert_eq!(decode::<u16>(&TINYINT, &[0x7f]), 127);
}

#[test]
fn test_integer_from_other_sources() {
    assert_eq!(encode(&INT, &"-17"), encode(&INT, &-17i32));
    assert_eq!(encode(&BIGINT, &BigInt::from(300)), encode(&BIGINT, &300i64));
    assert_eq!(encode(&TINYINT, &100u64), [100]);
    assert_eq!(decode::<String>(&INT, &[0, 0, 1, 0]), "256");
    assert_eq!(decode::<BigInt>(&BIGINT, &[0xff; 8]), BigInt::from(-1));
}

#[test]
fn test_integer_narrowing_errors() {
    let err = SMALLINT.encode(&70000i32, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(v) if v == "70000"));

    let err = INT.encode(&"12x", V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::CannotParse { input, .. } if input == "12x"));

    let err = INT.encode(&"9999999999", V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(_)));

    let mut small = 0u8;
    let err = INT.decode(Some(&[0, 0, 1, 0]), &mut small, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(v) if v == "256"));

    let mut unsigned = 0u32;
    let err = INT.decode(Some(&[0xff; 4]), &mut unsigned, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(v) if v == "-1"));
}

fn out_of_range_text(err: Error) -> String {
    match err.root_cause() {
        Error::OutOfRange(text) => text.clone(),
        other => panic!("expected an out of range error, got: {other}"),
    }
}

// Encodes each edge of `[min, max]` and its outer neighbours from every
// integer source that can hold the value.
fn assert_source_bounds(codec: &dyn Codec, min: i64, max: i64) {
    let one = BigInt::from(1);
    let (min, max) = (BigInt::from(min), BigInt::from(max));
    for value in [&min - &one, min.clone(), max.clone(), &max + &one] {
        let mut sources: Vec<Box<dyn Encodable>> = vec![Box::new(value.clone())];
        if let Ok(v) = i8::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = i16::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = i32::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = i64::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = u8::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = u16::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = u32::try_from(&value) {
            sources.push(Box::new(v));
        }
        if let Ok(v) = u64::try_from(&value) {
            sources.push(Box::new(v));
        }

        let fits = value >= min && value <= max;
        let expected = codec.encode(&value, V4);
        for source in &sources {
            let result = codec.encode(&**source, V4);
            if fits {
                assert_eq!(result.unwrap(), *expected.as_ref().unwrap(), "{value}");
            } else {
                assert_eq!(out_of_range_text(result.unwrap_err()), value.to_string());
            }
        }
    }
}

// Decodes each edge of `T` and its outer neighbours from varint bytes and,
// when the value fits, from bigint bytes.
fn assert_destination_bounds<T>(min: T, max: T)
where
    T: cql_codec::Decodable + Into<BigInt> + Copy + PartialEq + std::fmt::Debug,
{
    let one = BigInt::from(1);
    let (low, high): (BigInt, BigInt) = (min.into(), max.into());

    for (edge, expected) in [(&low, min), (&high, max)] {
        let mut dest = T::zero();
        VARINT
            .decode(Some(encode_varint(edge).as_slice()), &mut dest, V4)
            .unwrap();
        assert_eq!(dest, expected);
        if let Ok(wide) = i64::try_from(edge) {
            let mut dest = T::zero();
            BIGINT
                .decode(Some(&wide.to_be_bytes()[..]), &mut dest, V4)
                .unwrap();
            assert_eq!(dest, expected);
        }
    }

    for beyond in [&low - &one, &high + &one] {
        let mut dest = T::zero();
        let err = VARINT
            .decode(Some(encode_varint(&beyond).as_slice()), &mut dest, V4)
            .unwrap_err();
        assert_eq!(out_of_range_text(err), beyond.to_string());
        if let Ok(wide) = i64::try_from(&beyond) {
            let err = BIGINT
                .decode(Some(&wide.to_be_bytes()[..]), &mut dest, V4)
                .unwrap_err();
            assert_eq!(out_of_range_text(err), beyond.to_string());
        }
    }
}

#[test]
fn test_integer_source_bounds() {
    assert_source_bounds(&TINYINT, i8::MIN.into(), i8::MAX.into());
    assert_source_bounds(&SMALLINT, i16::MIN.into(), i16::MAX.into());
    assert_source_bounds(&INT, i32::MIN.into(), i32::MAX.into());
    assert_source_bounds(&BIGINT, i64::MIN, i64::MAX);

    let err = TINYINT.encode(&128u8, V4).unwrap_err();
    assert_eq!(out_of_range_text(err), "128");
    let err = SMALLINT.encode(&-32769i32, V4).unwrap_err();
    assert_eq!(out_of_range_text(err), "-32769");
    let err = INT.encode(&2147483648u32, V4).unwrap_err();
    assert_eq!(out_of_range_text(err), "2147483648");
    let err = BIGINT.encode(&(i64::MAX as u64 + 1), V4).unwrap_err();
    assert_eq!(out_of_range_text(err), "9223372036854775808");
}

#[test]
fn test_integer_destination_bounds() {
    assert_destination_bounds(i8::MIN, i8::MAX);
    assert_destination_bounds(i16::MIN, i16::MAX);
    assert_destination_bounds(i32::MIN, i32::MAX);
    assert_destination_bounds(i64::MIN, i64::MAX);
    assert_destination_bounds(u8::MIN, u8::MAX);
    assert_destination_bounds(u16::MIN, u16::MAX);
    assert_destination_bounds(u32::MIN, u32::MAX);
    assert_destination_bounds(u64::MIN, u64::MAX);

    let mut wide = 0u64;
    let err = VARINT
        .decode(Some(&[0x01, 0, 0, 0, 0, 0, 0, 0, 0]), &mut wide, V4)
        .unwrap_err();
    assert_eq!(out_of_range_text(err), "18446744073709551616");

    let mut narrow = 0i64;
    let below_min = [0xff, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    let err = VARINT
        .decode(Some(&below_min), &mut narrow, V4)
        .unwrap_err();
    assert_eq!(out_of_range_text(err), "-9223372036854775809");
}

#[test]
fn test_integer_wrong_length() {
    let mut value = 0i32;
    let err = INT.decode(Some(&[0, 0, 1]), &mut value, V4).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongFixedLength {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn test_unsupported_conversions() {
    let err = INT.encode(&true, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::UnsupportedSource("bool")));

    let mut flag = false;
    let err = INT.decode(Some(&[0, 0, 0, 1]), &mut flag, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::UnsupportedDestination("bool")));
}

#[test]
fn test_v4_types_are_gated() {
    for codec in [&SMALLINT as &dyn Codec, &TINYINT, &DATE, &TIME] {
        let err = codec.encode(&1i8, ProtocolVersion::V3).unwrap_err();
        assert!(
            matches!(err.root_cause(), Error::DataTypeNotSupported { .. }),
            "{err}"
        );
    }
    let err = DURATION
        .encode(&CqlDuration::new(1, 0, 0), V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::DataTypeNotSupported { .. }));
}

#[test]
fn test_float_and_double() {
    assert_eq!(encode(&FLOAT, &0.5f32), [0x3f, 0x00, 0x00, 0x00]);
    assert_eq!(encode(&FLOAT, &0.5f64), [0x3f, 0x00, 0x00, 0x00]);
    assert_eq!(encode(&DOUBLE, &1.0f32), [0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);

    let err = FLOAT.encode(&0.1f64, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(_)));

    assert_eq!(decode::<f64>(&FLOAT, &[0x3f, 0x00, 0x00, 0x00]), 0.5);
    assert_eq!(decode::<f32>(&DOUBLE, &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]), 1.0);

    let tenth = encode(&DOUBLE, &0.1f64);
    let mut narrow = 0f32;
    assert!(DOUBLE.decode(Some(tenth.as_slice()), &mut narrow, V4).is_err());

    let nan: f32 = decode(&FLOAT, &encode(&FLOAT, &f64::NAN));
    assert!(nan.is_nan());
}

#[test]
fn test_boolean() {
    assert_eq!(encode(&BOOLEAN, &true), [1]);
    assert_eq!(encode(&BOOLEAN, &false), [0]);
    assert!(decode::<bool>(&BOOLEAN, &[2]));
    assert!(!decode::<bool>(&BOOLEAN, &[0]));
}

#[test]
fn test_blob_and_strings() {
    assert_eq!(encode(&BLOB, &vec![1u8, 2, 3]), [1, 2, 3]);
    assert_eq!(encode(&BLOB, &"hi"), b"hi");
    assert_eq!(decode::<Vec<u8>>(&BLOB, &[9, 8]), [9, 8]);
    assert_eq!(decode::<[u8; 2]>(&BLOB, &[9, 8]), [9, 8]);
    assert_eq!(decode::<String>(&BLOB, b"text"), "text");

    let mut short = [0u8; 3];
    let err = BLOB.decode(Some(&[1, 2]), &mut short, V4).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongFixedLength {
            expected: 3,
            actual: 2
        }
    ));

    assert_eq!(encode(&VARCHAR, &"héllo"), "héllo".as_bytes());
    assert_eq!(encode(&ASCII, &String::from("abc")), b"abc");
    assert_eq!(decode::<String>(&VARCHAR, "héllo".as_bytes()), "héllo");
    assert_eq!(decode::<Vec<u8>>(&VARCHAR, b"raw"), b"raw");

    let mut text = String::new();
    let err = VARCHAR.decode(Some(&[0xff, 0xfe]), &mut text, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::InvalidUtf8(_)));
}

#[cfg(feature = "bytes")]
#[test]
fn test_blob_shared_bytes() {
    let source = bytes::Bytes::from_static(b"\x01\x02");
    assert_eq!(encode(&BLOB, &source), [1, 2]);
    assert_eq!(decode::<bytes::Bytes>(&BLOB, &[3, 4]), bytes::Bytes::from_static(b"\x03\x04"));
}

#[test]
fn test_custom_type_passes_bytes_through() {
    let codec = BlobCodec::custom("org.example.Point");
    assert_eq!(
        codec.data_type(),
        &DataType::Custom("org.example.Point".to_string())
    );
    assert_eq!(encode(&codec, &vec![0xde_u8, 0xad]), [0xde, 0xad]);
}

#[test]
fn test_uuid() {
    let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
    let bytes = encode(&UUID, &id);
    assert_eq!(bytes, id.as_bytes());
    assert_eq!(encode(&TIMEUUID, &"550e8400-e29b-41d4-a716-446655440000"), bytes);
    assert_eq!(decode::<Uuid>(&UUID, &bytes), id);
    assert_eq!(
        decode::<String>(&UUID, &bytes),
        "550e8400-e29b-41d4-a716-446655440000"
    );

    // arrays take what fits
    let head: [u8; 4] = decode(&UUID, &bytes);
    assert_eq!(head, [0x55, 0x0e, 0x84, 0x00]);

    let err = UUID.encode(&vec![0u8; 15], V4).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongFixedLength {
            expected: 16,
            actual: 15
        }
    ));

    let mut out = Uuid::nil();
    assert!(UUID.decode(Some(&bytes[..15]), &mut out, V4).is_err());
}

#[test]
fn test_inet() {
    assert_eq!(encode(&INET, &"192.168.0.1"), [192, 168, 0, 1]);
    assert_eq!(encode(&INET, &Ipv6Addr::LOCALHOST).len(), 16);

    let ip: IpAddr = decode(&INET, &[10, 0, 0, 1]);
    assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    let mapped: Ipv6Addr = decode(&INET, &[10, 0, 0, 1]);
    assert_eq!(mapped, Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped());

    let back: Ipv4Addr = decode(&INET, &mapped.octets());
    assert_eq!(back, Ipv4Addr::new(10, 0, 0, 1));

    let mut v4 = Ipv4Addr::UNSPECIFIED;
    let err = INET
        .decode(Some(&Ipv6Addr::LOCALHOST.octets()), &mut v4, V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(_)));

    let mut ip = IpAddr::from(Ipv4Addr::UNSPECIFIED);
    let err = INET.decode(Some(&[1, 2, 3]), &mut ip, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::InvalidInetLength(3)));
}

#[test]
fn test_date_conversions() {
    let epoch = [0x80, 0, 0, 0];
    assert_eq!(encode(&DATE, &NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), epoch);
    assert_eq!(encode(&DATE, &"1970-01-02"), [0x80, 0, 0, 1]);
    assert_eq!(encode(&DATE, &-1i32), [0x7f, 0xff, 0xff, 0xff]);

    let before_epoch = DateTime::<Utc>::from_timestamp(-1, 0).unwrap();
    assert_eq!(encode(&DATE, &before_epoch), [0x7f, 0xff, 0xff, 0xff]);

    assert_eq!(decode::<String>(&DATE, &[0x80, 0, 0, 1]), "1970-01-02");
    assert_eq!(decode::<i64>(&DATE, &[0x7f, 0xff, 0xff, 0xff]), -1);

    let midnight: DateTime<Utc> = decode(&DATE, &[0x80, 0, 0, 1]);
    assert_eq!(midnight.timestamp(), 86_400);

    let slashed = DateCodec::with_layout("%d/%m/%Y");
    assert_eq!(encode(&slashed, &"02/01/1970"), [0x80, 0, 0, 1]);
    assert_eq!(decode::<String>(&slashed, &[0x80, 0, 0, 1]), "02/01/1970");

    let err = DATE.encode(&"1970/01/02", V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::CannotParse { .. }));
}

#[test]
fn test_time() {
    let time = NaiveTime::from_hms_milli_opt(12, 34, 56, 789).unwrap();
    let nanos: i64 = 45_296_789_000_000;
    let bytes = encode(&TIME, &time);
    assert_eq!(bytes, nanos.to_be_bytes());
    assert_eq!(encode(&TIME, &"12:34:56.789"), bytes);
    assert_eq!(encode(&TIME, &TimeDelta::nanoseconds(nanos)), bytes);

    assert_eq!(decode::<NaiveTime>(&TIME, &bytes), time);
    assert_eq!(decode::<i64>(&TIME, &bytes), nanos);
    assert_eq!(decode::<String>(&TIME, &bytes), "12:34:56.789");

    let err = TIME.encode(&86_400_000_000_000i64, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(_)));

    let mut out = NaiveTime::default();
    let err = TIME
        .decode(Some(&(-1i64).to_be_bytes()), &mut out, V4)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(v) if v == "-1"));
}

#[test]
fn test_timestamp() {
    let instant = DateTime::<Utc>::from_timestamp_millis(1_633_996_800_123).unwrap();
    let bytes = encode(&TIMESTAMP, &instant);
    assert_eq!(bytes, 1_633_996_800_123i64.to_be_bytes());
    assert_eq!(encode(&TIMESTAMP, &"2021-10-12T00:00:00.123+00:00"), bytes);
    assert_eq!(encode(&TIMESTAMP, &"2021-10-12T02:00:00.123+02:00"), bytes);
    assert_eq!(encode(&TIMESTAMP, &instant.naive_utc()), bytes);

    assert_eq!(decode::<DateTime<Utc>>(&TIMESTAMP, &bytes), instant);
    assert_eq!(decode::<i64>(&TIMESTAMP, &bytes), 1_633_996_800_123);
    assert_eq!(
        decode::<String>(&TIMESTAMP, &bytes),
        "2021-10-12T00:00:00.123+00:00"
    );
    assert_eq!(
        decode::<NaiveDateTime>(&TIMESTAMP, &bytes),
        instant.naive_utc()
    );

    // before the epoch, milliseconds round towards negative infinity
    let before = decode::<DateTime<Utc>>(&TIMESTAMP, &(-1i64).to_be_bytes());
    assert_eq!(before.timestamp(), -1);
    assert_eq!(before.timestamp_subsec_millis(), 999);
}

#[test]
fn test_duration() {
    let duration = CqlDuration::new(1, 2, 3);
    let bytes = DURATION.encode(&duration, V5).unwrap().unwrap();
    assert_eq!(bytes, [0x02, 0x04, 0x06]);

    let mut out = CqlDuration::default();
    DURATION.decode(Some(bytes.as_slice()), &mut out, V5).unwrap();
    assert_eq!(out, duration);
    assert_eq!(duration.to_string(), "1mo2d3ns");

    let mut delta = TimeDelta::zero();
    let err = DURATION
        .decode(Some(bytes.as_slice()), &mut delta, V5)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(_)));

    let nanos_only = DURATION
        .encode(&TimeDelta::nanoseconds(-3), V5)
        .unwrap()
        .unwrap();
    assert_eq!(nanos_only, [0x00, 0x00, 0x05]);
    DURATION
        .decode(Some(nanos_only.as_slice()), &mut delta, V5)
        .unwrap();
    assert_eq!(delta, TimeDelta::nanoseconds(-3));

    let err = DURATION
        .decode(Some(&[0x02, 0x04, 0x06, 0x00]), &mut out, V5)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::BytesRemaining(1)));
}

#[test]
fn test_decimal() {
    let decimal = CqlDecimal::new(12345, 2);
    let bytes = encode(&DECIMAL, &decimal);
    assert_eq!(bytes, [0, 0, 0, 2, 0x30, 0x39]);
    assert_eq!(decode::<CqlDecimal>(&DECIMAL, &bytes), decimal);
    assert_eq!(decimal.to_string(), "12345E-2");

    let mut out = CqlDecimal::default();
    let err = DECIMAL.decode(Some(&[0, 0, 0, 2]), &mut out, V4).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::WrongMinimumLength {
            expected: 5,
            actual: 4
        }
    ));
}

#[test]
fn test_varint_boundaries() {
    for (value, bytes) in [
        (0i64, vec![0x00]),
        (1, vec![0x01]),
        (127, vec![0x7f]),
        (128, vec![0x00, 0x80]),
        (-1, vec![0xff]),
        (-128, vec![0x80]),
        (-129, vec![0xff, 0x7f]),
        (256, vec![0x01, 0x00]),
    ] {
        assert_eq!(encode(&VARINT, &value), bytes, "{value}");
        assert_eq!(decode::<i64>(&VARINT, &bytes), value);
    }

    let mut small = 0i8;
    let err = VARINT.decode(Some(&[0x00, 0x80]), &mut small, V4).unwrap_err();
    assert!(matches!(err.root_cause(), Error::OutOfRange(v) if v == "128"));
}

#[test]
fn test_preferred_types() {
    let cases: [(&dyn Codec, Vec<u8>, Value); 8] = [
        (&BIGINT, vec![0, 0, 0, 0, 0, 0, 0, 5], Value::Bigint(5)),
        (&INT, vec![0, 0, 0, 5], Value::Int(5)),
        (&SMALLINT, vec![0, 5], Value::Smallint(5)),
        (&TINYINT, vec![5], Value::Tinyint(5)),
        (&BOOLEAN, vec![1], Value::Boolean(true)),
        (&VARCHAR, b"x".to_vec(), Value::Varchar("x".into())),
        (&BLOB, vec![7], Value::Blob(vec![7])),
        (&VARINT, vec![5], Value::Varint(BigInt::from(5))),
    ];
    for (codec, bytes, expected) in cases {
        let mut value = Value::Null;
        codec.decode(Some(bytes.as_slice()), &mut value, V4).unwrap();
        assert_eq!(value, expected, "{}", codec.data_type());
    }

    let mut value = Value::Null;
    TIME.decode(Some(&5i64.to_be_bytes()), &mut value, V4).unwrap();
    assert_eq!(value, Value::Time(TimeDelta::nanoseconds(5)));
}

#[test]
fn test_option_roundtrip() {
    assert_eq!(INT.encode(&None::<i32>, V4).unwrap(), None);
    assert_eq!(INT.encode(&Some(1i32), V4).unwrap(), Some(vec![0, 0, 0, 1]));

    let mut maybe: Option<i32> = None;
    assert!(!INT.decode(Some(&[0, 0, 0, 9]), &mut maybe, V4).unwrap());
    assert_eq!(maybe, Some(9));
    assert!(INT.decode(None, &mut maybe, V4).unwrap());
    assert_eq!(maybe, None);
}
