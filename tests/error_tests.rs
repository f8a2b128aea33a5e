//! Tests for the Error type

use cql_codec::{DataType, Error, Operation, ProtocolVersion, new_codec};

#[test]
fn test_error_display_out_of_range() {
    let error = Error::OutOfRange("300".into());
    assert_eq!(format!("{}", error), "value out of range: 300");
}

#[test]
fn test_error_display_bytes_remaining() {
    let error = Error::BytesRemaining(42);
    assert_eq!(
        format!("{}", error),
        "source was not fully read: 42 bytes remaining"
    );
}

#[test]
fn test_error_display_conversions() {
    assert_eq!(
        Error::UnsupportedSource("bool").to_string(),
        "conversion not supported: cannot convert from bool"
    );
    assert_eq!(
        Error::UnsupportedDestination("Ipv4Addr").to_string(),
        "conversion not supported: cannot convert to Ipv4Addr"
    );
}

#[test]
fn test_error_display_lengths() {
    assert_eq!(
        Error::WrongFixedLength {
            expected: 8,
            actual: 3
        }
        .to_string(),
        "expected 8 bytes but got: 3"
    );
    assert_eq!(
        Error::InvalidInetLength(5).to_string(),
        "expected 4 or 16 bytes but got: 5"
    );
    assert_eq!(
        Error::UnexpectedEof {
            what: "element",
            expected: 4,
            remaining: 1
        }
        .to_string(),
        "cannot read element: expected 4 bytes but only 1 remaining"
    );
}

#[test]
fn test_error_display_nested() {
    let error = Error::Field {
        operation: Operation::Decode,
        field: "zip".into(),
        source: Box::new(Error::Element {
            operation: Operation::Decode,
            index: 3,
            source: Box::new(Error::BytesRemaining(1)),
        }),
    };
    assert_eq!(
        error.to_string(),
        "cannot decode field zip: cannot decode element 3: source was not fully read: 1 bytes remaining"
    );
    assert!(matches!(error.root_cause(), Error::BytesRemaining(1)));
}

#[test]
fn test_error_display_codec_wrapper() {
    let codec = new_codec(&DataType::Int).unwrap();
    let err = codec.encode(&i64::MAX, ProtocolVersion::V4).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot encode i64 as CQL int with protocol v4: value out of range: 9223372036854775807"
    );

    let mut decoded = 0i16;
    let err = codec
        .decode(Some(&[0, 1, 0, 0]), &mut decoded, ProtocolVersion::V4)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot decode CQL int as i16 with protocol v4: value out of range: 65536"
    );
}

#[test]
fn test_error_display_version() {
    let codec = new_codec(&DataType::Duration).unwrap();
    let err = codec
        .encode(&cql_codec::CqlDuration::new(1, 2, 3), ProtocolVersion::V4)
        .unwrap_err();
    assert!(
        err.to_string()
            .ends_with("data type duration not supported in protocol v4"),
        "{err}"
    );
}

#[test]
fn test_error_debug() {
    let error = Error::KeyMustBeString;
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("KeyMustBeString"));
}

#[test]
fn test_error_from_utf8() {
    let invalid = [0xffu8, 0xfe];
    let utf8 = std::str::from_utf8(&invalid).unwrap_err();
    let error: Error = utf8.into();
    assert!(matches!(error, Error::InvalidUtf8(_)));
    assert!(error.to_string().starts_with("invalid UTF-8"));
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<Error>();
}

#[test]
fn test_result_type() {
    let ok_result: cql_codec::Result<i32> = Ok(42);
    assert_eq!(ok_result.unwrap(), 42);

    let err_result: cql_codec::Result<i32> = Err(Error::NilElement(0));
    assert!(err_result.is_err());
}
