//! Error types for encoding and decoding CQL values.
//!
//! Every failure surfaces as an [`Error`]. Composite codecs wrap the errors
//! of their children with the position that failed, and every codec wraps
//! the result once more with the native type, CQL type and protocol version
//! involved, so a failure deep inside a nested value reads as a path:
//!
//! ```text
//! cannot encode Vec<i64> as CQL list<int> with protocol v4: cannot encode element 1:
//! cannot encode i64 as CQL int with protocol v4: value out of range: 4294967296
//! ```

use std::fmt::{self, Display};

use thiserror::Error;

use crate::ProtocolVersion;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which way a value was travelling when a nested error happened.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Encode,
    Decode,
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        })
    }
}

/// All errors that can occur while encoding or decoding CQL values.
#[derive(Debug, Error)]
pub enum Error {
    /// Outermost wrapper added by every codec on encode.
    #[error("cannot encode {native} as CQL {data_type} with {version}: {source}")]
    Encode {
        native: &'static str,
        data_type: String,
        version: ProtocolVersion,
        source: Box<Error>,
    },

    /// Outermost wrapper added by every codec on decode.
    #[error("cannot decode CQL {data_type} as {native} with {version}: {source}")]
    Decode {
        data_type: String,
        native: &'static str,
        version: ProtocolVersion,
        source: Box<Error>,
    },

    #[error("cannot {operation} element {index}: {source}")]
    Element {
        operation: Operation,
        index: usize,
        source: Box<Error>,
    },

    #[error("cannot {operation} map key {index}: {source}")]
    MapKey {
        operation: Operation,
        index: usize,
        source: Box<Error>,
    },

    #[error("cannot {operation} map value {index}: {source}")]
    MapValue {
        operation: Operation,
        index: usize,
        source: Box<Error>,
    },

    #[error("cannot {operation} field {field}: {source}")]
    Field {
        operation: Operation,
        field: String,
        source: Box<Error>,
    },

    /// The native source has no mapping to the codec's canonical value.
    #[error("conversion not supported: cannot convert from {0}")]
    UnsupportedSource(&'static str),

    /// The decoded value has no mapping to the requested destination.
    #[error("conversion not supported: cannot convert to {0}")]
    UnsupportedDestination(&'static str),

    /// A numeric or calendar conversion would lose information.
    ///
    /// Carries the rejected value's textual form.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("cannot parse '{input}': {reason}")]
    CannotParse { input: String, reason: String },

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("expected {expected} bytes but got: {actual}")]
    WrongFixedLength { expected: usize, actual: usize },

    #[error("expected at least {expected} bytes but got: {actual}")]
    WrongMinimumLength { expected: usize, actual: usize },

    #[error("expected 4 or 16 bytes but got: {0}")]
    InvalidInetLength(usize),

    /// A length-prefixed read ran past the end of the source.
    #[error("cannot read {what}: expected {expected} bytes but only {remaining} remaining")]
    UnexpectedEof {
        what: &'static str,
        expected: usize,
        remaining: usize,
    },

    /// Bytes were left over after a complete value was read.
    #[error("source was not fully read: {0} bytes remaining")]
    BytesRemaining(usize),

    #[error("invalid collection size: {0}")]
    InvalidSize(i64),

    #[error("collection too large: {0} elements")]
    CollectionTooLarge(usize),

    #[error("expected {expected} elements but got: {actual}")]
    WrongElementCount { expected: usize, actual: usize },

    #[error("index out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no accessible field with name '{field}' found in {record}")]
    FieldNotFound { record: &'static str, field: String },

    #[error("no accessible field with index {index} found in {record}")]
    FieldIndexNotFound { record: &'static str, index: usize },

    #[error("map key must be a string")]
    KeyMustBeString,

    #[error("element {0} is nil")]
    NilElement(usize),

    #[error("element {0} was encoded to nil")]
    ElementEncodedToNil(usize),

    #[error("map key {0} is nil")]
    NilMapKey(usize),

    #[error("map value {0} is nil")]
    NilMapValue(usize),

    #[error("data type {data_type} not supported in {version}")]
    DataTypeNotSupported {
        data_type: String,
        version: ProtocolVersion,
    },

    #[error("cannot create codec for CQL type {0}")]
    InvalidCodec(String),

    #[error("invalid CQL type name '{0}'")]
    InvalidTypeName(String),

    #[error("unsupported protocol version: {0:#04x}")]
    UnsupportedProtocolVersion(u8),

    /// Checked 64-bit arithmetic overflowed.
    #[error("{0} overflow")]
    Overflow(&'static str),
}

impl Error {
    pub(crate) fn out_of_range(value: impl Display) -> Self {
        Error::OutOfRange(value.to_string())
    }

    pub(crate) fn cannot_parse(input: &str, reason: impl Display) -> Self {
        Error::CannotParse {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn in_element(self, operation: Operation, index: usize) -> Self {
        Error::Element {
            operation,
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_map_key(self, operation: Operation, index: usize) -> Self {
        Error::MapKey {
            operation,
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_map_value(self, operation: Operation, index: usize) -> Self {
        Error::MapValue {
            operation,
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_field(self, operation: Operation, field: &str) -> Self {
        Error::Field {
            operation,
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error of a wrapped chain.
    ///
    /// ```
    /// use cql_codec::{Error, ProtocolVersion, new_codec, DataType};
    ///
    /// let codec = new_codec(&DataType::Bigint).unwrap();
    /// let err = codec.encode(&u64::MAX, ProtocolVersion::V4).unwrap_err();
    /// assert!(matches!(err.root_cause(), Error::OutOfRange(_)));
    /// ```
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Encode { source, .. }
            | Error::Decode { source, .. }
            | Error::Element { source, .. }
            | Error::MapKey { source, .. }
            | Error::MapValue { source, .. }
            | Error::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
