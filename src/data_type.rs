use std::{
    fmt::{self, Display},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Native protocol type codes, as written in result metadata.
#[repr(u16)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum DataTypeCode {
    Custom = 0x0000,
    Ascii = 0x0001,
    Bigint = 0x0002,
    Blob = 0x0003,
    Boolean = 0x0004,
    Counter = 0x0005,
    Decimal = 0x0006,
    Double = 0x0007,
    Float = 0x0008,
    Int = 0x0009,
    Timestamp = 0x000B,
    Uuid = 0x000C,
    Varchar = 0x000D,
    Varint = 0x000E,
    Timeuuid = 0x000F,
    Inet = 0x0010,
    Date = 0x0011,
    Time = 0x0012,
    Smallint = 0x0013,
    Tinyint = 0x0014,
    Duration = 0x0015,
    List = 0x0020,
    Map = 0x0021,
    Set = 0x0022,
    Udt = 0x0030,
    Tuple = 0x0031,
}

impl DataTypeCode {
    /// Returns `true` for the single-valued wire types.
    pub const fn is_primitive(self) -> bool {
        !self.is_composite() && !matches!(self, Self::Custom)
    }

    /// Returns `true` for list, set and map.
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Set)
    }

    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            Self::List | Self::Map | Self::Set | Self::Udt | Self::Tuple
        )
    }
}

/// A user-defined type: keyspace, name and ordered fields.
///
/// Field order is the wire order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserDefinedType {
    pub keyspace: String,
    pub name: String,
    pub fields: Vec<(String, DataType)>,
}

/// The logical type of a CQL value.
///
/// Descriptors are immutable trees; codecs are built from them once and
/// never change them.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    /// A server-side custom type, identified by its class name.
    Custom(String),
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
    List(Box<DataType>),
    Set(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Tuple(Vec<DataType>),
    Udt(UserDefinedType),
}

impl DataType {
    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn set(element: DataType) -> Self {
        DataType::Set(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    pub fn tuple(elements: impl IntoIterator<Item = DataType>) -> Self {
        DataType::Tuple(elements.into_iter().collect())
    }

    /// Builds a user-defined type from `(field name, field type)` pairs.
    ///
    /// ```
    /// use cql_codec::DataType;
    ///
    /// let address = DataType::udt(
    ///     "shop",
    ///     "address",
    ///     [("street", DataType::Varchar), ("zip", DataType::Int)],
    /// );
    /// assert_eq!(address.to_string(), "shop.address");
    /// ```
    pub fn udt<N: Into<String>>(
        keyspace: impl Into<String>,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (N, DataType)>,
    ) -> Self {
        DataType::Udt(UserDefinedType {
            keyspace: keyspace.into(),
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(field, data_type)| (field.into(), data_type))
                .collect(),
        })
    }

    pub const fn code(&self) -> DataTypeCode {
        match self {
            DataType::Ascii => DataTypeCode::Ascii,
            DataType::Bigint => DataTypeCode::Bigint,
            DataType::Blob => DataTypeCode::Blob,
            DataType::Boolean => DataTypeCode::Boolean,
            DataType::Counter => DataTypeCode::Counter,
            DataType::Custom(_) => DataTypeCode::Custom,
            DataType::Date => DataTypeCode::Date,
            DataType::Decimal => DataTypeCode::Decimal,
            DataType::Double => DataTypeCode::Double,
            DataType::Duration => DataTypeCode::Duration,
            DataType::Float => DataTypeCode::Float,
            DataType::Inet => DataTypeCode::Inet,
            DataType::Int => DataTypeCode::Int,
            DataType::Smallint => DataTypeCode::Smallint,
            DataType::Time => DataTypeCode::Time,
            DataType::Timestamp => DataTypeCode::Timestamp,
            DataType::Timeuuid => DataTypeCode::Timeuuid,
            DataType::Tinyint => DataTypeCode::Tinyint,
            DataType::Uuid => DataTypeCode::Uuid,
            DataType::Varchar => DataTypeCode::Varchar,
            DataType::Varint => DataTypeCode::Varint,
            DataType::List(_) => DataTypeCode::List,
            DataType::Set(_) => DataTypeCode::Set,
            DataType::Map(..) => DataTypeCode::Map,
            DataType::Tuple(_) => DataTypeCode::Tuple,
            DataType::Udt(_) => DataTypeCode::Udt,
        }
    }

    fn primitive_from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ascii" => DataType::Ascii,
            "bigint" => DataType::Bigint,
            "blob" => DataType::Blob,
            "boolean" => DataType::Boolean,
            "counter" => DataType::Counter,
            "date" => DataType::Date,
            "decimal" => DataType::Decimal,
            "double" => DataType::Double,
            "duration" => DataType::Duration,
            "float" => DataType::Float,
            "inet" => DataType::Inet,
            "int" => DataType::Int,
            "smallint" => DataType::Smallint,
            "text" | "varchar" => DataType::Varchar,
            "time" => DataType::Time,
            "timestamp" => DataType::Timestamp,
            "timeuuid" => DataType::Timeuuid,
            "tinyint" => DataType::Tinyint,
            "uuid" => DataType::Uuid,
            "varint" => DataType::Varint,
            _ => return None,
        })
    }
}

impl Display for DataType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Ascii => "ascii",
            DataType::Bigint => "bigint",
            DataType::Blob => "blob",
            DataType::Boolean => "boolean",
            DataType::Counter => "counter",
            DataType::Date => "date",
            DataType::Decimal => "decimal",
            DataType::Double => "double",
            DataType::Duration => "duration",
            DataType::Float => "float",
            DataType::Inet => "inet",
            DataType::Int => "int",
            DataType::Smallint => "smallint",
            DataType::Time => "time",
            DataType::Timestamp => "timestamp",
            DataType::Timeuuid => "timeuuid",
            DataType::Tinyint => "tinyint",
            DataType::Uuid => "uuid",
            DataType::Varchar => "varchar",
            DataType::Varint => "varint",
            DataType::Custom(class) => return write!(formatter, "'{class}'"),
            DataType::List(element) => return write!(formatter, "list<{element}>"),
            DataType::Set(element) => return write!(formatter, "set<{element}>"),
            DataType::Map(key, value) => return write!(formatter, "map<{key}, {value}>"),
            DataType::Tuple(elements) => {
                formatter.write_str("tuple<")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                return formatter.write_str(">");
            }
            DataType::Udt(udt) => return write!(formatter, "{}.{}", udt.keyspace, udt.name),
        };
        formatter.write_str(name)
    }
}

/// Parses CQL type syntax such as `map<int, frozen<list<text>>>`.
///
/// User-defined types cannot be named this way since their fields are not
/// part of the syntax; build them with [`DataType::udt`].
impl FromStr for DataType {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        parse_type(input.trim())
    }
}

fn parse_type(input: &str) -> Result<DataType> {
    let invalid = || Error::InvalidTypeName(input.to_string());
    if let Some(class) = input
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Ok(DataType::Custom(class.to_string()));
    }
    let (name, arguments) = match input.find('<') {
        Some(open) => {
            let inner = input[open + 1..].strip_suffix('>').ok_or_else(invalid)?;
            (input[..open].trim(), Some(split_arguments(inner).ok_or_else(invalid)?))
        }
        None => (input, None),
    };
    let name = name.to_ascii_lowercase();
    match (name.as_str(), arguments.as_deref()) {
        ("frozen", Some([inner])) => parse_type(inner),
        ("list", Some([element])) => Ok(DataType::list(parse_type(element)?)),
        ("set", Some([element])) => Ok(DataType::set(parse_type(element)?)),
        ("map", Some([key, value])) => Ok(DataType::map(parse_type(key)?, parse_type(value)?)),
        ("tuple", Some(elements)) if !elements.is_empty() => Ok(DataType::Tuple(
            elements
                .iter()
                .map(|element| parse_type(element))
                .collect::<Result<_>>()?,
        )),
        (primitive, None) => DataType::primitive_from_name(primitive).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Splits `a, b<c, d>, e` at the commas that are not nested.
fn split_arguments(input: &str) -> Option<Vec<&str>> {
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '<' if !quoted => depth += 1,
            '>' if !quoted => depth = depth.checked_sub(1)?,
            ',' if !quoted && depth == 0 => {
                arguments.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quoted {
        return None;
    }
    arguments.push(input[start..].trim());
    if arguments.iter().any(|argument| argument.is_empty()) {
        return None;
    }
    Some(arguments)
}
