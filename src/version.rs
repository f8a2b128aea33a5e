use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DataType, Error};

/// A negotiated native protocol version.
///
/// The version decides which CQL types may be encoded at all and how wide
/// collection sizes and collection element lengths are on the wire.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProtocolVersion {
    V2 = 0x02,
    V3 = 0x03,
    V4 = 0x04,
    V5 = 0x05,
    DseV1 = 0x41,
    DseV2 = 0x42,
}

impl ProtocolVersion {
    /// Every version this crate knows, oldest first.
    pub const ALL: [ProtocolVersion; 6] = [
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::DseV1,
        Self::DseV2,
    ];

    pub const fn is_dse(self) -> bool {
        matches!(self, Self::DseV1 | Self::DseV2)
    }

    /// `true` when collection sizes and element lengths are 4 bytes wide.
    ///
    /// Protocol v2 uses 2-byte sizes and `[short bytes]` elements.
    pub const fn uses_4_byte_collection_length(self) -> bool {
        !matches!(self, Self::V2)
    }

    /// `date`, `time`, `smallint` and `tinyint` arrived with v4.
    pub const fn supports_v4_types(self) -> bool {
        matches!(self, Self::V4 | Self::V5 | Self::DseV1 | Self::DseV2)
    }

    pub const fn supports_duration(self) -> bool {
        matches!(self, Self::V5 | Self::DseV2)
    }

    pub const fn supports_tuples_and_udts(self) -> bool {
        !matches!(self, Self::V2)
    }

    /// Returns `true` if `data_type` and every type nested inside it can be
    /// used with this version.
    ///
    /// # Example
    ///
    /// ```
    /// use cql_codec::{DataType, ProtocolVersion};
    ///
    /// let nested = DataType::list(DataType::Smallint);
    /// assert!(ProtocolVersion::V4.supports(&nested));
    /// assert!(!ProtocolVersion::V3.supports(&nested));
    /// ```
    pub fn supports(self, data_type: &DataType) -> bool {
        match data_type {
            DataType::Date | DataType::Time | DataType::Smallint | DataType::Tinyint => {
                self.supports_v4_types()
            }
            DataType::Duration => self.supports_duration(),
            DataType::List(element) | DataType::Set(element) => self.supports(element),
            DataType::Map(key, value) => self.supports(key) && self.supports(value),
            DataType::Tuple(elements) => {
                self.supports_tuples_and_udts() && elements.iter().all(|e| self.supports(e))
            }
            DataType::Udt(udt) => {
                self.supports_tuples_and_udts()
                    && udt.fields.iter().all(|(_, field)| self.supports(field))
            }
            _ => true,
        }
    }
}

impl TryFrom<u8> for ProtocolVersion {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        ProtocolVersion::ALL
            .into_iter()
            .find(|version| *version as u8 == value)
            .ok_or(Error::UnsupportedProtocolVersion(value))
    }
}

impl Display for ProtocolVersion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DseV1 => formatter.write_str("DSE protocol v1"),
            Self::DseV2 => formatter.write_str("DSE protocol v2"),
            other => write!(formatter, "protocol v{}", *other as u8),
        }
    }
}
