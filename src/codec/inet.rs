use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::{Codec, DataType, Error, ProtocolVersion, Result, Value, Visit, VisitMut};

/// `inet`: 4 bytes for IPv4, 16 for IPv6.
#[derive(Clone, Debug)]
pub struct InetCodec {
    data_type: DataType,
}

impl InetCodec {
    pub const fn new() -> Self {
        Self {
            data_type: DataType::Inet,
        }
    }
}

fn ip_from_bytes(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(Error::InvalidInetLength(bytes.len()))
}

fn octets(ip: IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(ip) => ip.octets().to_vec(),
        IpAddr::V6(ip) => ip.octets().to_vec(),
    }
}

fn to_ip(source: Visit<'_>) -> Result<IpAddr> {
    match source {
        Visit::Inet(ip) => Ok(ip),
        Visit::Str(text) => text.parse().map_err(|err| Error::cannot_parse(text, err)),
        Visit::Bytes(bytes) => ip_from_bytes(bytes),
        other => Err(Error::UnsupportedSource(other.kind())),
    }
}

fn from_ip(ip: IpAddr, dest: VisitMut<'_>) -> Result<()> {
    match dest {
        VisitMut::Inet(d) => *d = ip,
        VisitMut::Ipv4(d) => {
            *d = match ip {
                IpAddr::V4(ip) => ip,
                IpAddr::V6(v6) => v6.to_ipv4_mapped().ok_or_else(|| Error::out_of_range(v6))?,
            }
        }
        VisitMut::Ipv6(d) => {
            *d = match ip {
                IpAddr::V4(ip) => ip.to_ipv6_mapped(),
                IpAddr::V6(ip) => ip,
            }
        }
        VisitMut::String(d) => *d = ip.to_string(),
        VisitMut::Bytes(d) => *d = octets(ip),
        VisitMut::FixedBytes(d) => {
            let octets = octets(ip);
            if d.len() != octets.len() {
                return Err(Error::WrongFixedLength {
                    expected: d.len(),
                    actual: octets.len(),
                });
            }
            d.copy_from_slice(&octets);
        }
        VisitMut::Value(d) => *d = Value::Inet(ip),
        other => return Err(Error::UnsupportedDestination(other.kind())),
    }
    Ok(())
}

impl Codec for InetCodec {
    fn data_type(&self) -> &DataType {
        &self.data_type
    }

    fn encode_visit(&self, source: Visit<'_>, _: ProtocolVersion) -> Result<Option<Vec<u8>>> {
        to_ip(source).map(|ip| Some(octets(ip)))
    }

    fn decode_visit(&self, source: &[u8], dest: VisitMut<'_>, _: ProtocolVersion) -> Result<()> {
        from_ip(ip_from_bytes(source)?, dest)
    }
}

pub static INET: InetCodec = InetCodec::new();
