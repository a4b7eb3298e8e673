//! Address canonicalizer
//!
//! Every address the engine handles is stored in IPv6 space: IPv4 literals are
//! mapped to `::ffff:a.b.c.d` and IPv4 prefix lengths are offset by 96 bits.
//! Two textual forms come out of a canonical value:
//!
//! - the *canonical text*, fully expanded lowercase IPv6
//!   (`0000:0000:0000:0000:0000:ffff:c000:0201`), whose lexicographic order is
//!   the numeric order of the address;
//! - the *printable* form (`Display`), dotted-decimal for IPv4-mapped
//!   addresses and compressed IPv6 otherwise.

use crate::errors::{NetStateError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Canonical-text prefix shared by every IPv4-mapped address.
pub const IPV4_MAPPED_MARKER: &str = "0000:0000:0000:0000:0000:ffff:";

/// Bits between IPv4 prefix lengths and their IPv6-space equivalent.
pub const IPV4_PREFIX_OFFSET: u8 = 96;

const IPV6_BITS: u8 = 128;
const IPV4_BITS: u8 = 32;

/// Address family of a canonical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4, stored IPv4-mapped
    Ipv4,
    /// Native IPv6
    Ipv6,
}

/// A normalized IP address.
///
/// Ordering is numeric over the IPv6-space value, which is also the
/// lexicographic order of [`CanonicalAddress::canonical_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalAddress {
    addr: Ipv6Addr,
}

impl CanonicalAddress {
    pub fn family(&self) -> AddressFamily {
        if self.is_ipv4() {
            AddressFamily::Ipv4
        } else {
            AddressFamily::Ipv6
        }
    }

    /// True for IPv4 literals and IPv4-mapped IPv6 literals alike.
    pub fn is_ipv4(&self) -> bool {
        self.addr.to_ipv4_mapped().is_some()
    }

    /// The address in IPv6 space.
    pub fn ipv6(&self) -> Ipv6Addr {
        self.addr
    }

    /// Fully expanded, zero-padded, lowercase IPv6 text.
    pub fn canonical_text(&self) -> String {
        self.addr
            .segments()
            .iter()
            .map(|segment| format!("{:04x}", segment))
            .collect::<Vec<_>>()
            .join(":")
    }

    pub fn as_u128(&self) -> u128 {
        u128::from(self.addr)
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr.to_ipv4_mapped() {
            Some(v4) => write!(f, "{}", v4),
            None => write!(f, "{}", self.addr),
        }
    }
}

impl From<Ipv4Addr> for CanonicalAddress {
    fn from(v4: Ipv4Addr) -> Self {
        Self {
            addr: v4.to_ipv6_mapped(),
        }
    }
}

impl From<Ipv6Addr> for CanonicalAddress {
    fn from(addr: Ipv6Addr) -> Self {
        Self { addr }
    }
}

impl std::str::FromStr for CanonicalAddress {
    type Err = NetStateError;

    fn from_str(s: &str) -> Result<Self> {
        canonicalize(s)
    }
}

impl Serialize for CanonicalAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        canonicalize(&raw).map_err(serde::de::Error::custom)
    }
}

/// Canonicalize an IPv4 or IPv6 literal.
///
/// Surrounding whitespace is ignored. Both `192.0.2.1` and `::ffff:192.0.2.1`
/// produce the same value.
///
/// # Errors
///
/// - `MalformedAddress`: the input is neither an IPv4 nor an IPv6 literal
pub fn canonicalize(raw: &str) -> Result<CanonicalAddress> {
    let literal = raw.trim();
    let malformed = |reason: String| NetStateError::MalformedAddress {
        input: raw.to_string(),
        reason,
    };

    if literal.contains(':') {
        literal
            .parse::<Ipv6Addr>()
            .map(CanonicalAddress::from)
            .map_err(|e| malformed(e.to_string()))
    } else {
        literal
            .parse::<Ipv4Addr>()
            .map(CanonicalAddress::from)
            .map_err(|e| malformed(e.to_string()))
    }
}

/// A canonical address plus a prefix length in IPv6 bit space.
///
/// Ordering is address first, then length, matching the prefix comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalPrefix {
    address: CanonicalAddress,
    length: u8,
}

impl CanonicalPrefix {
    pub fn address(&self) -> CanonicalAddress {
        self.address
    }

    /// Prefix length in IPv6 bit space (an IPv4 `/24` is `120`).
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Prefix length as an operator would write it (an IPv4 `/24` is `24`).
    pub fn display_length(&self) -> u8 {
        if self.renders_as_ipv4() {
            self.length - IPV4_PREFIX_OFFSET
        } else {
            self.length
        }
    }

    /// `<canonical text>/<ipv6-space length>`
    pub fn canonical_text(&self) -> String {
        format!("{}/{}", self.address.canonical_text(), self.length)
    }

    fn renders_as_ipv4(&self) -> bool {
        self.address.is_ipv4() && self.length >= IPV4_PREFIX_OFFSET
    }
}

impl fmt::Display for CanonicalPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.renders_as_ipv4() {
            write!(f, "{}/{}", self.address, self.display_length())
        } else {
            write!(f, "{}/{}", self.address.ipv6(), self.length)
        }
    }
}

impl std::str::FromStr for CanonicalPrefix {
    type Err = NetStateError;

    fn from_str(s: &str) -> Result<Self> {
        parse_prefix(s)
    }
}

impl Serialize for CanonicalPrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalPrefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_prefix(&raw).map_err(serde::de::Error::custom)
    }
}

/// Canonicalize an address literal and a prefix length.
///
/// The length is read in the bit space of the literal as written: a dotted
/// IPv4 literal takes `0..=32` (stored offset by 96), any IPv6 literal takes
/// `0..=128`.
///
/// # Errors
///
/// - `MalformedAddress`: the address literal is invalid
/// - `PrefixLengthOutOfRange`: the length is negative or too long for the family
pub fn canonicalize_prefix(raw_address: &str, raw_length: i64) -> Result<CanonicalPrefix> {
    let address = canonicalize(raw_address)?;
    let written_as_ipv4 = !raw_address.contains(':');
    let max = if written_as_ipv4 { IPV4_BITS } else { IPV6_BITS };

    if raw_length < 0 || raw_length > i64::from(max) {
        return Err(NetStateError::PrefixLengthOutOfRange {
            input: raw_address.trim().to_string(),
            length: raw_length,
            max,
        });
    }

    // Range checked above
    let length = raw_length as u8;
    let length = if written_as_ipv4 {
        length + IPV4_PREFIX_OFFSET
    } else {
        length
    };

    Ok(CanonicalPrefix { address, length })
}

/// Parse `<address>/<length>` (or a bare address, taken as a host prefix).
///
/// # Errors
///
/// - `MalformedAddress`: the address or the length text is invalid
/// - `PrefixLengthOutOfRange`: the length is too long for the family
pub fn parse_prefix(raw: &str) -> Result<CanonicalPrefix> {
    let text = raw.trim();
    match text.split_once('/') {
        Some((address, length)) => {
            let length: i64 =
                length
                    .trim()
                    .parse()
                    .map_err(|_| NetStateError::MalformedAddress {
                        input: raw.to_string(),
                        reason: format!("invalid prefix length {:?}", length),
                    })?;
            canonicalize_prefix(address, length)
        }
        None => {
            let host_length = if text.contains(':') {
                IPV6_BITS
            } else {
                IPV4_BITS
            };
            canonicalize_prefix(text, i64::from(host_length))
        }
    }
}
