use std::{fmt, net::Ipv4Addr, str::FromStr};

use crate::error::WhitelistError;

/// Size of the scratch area an address literal must fit in, terminator included
pub const MAX_ADDRESS_LEN: usize = 16;

const OCTET_COUNT: usize = 4;
const MAX_OCTET_DIGITS: usize = 3;

/// IPv4 address in numeric form (`o0 << 24 | o1 << 16 | o2 << 8 | o3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u32);

impl Address {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(octets))
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.to_bits())
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Ipv4Addr::from_bits(addr.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl FromStr for Address {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

/// Parse a dotted-quad IPv4 literal
///
/// The input must be exactly four `.`-separated tokens of 1-3 ASCII digits,
/// each with a value in `0..=255`. The length ceiling is enforced before any
/// token is looked at, so oversized input is rejected instead of truncated.
///
/// # Examples
/// ```
/// use repsheet_whitelist::net::parse_address;
///
/// let addr = parse_address("192.168.1.10").unwrap();
/// assert_eq!(addr.to_bits(), 0xC0A8_010A);
/// ```
pub fn parse_address(text: &str) -> Result<Address, WhitelistError> {
    if text.len() >= MAX_ADDRESS_LEN {
        return Err(WhitelistError::invalid_address(text));
    }

    let mut octets = [0u8; OCTET_COUNT];
    let mut tokens = text.split('.');

    for octet in octets.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| WhitelistError::invalid_address(text))?;
        *octet = parse_octet(token).ok_or_else(|| WhitelistError::invalid_address(text))?;
    }

    if tokens.next().is_some() {
        return Err(WhitelistError::invalid_address(text));
    }

    Ok(Address::from_octets(octets))
}

/// Render an address back to its dotted-quad form
pub fn format_address(addr: Address) -> String {
    addr.to_string()
}

fn parse_octet(token: &str) -> Option<u8> {
    if token.is_empty()
        || token.len() > MAX_OCTET_DIGITS
        || !token.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let value: u32 = token.parse().ok()?;
    if value & !0xFF != 0 {
        return None;
    }
    u8::try_from(value).ok()
}
