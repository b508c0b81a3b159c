use std::{fmt, str::FromStr};

use crate::error::WhitelistError;

use super::address::{Address, MAX_ADDRESS_LEN, parse_address};
use super::range::AddressRange;

/// Shortest dotted-quad literal ("a.b.c.d")
const MIN_BLOCK_ADDRESS_LEN: usize = 7;
const MAX_PREFIX_LEN: u8 = 32;

/// IPv4 network block in canonical form (host bits cleared)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrBlock {
    network: Address,
    prefix_len: u8,
}

impl CidrBlock {
    /// Build a block, clearing any host bits below the prefix
    pub fn new(address: Address, prefix_len: u8) -> Result<Self, WhitelistError> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(WhitelistError::invalid_format(
                &format!("{address}/{prefix_len}"),
                "prefix length must be between 0 and 32",
            ));
        }
        Ok(Self {
            network: Address::new(address.to_bits() & netmask_bits(prefix_len)),
            prefix_len,
        })
    }

    /// Parse `"a.b.c.d/n"` notation
    ///
    /// The address portion is scanned for the `/` separator up to the
    /// address length ceiling and must be 7-16 characters long. The mask
    /// must be plain decimal digits with a value in `0..=32`. Mask and
    /// separator problems are reported as `InvalidFormat`; a malformed
    /// address portion as `InvalidAddress`.
    ///
    /// # Examples
    /// ```
    /// use repsheet_whitelist::net::CidrBlock;
    ///
    /// let block = CidrBlock::parse("192.168.1.0/24").unwrap();
    /// assert_eq!(block.prefix_len(), 24);
    /// assert_eq!(block.network().to_string(), "192.168.1.0");
    /// ```
    pub fn parse(text: &str) -> Result<Self, WhitelistError> {
        // The separator may sit at most one byte past the address ceiling.
        let separator = text
            .bytes()
            .take(MAX_ADDRESS_LEN + 1)
            .position(|b| b == b'/')
            .ok_or_else(|| WhitelistError::invalid_format(text, "missing '/' separator"))?;

        let (address_part, mask_part) = (&text[..separator], &text[separator + 1..]);

        // 16 is one longer than any IPv4 literal; kept for compatibility with
        // stored blocks, the address parse rejects such input anyway.
        if !(MIN_BLOCK_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address_part.len()) {
            return Err(WhitelistError::invalid_format(
                text,
                "address portion must be 7 to 16 characters",
            ));
        }

        let prefix_len = parse_prefix_len(mask_part)
            .ok_or_else(|| WhitelistError::invalid_format(text, "prefix length must be 0-32"))?;

        let address = parse_address(address_part)?;

        Self::new(address, prefix_len)
    }

    pub fn network(&self) -> Address {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn netmask(&self) -> Address {
        Address::new(netmask_bits(self.prefix_len))
    }

    /// Inclusive address range covered by this block
    pub fn range(&self) -> AddressRange {
        AddressRange::from_block(self)
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.range().contains(addr)
    }
}

impl FromStr for CidrBlock {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

fn netmask_bits(prefix_len: u8) -> u32 {
    if prefix_len == 0 {
        0
    } else {
        !0u32 << (32 - u32::from(prefix_len))
    }
}

/// A zero prefix is only accepted when spelled with a leading '0'; anything
/// that is not all digits is rejected rather than read as zero.
fn parse_prefix_len(mask: &str) -> Option<u8> {
    if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = mask.parse().ok()?;
    if value > u32::from(MAX_PREFIX_LEN) || (value == 0 && !mask.starts_with('0')) {
        return None;
    }
    u8::try_from(value).ok()
}
