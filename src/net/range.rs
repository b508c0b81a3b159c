use crate::error::WhitelistError;

use super::address::{Address, parse_address};
use super::cidr::CidrBlock;

/// Inclusive `[lower, upper]` span of IPv4 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    lower: Address,
    upper: Address,
}

impl AddressRange {
    /// Derive the range covered by a block
    ///
    /// `upper = lower + 2^(32 - prefix) - 1`, computed in 64 bits so a `/0`
    /// block spans the whole address space without overflowing.
    pub fn from_block(block: &CidrBlock) -> Self {
        let lower = u64::from(block.network().to_bits());
        let size = 1u64 << (32 - u32::from(block.prefix_len()));
        let upper = lower + size - 1;

        Self {
            lower: block.network(),
            // Host bits are cleared on the block, so upper fits in 32 bits.
            upper: Address::new(u32::try_from(upper).unwrap_or(u32::MAX)),
        }
    }

    pub fn lower(&self) -> Address {
        self.lower
    }

    pub fn upper(&self) -> Address {
        self.upper
    }

    /// Number of addresses in the range
    pub fn size(&self) -> u64 {
        u64::from(self.upper.to_bits()) - u64::from(self.lower.to_bits()) + 1
    }

    /// True when `lower <= addr <= upper`
    pub fn contains(&self, addr: Address) -> bool {
        self.lower <= addr && addr <= self.upper
    }
}

/// Test whether the textual `block` contains the textual `address`
///
/// The address is validated first, then the block. Either parse failure is
/// returned to the caller as an error instead of being read as "no match".
///
/// # Examples
/// ```
/// use repsheet_whitelist::net::block_contains;
///
/// assert!(block_contains("192.168.1.0/24", "192.168.1.77").unwrap());
/// assert!(!block_contains("192.168.1.0/24", "192.168.2.1").unwrap());
/// assert!(block_contains("192.168.1.0/24", "not-an-ip").is_err());
/// ```
pub fn block_contains(block: &str, address: &str) -> Result<bool, WhitelistError> {
    let addr = parse_address(address)?;
    let block = CidrBlock::parse(block)?;
    Ok(block.range().contains(addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn range_of(block: &str) -> AddressRange {
        CidrBlock::parse(block).unwrap().range()
    }

    fn addr(text: &str) -> Address {
        parse_address(text).unwrap()
    }

    #[test]
    fn test_slash_24_bounds() {
        let range = range_of("192.168.1.0/24");
        assert_eq!(range.lower(), addr("192.168.1.0"));
        assert_eq!(range.upper(), addr("192.168.1.255"));
        assert_eq!(range.size(), 256);
    }

    #[test]
    fn test_slash_0_spans_address_space() {
        let range = range_of("10.0.0.0/0");
        assert_eq!(range.lower().to_bits(), 0);
        assert_eq!(range.upper().to_bits(), 4_294_967_295);
        assert_eq!(range.size(), 1u64 << 32);
    }

    #[test]
    fn test_slash_32_is_single_address() {
        let range = range_of("203.0.113.9/32");
        assert_eq!(range.lower(), range.upper());
        assert_eq!(range.size(), 1);
    }

    #[test]
    fn test_top_of_address_space() {
        let range = range_of("255.255.255.0/24");
        assert_eq!(range.upper().to_bits(), u32::MAX);
    }

    #[rstest]
    #[case("192.168.1.1", true)]
    #[case("192.168.1.0", true)]
    #[case("192.168.1.255", true)]
    #[case("192.168.2.1", false)]
    #[case("192.168.0.255", false)]
    fn test_contains_is_inclusive(#[case] candidate: &str, #[case] expected: bool) {
        let range = range_of("192.168.1.0/24");
        assert_eq!(range.contains(addr(candidate)), expected);
    }

    #[rstest]
    #[case("0.0.0.0")]
    #[case("10.0.0.1")]
    #[case("127.0.0.1")]
    #[case("255.255.255.255")]
    fn test_slash_0_contains_everything(#[case] candidate: &str) {
        assert!(block_contains("10.0.0.0/0", candidate).unwrap());
    }

    #[rstest]
    #[case("10.0.0.0/8", "10.255.255.255", true)]
    #[case("10.0.0.0/8", "11.0.0.0", false)]
    #[case("172.16.0.0/12", "172.31.0.1", true)]
    #[case("172.16.0.0/12", "172.32.0.1", false)]
    #[case("10.0.0.7/24", "10.0.0.1", true)]
    fn test_block_contains(#[case] block: &str, #[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(block_contains(block, candidate).unwrap(), expected);
    }

    #[test]
    fn test_block_contains_rejects_bad_address() {
        let result = block_contains("10.0.0.0/8", "10.0.0");
        assert!(matches!(result, Err(WhitelistError::InvalidAddress { .. })));
    }

    #[test]
    fn test_block_contains_rejects_bad_block() {
        let result = block_contains("10.0.0.0", "10.0.0.1");
        assert!(matches!(result, Err(WhitelistError::InvalidFormat { .. })));

        let result = block_contains("10.0.0.0/33", "10.0.0.1");
        assert!(matches!(result, Err(WhitelistError::InvalidFormat { .. })));
    }
}
