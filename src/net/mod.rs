pub mod address;
pub mod cidr;
pub mod range;

// Re-export main types and functions
pub use address::{Address, format_address, parse_address};
pub use cidr::CidrBlock;
pub use range::{AddressRange, block_contains};
