//! Reputation whitelist resolution.
//!
//! Decides whether an actor (IPv4 address, user identifier or country code)
//! is exempt from reputation-based blocking by consulting a key-value store
//! that holds individual addresses, CIDR blocks, users and countries.
//!
//! ```
//! use repsheet_whitelist::{AllowListResolver, MemoryStore};
//!
//! let resolver = AllowListResolver::new(MemoryStore::new());
//! resolver.add_entry("10.0.0.0/8", "block", "internal").unwrap();
//!
//! let decision = resolver.check_address("10.20.30.40").unwrap();
//! assert_eq!(decision.reason(), Some("internal"));
//! ```

pub mod cli;
pub mod error;
pub mod net;
pub mod store;
pub mod whitelist;

pub use error::{StoreError, WhitelistError};
pub use store::{MemoryStore, Reply, WhitelistStore};
pub use whitelist::{AllowListResolver, Decision};
