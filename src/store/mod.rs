pub mod keys;
pub mod memory;

#[cfg(test)]
use mockall::automock;

use crate::error::StoreError;

pub use keys::{
    CIDR_WHITELIST_PATTERN, COUNTRY_WHITELIST_KEY, Category, block_from_key, whitelist_key,
};
pub use memory::MemoryStore;

/// Shape of a store reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// No value stored under the key
    Nil,
    /// Acknowledgement of a write
    Status(String),
    Text(String),
    Integer(i64),
    Array(Vec<String>),
}

impl Reply {
    /// Short name of the reply shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Status(_) => "status",
            Reply::Text(_) => "string",
            Reply::Integer(_) => "integer",
            Reply::Array(_) => "array",
        }
    }
}

/// Key-value store abstraction the whitelist is resolved against
///
/// Every call is a blocking request/response exchange. Connection pooling,
/// retries and timeouts are the backend's business.
#[cfg_attr(test, automock)]
pub trait WhitelistStore {
    /// Fetch the value stored under `key`
    fn get(&self, key: &str) -> Result<Reply, StoreError>;
    /// Enumerate keys matching a glob `pattern`
    fn keys(&self, pattern: &str) -> Result<Reply, StoreError>;
    /// Test whether `member` belongs to the set stored under `set_key`
    fn is_member(&self, set_key: &str, member: &str) -> Result<Reply, StoreError>;
    /// Store `value` under `key`
    fn set(&self, key: &str, value: &str) -> Result<Reply, StoreError>;
}
