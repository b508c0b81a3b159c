use std::{fmt, str::FromStr};

use crate::error::WhitelistError;

/// Set holding whitelisted ISO country codes
pub const COUNTRY_WHITELIST_KEY: &str = "repsheet:countries:whitelisted";

/// Pattern enumerating every whitelisted CIDR block
pub const CIDR_WHITELIST_PATTERN: &str = "*:repsheet:cidr:whitelisted";

const KEY_DELIMITER: char = ':';

/// Kind of actor a whitelist record is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Address,
    User,
    Block,
}

impl Category {
    /// List segment used in store keys
    pub fn list_name(self) -> &'static str {
        match self {
            Category::Address => "ip",
            Category::User => "users",
            Category::Block => "cidr",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Address => "address",
            Category::User => "user",
            Category::Block => "block",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" | "ip" => Ok(Category::Address),
            "user" | "users" => Ok(Category::User),
            "block" | "cidr" => Ok(Category::Block),
            other => Err(WhitelistError::UnsupportedCategory {
                category: other.to_string(),
            }),
        }
    }
}

/// Build `<actor>:repsheet:<list>:whitelisted`
pub fn whitelist_key(actor: &str, category: Category) -> String {
    format!("{actor}:repsheet:{}:whitelisted", category.list_name())
}

/// Extract the block text from an enumerated CIDR key
///
/// Returns the first non-empty `:`-delimited token, or `None` when the key
/// holds only delimiters.
pub fn block_from_key(key: &str) -> Option<&str> {
    key.split(KEY_DELIMITER).find(|token| !token.is_empty())
}
