use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::WhitelistError,
    store::{COUNTRY_WHITELIST_KEY, Category, MemoryStore, whitelist_key},
};

/// Whitelist snapshot file
///
/// Each table maps an actor to the reason it was whitelisted. Entries are
/// loaded verbatim; malformed blocks are skipped at lookup time like any
/// other stored block.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct SnapshotFile {
    /// Whitelisted ISO country codes
    #[serde(default)]
    pub countries: Vec<String>,
    /// Whitelisted IPv4 addresses
    #[serde(default)]
    pub ip: BTreeMap<String, String>,
    /// Whitelisted user identifiers
    #[serde(default)]
    pub users: BTreeMap<String, String>,
    /// Whitelisted CIDR blocks
    #[serde(default)]
    pub cidr: BTreeMap<String, String>,
}

impl SnapshotFile {
    /// Load snapshot file
    pub fn load(path: &Path) -> Result<Self, WhitelistError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| WhitelistError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Copy every entry into `store` under its whitelist key
    pub fn apply_to(&self, store: &MemoryStore) -> Result<(), WhitelistError> {
        let tables = [
            (Category::Address, &self.ip),
            (Category::User, &self.users),
            (Category::Block, &self.cidr),
        ];
        for (category, entries) in tables {
            for (actor, reason) in entries {
                store.insert(&whitelist_key(actor, category), reason)?;
            }
        }
        for country in &self.countries {
            store.add_member(COUNTRY_WHITELIST_KEY, country)?;
        }
        Ok(())
    }
}
