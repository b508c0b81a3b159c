use crate::error::WhitelistError;
use crate::store::{COUNTRY_WHITELIST_KEY, Category, MemoryStore, whitelist_key};

use super::args::Args;
use super::config::SnapshotFile;

/// Reason recorded for command-line entries given without one
const DEFAULT_REASON: &str = "command line";

/// Build the whitelist store from a snapshot file and command line entries
pub struct StoreLoader;

impl StoreLoader {
    /// Load the snapshot (if any), then layer command line entries on top
    pub fn load(args: &Args) -> Result<MemoryStore, WhitelistError> {
        let store = MemoryStore::new();

        if let Some(path) = args.store.as_ref() {
            let snapshot = SnapshotFile::load(path)?;
            snapshot.apply_to(&store)?;
            log::debug!("Loaded {} whitelist keys from {}", store.len(), path.display());
        }

        let entries = [
            (Category::Address, &args.whitelist_ip),
            (Category::User, &args.whitelist_user),
            (Category::Block, &args.whitelist_cidr),
        ];
        for (category, values) in entries {
            for value in values {
                let (actor, reason) = split_entry(value);
                store.insert(&whitelist_key(actor, category), reason)?;
            }
        }

        for country in &args.whitelist_country {
            store.add_member(COUNTRY_WHITELIST_KEY, country.trim())?;
        }

        Ok(store)
    }
}

/// Split `ACTOR[=REASON]`
fn split_entry(entry: &str) -> (&str, &str) {
    match entry.split_once('=') {
        Some((actor, reason)) => (actor.trim(), reason.trim()),
        None => (entry.trim(), DEFAULT_REASON),
    }
}
