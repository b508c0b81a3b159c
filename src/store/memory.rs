use std::{
    collections::{HashMap, HashSet},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::error::StoreError;

use super::{Reply, WhitelistStore};

#[derive(Default, Debug)]
struct Inner {
    values: HashMap<String, String>,
    sets: HashMap<String, HashSet<String>>,
}

/// In-process store backend
///
/// Holds string values and string sets behind a lock, so a shared reference
/// can be used from several threads. Key enumeration follows hash order.
#[derive(Default, Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string value, replacing any previous one
    pub fn insert(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write()?
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Add `member` to the set under `set_key`, creating the set if needed
    pub fn add_member(&self, set_key: &str, member: &str) -> Result<(), StoreError> {
        self.write()?
            .sets
            .entry(set_key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    /// Number of keys held (string values and sets)
    pub fn len(&self) -> usize {
        self.read()
            .map(|inner| inner.values.len() + inner.sets.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Disconnected {
            reason: "memory store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Disconnected {
            reason: "memory store lock poisoned".to_string(),
        })
    }
}

impl WhitelistStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Reply, StoreError> {
        Ok(self
            .read()?
            .values
            .get(key)
            .map_or(Reply::Nil, |value| Reply::Text(value.clone())))
    }

    fn keys(&self, pattern: &str) -> Result<Reply, StoreError> {
        let inner = self.read()?;
        let keys = inner
            .values
            .keys()
            .chain(inner.sets.keys())
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        Ok(Reply::Array(keys))
    }

    fn is_member(&self, set_key: &str, member: &str) -> Result<Reply, StoreError> {
        let found = self
            .read()?
            .sets
            .get(set_key)
            .is_some_and(|set| set.contains(member));
        Ok(Reply::Integer(i64::from(found)))
    }

    fn set(&self, key: &str, value: &str) -> Result<Reply, StoreError> {
        self.insert(key, value)?;
        Ok(Reply::Status("OK".to_string()))
    }
}

/// Match `text` against a glob `pattern`
///
/// Supports `*` (any run, including empty), `?` (exactly one character) and
/// `\` to take the next pattern character literally.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text index it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
                continue;
            }
            Some('?') => {
                p += 1;
                t += 1;
                continue;
            }
            Some('\\') if p + 1 < pattern.len() && pattern[p + 1] == text[t] => {
                p += 2;
                t += 1;
                continue;
            }
            Some(&c) if c != '\\' && c == text[t] => {
                p += 1;
                t += 1;
                continue;
            }
            _ => {}
        }

        match backtrack {
            Some((star, from)) => {
                p = star + 1;
                t = from + 1;
                backtrack = Some((star, from + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
