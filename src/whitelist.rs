use crate::{
    error::WhitelistError,
    net::{Address, CidrBlock, parse_address},
    store::{
        CIDR_WHITELIST_PATTERN, COUNTRY_WHITELIST_KEY, Category, Reply, WhitelistStore,
        block_from_key, whitelist_key,
    },
};

/// Outcome of a whitelist check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Actor is whitelisted; `reason` is the text stored with the record, when available
    Allowed { reason: Option<String> },
    NotAllowed,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allowed { reason } => reason.as_deref(),
            Decision::NotAllowed => None,
        }
    }
}

/// Resolves whitelist membership against a store
///
/// Store connectivity failures end the current check with
/// `WhitelistError::StoreUnavailable`; nothing is retried here.
pub struct AllowListResolver<S> {
    store: S,
}

impl<S: WhitelistStore> AllowListResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check an IPv4 address against the address and CIDR whitelists
    ///
    /// # Behavior
    /// 1. Looks up `<address>:repsheet:ip:whitelisted`; a stored string allows
    ///    the address with that string as reason.
    /// 2. Otherwise validates the address and enumerates every
    ///    `*:repsheet:cidr:whitelisted` key.
    /// 3. Each key's block text is parsed and tested; blocks that fail to
    ///    parse are logged and skipped.
    /// 4. The first containing block (in store enumeration order) wins and
    ///    its reason is fetched. No match means `NotAllowed`.
    ///
    /// # Errors
    /// * `StoreUnavailable` - the exact lookup or the enumeration failed
    /// * `InvalidAddress` - no exact match and `address` is not a dotted quad
    pub fn check_address(&self, address: &str) -> Result<Decision, WhitelistError> {
        let key = whitelist_key(address, Category::Address);
        log::debug!("Looking up {}", key);
        if let Reply::Text(reason) = self.store.get(&key)? {
            return Ok(Decision::Allowed {
                reason: Some(reason),
            });
        }

        let candidate = parse_address(address)?;

        log::debug!("Enumerating {}", CIDR_WHITELIST_PATTERN);
        let keys = match self.store.keys(CIDR_WHITELIST_PATTERN)? {
            Reply::Array(keys) => keys,
            other => {
                log::debug!("Block enumeration returned {} reply", other.kind());
                return Ok(Decision::NotAllowed);
            }
        };

        match find_containing_block(&keys, candidate) {
            Some(block) => {
                log::info!("Address {} allowed by whitelisted block {}", address, block);
                Ok(Decision::Allowed {
                    reason: self.block_reason(block),
                })
            }
            None => Ok(Decision::NotAllowed),
        }
    }

    /// Check a user identifier against the user whitelist
    pub fn check_user(&self, user: &str) -> Result<Decision, WhitelistError> {
        let key = whitelist_key(user, Category::User);
        log::debug!("Looking up {}", key);
        match self.store.get(&key)? {
            Reply::Text(reason) => Ok(Decision::Allowed {
                reason: Some(reason),
            }),
            _ => Ok(Decision::NotAllowed),
        }
    }

    /// Check an ISO country code against the country whitelist set
    ///
    /// # Errors
    /// * `StoreUnavailable` - the membership query failed
    /// * `Indeterminate` - the store answered with something other than an integer
    pub fn check_country(&self, country_code: &str) -> Result<Decision, WhitelistError> {
        log::debug!("Testing {} in {}", country_code, COUNTRY_WHITELIST_KEY);
        match self.store.is_member(COUNTRY_WHITELIST_KEY, country_code)? {
            Reply::Integer(0) => Ok(Decision::NotAllowed),
            Reply::Integer(_) => Ok(Decision::Allowed { reason: None }),
            other => Err(WhitelistError::Indeterminate {
                key: COUNTRY_WHITELIST_KEY.to_string(),
                reply: other.kind().to_string(),
            }),
        }
    }

    /// Write a whitelist record for `actor`
    ///
    /// `category` is one of `address`, `user` or `block` (the list names
    /// `ip`, `users` and `cidr` are accepted too).
    pub fn add_entry(&self, actor: &str, category: &str, reason: &str) -> Result<(), WhitelistError> {
        let category: Category = category.parse()?;
        let key = whitelist_key(actor, category);
        self.store.set(&key, reason)?;
        log::info!("Whitelisted {} {}", category, actor);
        Ok(())
    }

    /// Fetch the reason stored for a matched block
    ///
    /// The block already matched, so a failed or non-string lookup only
    /// costs the reason.
    fn block_reason(&self, block: &str) -> Option<String> {
        let key = whitelist_key(block, Category::Block);
        match self.store.get(&key) {
            Ok(Reply::Text(reason)) => Some(reason),
            Ok(other) => {
                log::warn!("No reason stored for {}: {} reply", key, other.kind());
                None
            }
            Err(err) => {
                log::warn!("Failed to fetch reason for {}: {}", key, err);
                None
            }
        }
    }
}

/// Return the block text of the first key whose block contains `candidate`
fn find_containing_block(keys: &[String], candidate: Address) -> Option<&str> {
    keys.iter().find_map(|key| {
        let Some(text) = block_from_key(key) else {
            log::warn!("Skipping whitelisted block key {:?}: no block text", key);
            return None;
        };
        match CidrBlock::parse(text) {
            Ok(block) if block.contains(candidate) => Some(text),
            Ok(_) => None,
            Err(err) => {
                log::warn!("Skipping whitelisted block key {:?}: {}", key, err);
                None
            }
        }
    })
}
