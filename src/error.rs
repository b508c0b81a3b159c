use thiserror::Error;

use std::path::PathBuf;

/// Failure reported by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store disconnected: {reason}")]
    Disconnected { reason: String },
}

#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("invalid IPv4 address '{input}'")]
    InvalidAddress { input: String },

    #[error("invalid CIDR block '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("unsupported whitelist category '{category}'")]
    UnsupportedCategory { category: String },

    #[error("whitelist store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("unexpected {reply} reply for {key}")]
    Indeterminate { key: String, reply: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse store snapshot {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl WhitelistError {
    pub(crate) fn invalid_address(input: &str) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid_format(input: &str, reason: &str) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
