use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check actors against the repsheet reputation whitelist"
)]
pub struct Args {
    /// Path to a whitelist snapshot file (TOML)
    #[arg(long = "store", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Whitelist an IPv4 address (ADDRESS[=REASON])
    #[arg(long = "whitelist-ip", value_name = "ENTRY")]
    pub whitelist_ip: Vec<String>,

    /// Whitelist a user identifier (USER[=REASON])
    #[arg(long = "whitelist-user", value_name = "ENTRY")]
    pub whitelist_user: Vec<String>,

    /// Whitelist a CIDR block (BLOCK[=REASON])
    #[arg(long = "whitelist-cidr", value_name = "ENTRY")]
    pub whitelist_cidr: Vec<String>,

    /// Whitelist ISO country codes
    #[arg(long = "whitelist-country", value_delimiter = ',')]
    pub whitelist_country: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check whether an IPv4 address is whitelisted directly or by a CIDR block
    Ip { address: String },
    /// Check whether a user identifier is whitelisted
    User { id: String },
    /// Check whether an ISO country code is whitelisted
    Country { code: String },
    /// Test whether a CIDR block contains an address
    Contains { block: String, address: String },
}
