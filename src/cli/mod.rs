pub mod args;
pub mod config;
pub mod loader;

pub use args::{Args, Command};
pub use config::SnapshotFile;
pub use loader::StoreLoader;
