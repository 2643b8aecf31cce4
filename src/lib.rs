pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod judge;
pub mod models;
pub mod query;
pub mod ranking;

pub use error::{CrakdError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
