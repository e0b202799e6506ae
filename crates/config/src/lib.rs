//! Configuration types for the contract toolchain.
//!
//! This crate provides:
//! - An immutable [`Environment`] snapshot to resolve from
//! - Network profiles with their RPC endpoints and signing accounts
//! - Block-explorer credentials for contract verification
//! - Static compiler settings and project path layout
//! - Per-task preflight checks that name the missing variable

mod compiler;
mod env;
mod error;
mod explorer;
pub mod network;
mod paths;
mod resolve;

pub use compiler::{CompilerSettings, Optimizer};
pub use env::Environment;
pub use error::ConfigError;
pub use explorer::{ExplorerCredentials, ExplorerDefinition, EXPLORERS};
pub use network::{
    Accounts, HdAccounts, NetworkDefinition, NetworkProfile, DEFAULT_HD_COUNT, DEFAULT_HD_PATH,
    HARDENED_OFFSET, MAX_HD_COUNT, NETWORKS,
};
pub use paths::PathLayout;
pub use resolve::{resolve, Config, ConfigBuilder, Task, REDACTED};
