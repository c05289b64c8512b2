//! StudioLedger
//!
//! Backend library for a recording-studio administration tool.
//! This library provides modular components for client and group management,
//! a service price catalog, order and line-item bookkeeping with derived-value
//! consistency, contact normalization, and tabular report aggregation.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{StudioLedgerError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
