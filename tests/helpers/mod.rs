//! Shared test infrastructure
//!
//! Every test gets its own migrated SQLite database in a temp directory.

pub mod database_helper;
pub mod test_data;

pub use database_helper::TestDatabase;
#[allow(unused_imports)]
pub use test_data::*;
