//! Test database setup
//!
//! Creates a fresh SQLite database file in a temp directory and runs the
//! crate migrations against it. Dropping the helper drops the directory.

use tempfile::TempDir;
use StudioLedger::database::connection::{create_pool, run_migrations, DatabaseConfig, DatabasePool};

pub struct TestDatabase {
    pub pool: DatabasePool,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("studio_ledger_test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
            ..Default::default()
        };

        let pool = create_pool(&config).await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }
}
