//! Services module
//!
//! This module contains business logic services

pub mod contact;
pub mod client;
pub mod ledger;
pub mod reports;

// Re-export commonly used services
pub use client::ClientService;
pub use ledger::LedgerService;
pub use reports::{ReportService, MonthlyRevenue, ClientRevenue, ServiceUsage, StatusCount};

use crate::config::settings::Settings;
use crate::database::connection::{DatabasePool, health_check};
use crate::database::repositories::{ClientRepository, GroupRepository};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub client_service: ClientService,
    pub ledger_service: LedgerService,
    pub report_service: ReportService,
    pool: DatabasePool,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(pool: DatabasePool, settings: Settings) -> Self {
        let client_repository = ClientRepository::new(pool.clone());
        let group_repository = GroupRepository::new(pool.clone());

        let client_service = ClientService::new(client_repository, group_repository, settings);
        let ledger_service = LedgerService::new(pool.clone());
        let report_service = ReportService::new(pool.clone());

        Self {
            client_service,
            ledger_service,
            report_service,
            pool,
        }
    }

    /// Health check against the underlying database
    pub async fn health_check(&self) -> Result<()> {
        health_check(&self.pool).await
    }
}
