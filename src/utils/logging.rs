//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for StudioLedger.

use tracing::{info, warn, debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "studio_ledger.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log client record changes with structured data
pub fn log_client_action(client_id: i64, action: &str, details: Option<&str>) {
    info!(
        client_id = client_id,
        action = action,
        details = details,
        "Client action performed"
    );
}

/// Log order and line-item ledger events
pub fn log_ledger_event(order_id: i64, event: &str, total_amount: i64) {
    info!(
        order_id = order_id,
        event = event,
        total_amount = total_amount,
        "Ledger event recorded"
    );
}

/// Log rejected contact-field input
pub fn log_contact_rejected(field: &str, value: &str) {
    warn!(
        field = field,
        value = value,
        "Contact field rejected"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
