//! Error handling for StudioLedger
//!
//! This module defines the main error types used throughout the library
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for StudioLedger operations
#[derive(Error, Debug)]
pub enum StudioLedgerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Client not found: {client_id}")]
    ClientNotFound { client_id: i64 },

    #[error("Service not found: {service_id}")]
    ServiceNotFound { service_id: i64 },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: i64 },

    #[error("Order item not found: {item_id}")]
    OrderItemNotFound { item_id: i64 },

    #[error("Group {group_id} is referenced by {client_count} client(s) and cannot be deleted")]
    GroupInUse { group_id: i64, client_count: i64 },

    #[error("Invalid {field}: {value}")]
    InvalidContact { field: String, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for StudioLedger operations
pub type Result<T> = std::result::Result<T, StudioLedgerError>;

impl StudioLedgerError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StudioLedgerError::Database(_) => false,
            StudioLedgerError::Migration(_) => false,
            StudioLedgerError::Config(_) => false,
            StudioLedgerError::GroupNotFound { .. } => false,
            StudioLedgerError::ClientNotFound { .. } => false,
            StudioLedgerError::ServiceNotFound { .. } => false,
            StudioLedgerError::OrderNotFound { .. } => false,
            StudioLedgerError::OrderItemNotFound { .. } => false,
            StudioLedgerError::GroupInUse { .. } => true,
            StudioLedgerError::InvalidContact { .. } => true,
            StudioLedgerError::Serialization(_) => false,
            StudioLedgerError::Io(_) => true,
            StudioLedgerError::UrlParse(_) => false,
            StudioLedgerError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StudioLedgerError::Database(_) => ErrorSeverity::Critical,
            StudioLedgerError::Migration(_) => ErrorSeverity::Critical,
            StudioLedgerError::Config(_) => ErrorSeverity::Critical,
            StudioLedgerError::GroupInUse { .. } => ErrorSeverity::Warning,
            StudioLedgerError::InvalidContact { .. } => ErrorSeverity::Info,
            StudioLedgerError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
