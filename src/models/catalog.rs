//! Service catalog model
//!
//! Catalog entries are price guidance only. Line items record the service
//! name as free text, so catalog renames and deletions never rewrite
//! historical orders.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    /// Advisory price floor in whole currency units, not enforced against
    /// recorded order amounts
    pub min_price: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub min_price: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub min_price: Option<i64>,
    pub description: Option<String>,
}
