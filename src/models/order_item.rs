//! Order line-item model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Free text, intentionally not a foreign key into the catalog
    pub service_name: String,
    pub payment_date: NaiveDate,
    /// Whole currency units
    pub amount: i64,
    /// Billed studio hours, may be fractional
    pub hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderItemRequest {
    pub order_id: i64,
    pub service_name: String,
    pub payment_date: NaiveDate,
    pub amount: i64,
    pub hours: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderItemRequest {
    pub service_name: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub hours: Option<f64>,
}
