//! Order model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};

/// Order lifecycle status, stored as snake_case TEXT
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, EnumString, Display, Default)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    InProgress,
    AwaitingPayment,
    Completed,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub execution_date: NaiveDate,
    pub status: OrderStatus,
    /// Derived: sum of amount over this order's line items, zero when the
    /// order has none. Never written directly by callers.
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: i64,
    pub execution_date: NaiveDate,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub execution_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}
