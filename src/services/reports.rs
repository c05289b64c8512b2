//! Report aggregation service
//!
//! Read-only tabular aggregations over orders and line items. Chart
//! rendering belongs to the presentation layer.

use sqlx::FromRow;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::database::connection::DatabasePool;
use crate::models::order::OrderStatus;
use crate::utils::errors::Result;

/// Revenue and line-item count for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlyRevenue {
    /// Month key in YYYY-MM form
    pub month: String,
    pub total_amount: i64,
    pub item_count: i64,
}

/// Revenue attributed to one client
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientRevenue {
    pub client_id: i64,
    pub client_name: String,
    pub total_amount: i64,
    pub order_count: i64,
}

/// Billed hours and revenue per recorded service name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceUsage {
    pub service_name: String,
    pub total_hours: f64,
    pub total_amount: i64,
    pub item_count: i64,
}

/// Order count per lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub order_count: i64,
}

/// Report service for tabular analytics
#[derive(Debug, Clone)]
pub struct ReportService {
    pool: DatabasePool,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Revenue by calendar month of payment, most recent first
    pub async fn revenue_by_month(&self) -> Result<Vec<MonthlyRevenue>> {
        debug!("Building revenue-by-month report");

        let rows = sqlx::query_as::<_, MonthlyRevenue>(
            r#"
            SELECT strftime('%Y-%m', payment_date) AS month,
                   COALESCE(SUM(amount), 0) AS total_amount,
                   COUNT(*) AS item_count
            FROM order_items
            GROUP BY month
            ORDER BY month DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top clients by recorded revenue
    pub async fn revenue_by_client(&self, limit: i64) -> Result<Vec<ClientRevenue>> {
        debug!(limit = limit, "Building revenue-by-client report");

        let rows = sqlx::query_as::<_, ClientRevenue>(
            r#"
            SELECT c.id AS client_id,
                   c.name AS client_name,
                   COALESCE(SUM(i.amount), 0) AS total_amount,
                   COUNT(DISTINCT o.id) AS order_count
            FROM clients c
            INNER JOIN orders o ON o.client_id = c.id
            INNER JOIN order_items i ON i.order_id = o.id
            GROUP BY c.id, c.name
            ORDER BY total_amount DESC
            LIMIT $1
            "#
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Billed hours and revenue grouped by the service name recorded on
    /// line items (free text, so renamed catalog entries appear under the
    /// name they were billed with)
    pub async fn service_usage(&self) -> Result<Vec<ServiceUsage>> {
        debug!("Building service-usage report");

        let rows = sqlx::query_as::<_, ServiceUsage>(
            r#"
            SELECT service_name,
                   COALESCE(SUM(hours), 0) AS total_hours,
                   COALESCE(SUM(amount), 0) AS total_amount,
                   COUNT(*) AS item_count
            FROM order_items
            GROUP BY service_name
            ORDER BY total_amount DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Order counts per lifecycle status
    pub async fn orders_by_status(&self) -> Result<Vec<StatusCount>> {
        debug!("Building orders-by-status report");

        let rows = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS order_count
            FROM orders
            GROUP BY status
            ORDER BY order_count DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
