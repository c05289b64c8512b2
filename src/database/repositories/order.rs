//! Order repository implementation
//!
//! Order deletion and total_amount writes live in the ledger service, which
//! pairs them with the derived-value recomputations.

use chrono::{NaiveDate, Utc};
use crate::database::connection::DatabasePool;
use crate::models::order::{Order, OrderStatus, CreateOrderRequest, UpdateOrderRequest};
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: DatabasePool,
}

impl OrderRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create a new order for an existing client
    pub async fn create(&self, request: CreateOrderRequest) -> Result<Order, StudioLedgerError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (client_id, execution_date, status, total_amount, created_at, updated_at)
            VALUES ($1, $2, $3, 0, $4, $5)
            RETURNING id, client_id, execution_date, status, total_amount, created_at, updated_at
            "#
        )
        .bind(request.client_id)
        .bind(request.execution_date)
        .bind(request.status.unwrap_or_default())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Find order by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, StudioLedgerError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, client_id, execution_date, status, total_amount, created_at, updated_at FROM orders WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Update order execution date and status
    pub async fn update(&self, id: i64, request: UpdateOrderRequest) -> Result<Order, StudioLedgerError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET execution_date = COALESCE($2, execution_date),
                status = COALESCE($3, status),
                updated_at = $4
            WHERE id = $1
            RETURNING id, client_id, execution_date, status, total_amount, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.execution_date)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Set order status
    pub async fn set_status(&self, id: i64, status: OrderStatus) -> Result<Order, StudioLedgerError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, client_id, execution_date, status, total_amount, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Set order execution date
    pub async fn set_execution_date(&self, id: i64, execution_date: NaiveDate) -> Result<Order, StudioLedgerError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET execution_date = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, client_id, execution_date, status, total_amount, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(execution_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// List all orders with pagination, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Order>, StudioLedgerError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, client_id, execution_date, status, total_amount, created_at, updated_at FROM orders ORDER BY id DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// List orders for a client
    pub async fn list_by_client(&self, client_id: i64) -> Result<Vec<Order>, StudioLedgerError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, client_id, execution_date, status, total_amount, created_at, updated_at FROM orders WHERE client_id = $1 ORDER BY execution_date DESC"
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// List orders by status
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, StudioLedgerError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, client_id, execution_date, status, total_amount, created_at, updated_at FROM orders WHERE status = $1 ORDER BY execution_date DESC"
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Count total orders
    pub async fn count(&self) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
