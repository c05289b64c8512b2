//! Order line-item repository implementation
//!
//! Read side only. Every line-item write goes through the ledger service so
//! the derived order total and client first-payment date are recomputed in
//! the same transaction.

use crate::database::connection::DatabasePool;
use crate::models::order_item::OrderItem;
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct OrderItemRepository {
    pool: DatabasePool,
}

impl OrderItemRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Find line item by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<OrderItem>, StudioLedgerError> {
        let item = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, service_name, payment_date, amount, hours, created_at, updated_at FROM order_items WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List line items under an order
    pub async fn list_by_order(&self, order_id: i64) -> Result<Vec<OrderItem>, StudioLedgerError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, service_name, payment_date, amount, hours, created_at, updated_at FROM order_items WHERE order_id = $1 ORDER BY payment_date ASC, id ASC"
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Count line items under an order
    pub async fn count_by_order(&self, order_id: i64) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM order_items WHERE order_id = $1"
        )
        .bind(order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// List every line item under any order owned by a client
    pub async fn list_by_client(&self, client_id: i64) -> Result<Vec<OrderItem>, StudioLedgerError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT i.id, i.order_id, i.service_name, i.payment_date, i.amount, i.hours, i.created_at, i.updated_at
            FROM order_items i
            INNER JOIN orders o ON i.order_id = o.id
            WHERE o.client_id = $1
            ORDER BY i.payment_date ASC, i.id ASC
            "#
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
