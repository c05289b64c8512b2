//! Order ledger service
//!
//! Keeps the two derived values consistent with the underlying line items:
//! an order's total_amount and a client's first_order_date. Every line-item
//! write and order deletion goes through this service; the row write and
//! both recomputations execute in a single transaction, so readers never
//! observe a stale derived value.

use chrono::{NaiveDate, Utc};
use sqlx::SqliteConnection;
use tracing::{info, debug};
use crate::database::connection::DatabasePool;
use crate::models::order_item::{OrderItem, CreateOrderItemRequest, UpdateOrderItemRequest};
use crate::utils::errors::{StudioLedgerError, Result};

/// Ledger service for order and line-item consistency operations
///
/// Stateless: holds only the pool, every identifier is an explicit argument.
#[derive(Debug, Clone)]
pub struct LedgerService {
    pool: DatabasePool,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Recompute an order's total from its line items
    ///
    /// The total is the sum of amount over the order's line items, zero when
    /// the order has none. A missing order surfaces as OrderNotFound rather
    /// than a zero-row update.
    pub async fn recompute_order_total(&self, order_id: i64) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        order_client_id(&mut *tx, order_id).await?;
        let total = recompute_total(&mut *tx, order_id).await?;
        tx.commit().await?;

        debug!(order_id = order_id, total_amount = total, "Order total recomputed");
        Ok(total)
    }

    /// Recompute a client's first payment date from their line items
    ///
    /// Writes the minimum payment date across all line items under the
    /// client's orders, clearing the field to NULL when no line items
    /// remain.
    pub async fn recompute_first_payment_date(&self, client_id: i64) -> Result<Option<NaiveDate>> {
        let mut tx = self.pool.begin().await?;
        ensure_client_exists(&mut *tx, client_id).await?;
        let first_payment = recompute_first_payment(&mut *tx, client_id).await?;
        tx.commit().await?;

        debug!(client_id = client_id, first_payment = ?first_payment, "First payment date recomputed");
        Ok(first_payment)
    }

    /// Add a line item to an order
    pub async fn add_item(&self, request: CreateOrderItemRequest) -> Result<OrderItem> {
        validate_item_fields(Some(&request.service_name), Some(request.amount), Some(request.hours))?;

        let mut tx = self.pool.begin().await?;
        let client_id = order_client_id(&mut *tx, request.order_id).await?;

        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, service_name, payment_date, amount, hours, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, service_name, payment_date, amount, hours, created_at, updated_at
            "#
        )
        .bind(request.order_id)
        .bind(request.service_name)
        .bind(request.payment_date)
        .bind(request.amount)
        .bind(request.hours)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let total = recompute_total(&mut *tx, request.order_id).await?;
        recompute_first_payment(&mut *tx, client_id).await?;
        tx.commit().await?;

        info!(
            order_id = request.order_id,
            item_id = item.id,
            total_amount = total,
            "Line item added"
        );
        Ok(item)
    }

    /// Update a line item
    pub async fn update_item(&self, item_id: i64, request: UpdateOrderItemRequest) -> Result<OrderItem> {
        validate_item_fields(request.service_name.as_deref(), request.amount, request.hours)?;

        let mut tx = self.pool.begin().await?;
        let order_id = item_order_id(&mut *tx, item_id).await?;
        let client_id = order_client_id(&mut *tx, order_id).await?;

        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            UPDATE order_items
            SET service_name = COALESCE($2, service_name),
                payment_date = COALESCE($3, payment_date),
                amount = COALESCE($4, amount),
                hours = COALESCE($5, hours),
                updated_at = $6
            WHERE id = $1
            RETURNING id, order_id, service_name, payment_date, amount, hours, created_at, updated_at
            "#
        )
        .bind(item_id)
        .bind(request.service_name)
        .bind(request.payment_date)
        .bind(request.amount)
        .bind(request.hours)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let total = recompute_total(&mut *tx, order_id).await?;
        recompute_first_payment(&mut *tx, client_id).await?;
        tx.commit().await?;

        info!(
            order_id = order_id,
            item_id = item_id,
            total_amount = total,
            "Line item updated"
        );
        Ok(item)
    }

    /// Remove a line item
    pub async fn remove_item(&self, item_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let order_id = item_order_id(&mut *tx, item_id).await?;
        let client_id = order_client_id(&mut *tx, order_id).await?;

        sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        let total = recompute_total(&mut *tx, order_id).await?;
        recompute_first_payment(&mut *tx, client_id).await?;
        tx.commit().await?;

        info!(
            order_id = order_id,
            item_id = item_id,
            total_amount = total,
            "Line item removed"
        );
        Ok(())
    }

    /// Delete an order together with its line items
    ///
    /// The line items go with the order (cascade); the owning client's first
    /// payment date is recomputed over whatever orders remain.
    pub async fn delete_order(&self, order_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let client_id = order_client_id(&mut *tx, order_id).await?;

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        recompute_first_payment(&mut *tx, client_id).await?;
        tx.commit().await?;

        info!(order_id = order_id, client_id = client_id, "Order deleted");
        Ok(())
    }
}

/// Reject negative amounts and hours and blank service names before any write
fn validate_item_fields(service_name: Option<&str>, amount: Option<i64>, hours: Option<f64>) -> Result<()> {
    if matches!(service_name, Some(name) if name.trim().is_empty()) {
        return Err(StudioLedgerError::InvalidInput(
            "Service name cannot be empty".to_string()
        ));
    }

    if matches!(amount, Some(a) if a < 0) {
        return Err(StudioLedgerError::InvalidInput(
            "Amount cannot be negative".to_string()
        ));
    }

    if matches!(hours, Some(h) if h < 0.0 || !h.is_finite()) {
        return Err(StudioLedgerError::InvalidInput(
            "Hours must be a non-negative number".to_string()
        ));
    }

    Ok(())
}

/// Resolve an order's owning client, or fail with OrderNotFound
async fn order_client_id(conn: &mut SqliteConnection, order_id: i64) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT client_id FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|(client_id,)| client_id)
        .ok_or(StudioLedgerError::OrderNotFound { order_id })
}

/// Resolve a line item's order, or fail with OrderItemNotFound
async fn item_order_id(conn: &mut SqliteConnection, item_id: i64) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT order_id FROM order_items WHERE id = $1")
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|(order_id,)| order_id)
        .ok_or(StudioLedgerError::OrderItemNotFound { item_id })
}

async fn ensure_client_exists(conn: &mut SqliteConnection, client_id: i64) -> Result<()> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM clients WHERE id = $1")
        .bind(client_id)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|_| ())
        .ok_or(StudioLedgerError::ClientNotFound { client_id })
}

/// Write the sum of line-item amounts into the order's total_amount
async fn recompute_total(conn: &mut SqliteConnection, order_id: i64) -> Result<i64> {
    let total: (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(amount), 0) FROM order_items WHERE order_id = $1"
    )
    .bind(order_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("UPDATE orders SET total_amount = $2, updated_at = $3 WHERE id = $1")
        .bind(order_id)
        .bind(total.0)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

    Ok(total.0)
}

/// Write the minimum line-item payment date into the client's
/// first_order_date, NULL when the client has no line items left
async fn recompute_first_payment(conn: &mut SqliteConnection, client_id: i64) -> Result<Option<NaiveDate>> {
    let min: (Option<NaiveDate>,) = sqlx::query_as(
        r#"
        SELECT MIN(i.payment_date)
        FROM order_items i
        INNER JOIN orders o ON i.order_id = o.id
        WHERE o.client_id = $1
        "#
    )
    .bind(client_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("UPDATE clients SET first_order_date = $2, updated_at = $3 WHERE id = $1")
        .bind(client_id)
        .bind(min.0)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

    Ok(min.0)
}
