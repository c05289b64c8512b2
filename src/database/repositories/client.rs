//! Client repository implementation
//!
//! Contact fields are expected in canonical form; normalization happens in
//! the client service before anything reaches this layer.

use chrono::Utc;
use crate::database::connection::DatabasePool;
use crate::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: DatabasePool,
}

impl ClientRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create a new client
    pub async fn create(&self, request: CreateClientRequest) -> Result<Client, StudioLedgerError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, sex, phone, vk_id, tg_id, group_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.sex)
        .bind(request.phone)
        .bind(request.vk_id)
        .bind(request.tg_id)
        .bind(request.group_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Find client by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>, StudioLedgerError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at FROM clients WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Update client
    pub async fn update(&self, id: i64, request: UpdateClientRequest) -> Result<Client, StudioLedgerError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                sex = COALESCE($3, sex),
                phone = COALESCE($4, phone),
                vk_id = COALESCE($5, vk_id),
                tg_id = COALESCE($6, tg_id),
                group_id = COALESCE($7, group_id),
                updated_at = $8
            WHERE id = $1
            RETURNING id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.sex)
        .bind(request.phone)
        .bind(request.vk_id)
        .bind(request.tg_id)
        .bind(request.group_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Assign or clear the client's group
    ///
    /// Separate from update because COALESCE cannot write NULL.
    pub async fn assign_group(&self, id: i64, group_id: Option<i64>) -> Result<Client, StudioLedgerError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET group_id = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(group_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Delete client
    ///
    /// Cascades to the client's orders and their line items.
    pub async fn delete(&self, id: i64) -> Result<(), StudioLedgerError> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all clients with pagination, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Client>, StudioLedgerError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at FROM clients ORDER BY id DESC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Count total clients
    pub async fn count(&self) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Find clients by name pattern
    pub async fn find_by_name_pattern(&self, pattern: &str) -> Result<Vec<Client>, StudioLedgerError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at FROM clients WHERE name LIKE $1 ORDER BY name ASC"
        )
        .bind(format!("%{}%", pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Count clients assigned to any group
    pub async fn count_grouped(&self) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients WHERE group_id IS NOT NULL")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// List clients belonging to a group
    pub async fn list_by_group(&self, group_id: i64) -> Result<Vec<Client>, StudioLedgerError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, sex, phone, vk_id, tg_id, group_id, first_order_date, created_at, updated_at FROM clients WHERE group_id = $1 ORDER BY name ASC"
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }
}
