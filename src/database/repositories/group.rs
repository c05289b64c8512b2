//! Group repository implementation

use chrono::Utc;
use crate::database::connection::DatabasePool;
use crate::models::group::{Group, CreateGroupRequest, UpdateGroupRequest};
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: DatabasePool,
}

impl GroupRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create a new group
    ///
    /// A duplicate name violates the unique constraint and surfaces as a
    /// rejected operation.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group, StudioLedgerError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, StudioLedgerError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at, updated_at FROM groups WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find group by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Group>, StudioLedgerError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at, updated_at FROM groups WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Update group
    pub async fn update(&self, id: i64, request: UpdateGroupRequest) -> Result<Group, StudioLedgerError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            UPDATE groups
            SET name = COALESCE($2, name),
                updated_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Delete group
    ///
    /// Rejected with GroupInUse while any client references the group. The
    /// foreign key RESTRICT backs up the explicit check.
    pub async fn delete(&self, id: i64) -> Result<(), StudioLedgerError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(StudioLedgerError::GroupNotFound { group_id: id });
        }

        let client_count = self.client_count(id).await?;
        if client_count > 0 {
            return Err(StudioLedgerError::GroupInUse { group_id: id, client_count });
        }

        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all groups ordered by name
    pub async fn list(&self) -> Result<Vec<Group>, StudioLedgerError> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at, updated_at FROM groups ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Count total groups
    pub async fn count(&self) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count clients referencing a group
    pub async fn client_count(&self, id: i64) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM clients WHERE group_id = $1"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
