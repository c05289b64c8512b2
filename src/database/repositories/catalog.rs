//! Service catalog repository implementation

use chrono::Utc;
use crate::database::connection::DatabasePool;
use crate::models::catalog::{Service, CreateServiceRequest, UpdateServiceRequest};
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: DatabasePool,
}

impl CatalogRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create a new catalog entry
    pub async fn create(&self, request: CreateServiceRequest) -> Result<Service, StudioLedgerError> {
        if request.min_price < 0 {
            return Err(StudioLedgerError::InvalidInput(
                "Minimum price cannot be negative".to_string()
            ));
        }

        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, min_price, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, min_price, description, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.min_price)
        .bind(request.description)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    /// Find catalog entry by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Service>, StudioLedgerError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, min_price, description, created_at, updated_at FROM services WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Update catalog entry
    ///
    /// Renaming never touches recorded line items; they keep the name text
    /// they were created with.
    pub async fn update(&self, id: i64, request: UpdateServiceRequest) -> Result<Service, StudioLedgerError> {
        if matches!(request.min_price, Some(p) if p < 0) {
            return Err(StudioLedgerError::InvalidInput(
                "Minimum price cannot be negative".to_string()
            ));
        }

        if self.find_by_id(id).await?.is_none() {
            return Err(StudioLedgerError::ServiceNotFound { service_id: id });
        }

        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = COALESCE($2, name),
                min_price = COALESCE($3, min_price),
                description = COALESCE($4, description),
                updated_at = $5
            WHERE id = $1
            RETURNING id, name, min_price, description, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.min_price)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    /// Delete catalog entry
    pub async fn delete(&self, id: i64) -> Result<(), StudioLedgerError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(StudioLedgerError::ServiceNotFound { service_id: id });
        }

        sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all catalog entries ordered by name
    pub async fn list(&self) -> Result<Vec<Service>, StudioLedgerError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, min_price, description, created_at, updated_at FROM services ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Count total catalog entries
    pub async fn count(&self) -> Result<i64, StudioLedgerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// List catalog entry names, the suggestion source for line items
    pub async fn names(&self) -> Result<Vec<String>, StudioLedgerError> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM services ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}
