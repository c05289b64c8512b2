//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, GroupRepository, ClientRepository, CatalogRepository, OrderRepository, OrderItemRepository};
use crate::models::*;
use crate::utils::errors::StudioLedgerError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub groups: GroupRepository,
    pub clients: ClientRepository,
    pub catalog: CatalogRepository,
    pub orders: OrderRepository,
    pub order_items: OrderItemRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            order_items: OrderItemRepository::new(pool),
        }
    }

    /// Get an existing group by name or create it
    pub async fn initialize_group(&self, name: String) -> Result<Group, StudioLedgerError> {
        if let Some(existing_group) = self.groups.find_by_name(&name).await? {
            return Ok(existing_group);
        }

        self.groups.create(CreateGroupRequest { name }).await
    }

    /// Create a new order for an existing client
    pub async fn create_order(&self, client_id: i64, execution_date: chrono::NaiveDate, status: Option<OrderStatus>) -> Result<Order, StudioLedgerError> {
        // Explicit check so a missing client surfaces as a typed error
        // instead of a foreign key violation
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(StudioLedgerError::ClientNotFound { client_id });
        }

        let request = CreateOrderRequest {
            client_id,
            execution_date,
            status,
        };

        self.orders.create(request).await
    }

    /// Get a client together with their orders and line items
    pub async fn get_client_overview(&self, client_id: i64) -> Result<serde_json::Value, StudioLedgerError> {
        let client = self.clients.find_by_id(client_id).await?
            .ok_or(StudioLedgerError::ClientNotFound { client_id })?;

        let orders = self.orders.list_by_client(client_id).await?;
        let order_views = futures::future::try_join_all(orders.into_iter().map(|order| async move {
            let items = self.order_items.list_by_order(order.id).await?;
            Ok::<_, StudioLedgerError>(serde_json::json!({
                "order": order,
                "items": items,
            }))
        }))
        .await?;

        Ok(serde_json::json!({
            "client": client,
            "orders": order_views,
        }))
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value, StudioLedgerError> {
        let stats = serde_json::json!({
            "groups": self.groups.count().await?,
            "clients": self.clients.count().await?,
            "services": self.catalog.count().await?,
            "orders": self.orders.count().await?,
        });

        Ok(stats)
    }
}
