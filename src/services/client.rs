//! Client service implementation
//!
//! This service handles client registration, profile management, contact
//! field normalization, and group assignment. Contact fields reach the
//! repository only in canonical form; malformed input is rejected here.

use std::collections::HashMap;
use tracing::{info, debug};
use crate::config::settings::Settings;
use crate::database::repositories::{ClientRepository, GroupRepository};
use crate::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use crate::services::contact;
use crate::utils::errors::{StudioLedgerError, Result};
use crate::utils::logging::log_contact_rejected;

/// Client service for managing client records
#[derive(Debug, Clone)]
pub struct ClientService {
    client_repository: ClientRepository,
    group_repository: GroupRepository,
    settings: Settings,
}

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(client_repository: ClientRepository, group_repository: GroupRepository, settings: Settings) -> Self {
        Self {
            client_repository,
            group_repository,
            settings,
        }
    }

    /// Register a new client
    ///
    /// Contact fields are normalized into canonical form; empty strings are
    /// treated as absent. A nonexistent group is rejected before the write.
    pub async fn register_client(&self, request: CreateClientRequest) -> Result<Client> {
        if request.name.trim().is_empty() {
            return Err(StudioLedgerError::InvalidInput(
                "Client name cannot be empty".to_string()
            ));
        }

        if let Some(group_id) = request.group_id {
            if self.group_repository.find_by_id(group_id).await?.is_none() {
                return Err(StudioLedgerError::GroupNotFound { group_id });
            }
        }

        let normalized = CreateClientRequest {
            name: request.name.trim().to_string(),
            sex: request.sex,
            phone: normalize_optional(request.phone, contact::normalize_phone, "phone")?,
            vk_id: normalize_optional(request.vk_id, contact::normalize_vk, "vk_id")?,
            tg_id: normalize_optional(request.tg_id, contact::normalize_telegram, "tg_id")?,
            group_id: request.group_id,
        };

        let client = self.client_repository.create(normalized).await?;
        info!(client_id = client.id, "New client registered");

        Ok(client)
    }

    /// Get client by ID
    pub async fn get_client(&self, client_id: i64) -> Result<Option<Client>> {
        debug!(client_id = client_id, "Getting client by ID");
        self.client_repository.find_by_id(client_id).await
    }

    /// Update client profile
    pub async fn update_client(&self, client_id: i64, request: UpdateClientRequest) -> Result<Client> {
        debug!(client_id = client_id, "Updating client profile");

        if self.client_repository.find_by_id(client_id).await?.is_none() {
            return Err(StudioLedgerError::ClientNotFound { client_id });
        }

        if matches!(request.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(StudioLedgerError::InvalidInput(
                "Client name cannot be empty".to_string()
            ));
        }

        if let Some(group_id) = request.group_id {
            if self.group_repository.find_by_id(group_id).await?.is_none() {
                return Err(StudioLedgerError::GroupNotFound { group_id });
            }
        }

        let normalized = UpdateClientRequest {
            name: request.name.map(|name| name.trim().to_string()),
            sex: request.sex,
            phone: normalize_optional(request.phone, contact::normalize_phone, "phone")?,
            vk_id: normalize_optional(request.vk_id, contact::normalize_vk, "vk_id")?,
            tg_id: normalize_optional(request.tg_id, contact::normalize_telegram, "tg_id")?,
            group_id: request.group_id,
        };

        let client = self.client_repository.update(client_id, normalized).await?;
        info!(client_id = client_id, "Client profile updated");

        Ok(client)
    }

    /// Assign the client to a group, or clear the assignment
    pub async fn assign_group(&self, client_id: i64, group_id: Option<i64>) -> Result<Client> {
        if self.client_repository.find_by_id(client_id).await?.is_none() {
            return Err(StudioLedgerError::ClientNotFound { client_id });
        }

        if let Some(group_id) = group_id {
            if self.group_repository.find_by_id(group_id).await?.is_none() {
                return Err(StudioLedgerError::GroupNotFound { group_id });
            }
        }

        let client = self.client_repository.assign_group(client_id, group_id).await?;
        info!(client_id = client_id, group_id = ?group_id, "Client group assignment updated");

        Ok(client)
    }

    /// Delete client together with their orders and line items
    pub async fn delete_client(&self, client_id: i64) -> Result<()> {
        if self.client_repository.find_by_id(client_id).await?.is_none() {
            return Err(StudioLedgerError::ClientNotFound { client_id });
        }

        self.client_repository.delete(client_id).await?;
        info!(client_id = client_id, "Client deleted");

        Ok(())
    }

    /// Search clients by name pattern
    pub async fn search_clients(&self, pattern: &str) -> Result<Vec<Client>> {
        debug!(pattern = %pattern, "Searching clients by name pattern");

        if pattern.len() < 2 {
            return Err(StudioLedgerError::InvalidInput(
                "Search pattern must be at least 2 characters".to_string()
            ));
        }

        self.client_repository.find_by_name_pattern(pattern).await
    }

    /// List clients with pagination
    pub async fn list_clients(&self, limit: i64, offset: i64) -> Result<Vec<Client>> {
        debug!(limit = limit, offset = offset, "Listing clients with pagination");

        if limit > self.settings.pagination.max_page_size {
            return Err(StudioLedgerError::InvalidInput(format!(
                "Limit cannot exceed {}",
                self.settings.pagination.max_page_size
            )));
        }

        self.client_repository.list(limit, offset).await
    }

    /// Build display links for a client's contact fields
    ///
    /// Render-time transforms only; the canonical stored values stay as they
    /// are.
    pub fn contact_links(&self, client: &Client) -> serde_json::Value {
        serde_json::json!({
            "phone_display": client.phone.as_deref().map(contact::format_phone),
            "phone_link": client.phone.as_deref().map(contact::phone_tel_link),
            "vk_url": client.vk_id.as_deref().map(contact::vk_profile_url),
            "tg_url": client.tg_id.as_deref().map(contact::telegram_url),
        })
    }

    /// Get client statistics
    pub async fn get_client_statistics(&self) -> Result<HashMap<String, i64>> {
        debug!("Getting client statistics");

        let total_clients = self.client_repository.count().await?;
        let grouped_clients = self.client_repository.count_grouped().await?;

        let mut stats = HashMap::new();
        stats.insert("total_clients".to_string(), total_clients);
        stats.insert("grouped_clients".to_string(), grouped_clients);
        stats.insert("ungrouped_clients".to_string(), total_clients - grouped_clients);

        Ok(stats)
    }
}

/// Normalize an optional contact field, treating blank input as absent
fn normalize_optional<F>(value: Option<String>, normalize: F, field: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> Result<String>,
{
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => match normalize(&raw) {
            Ok(canonical) => Ok(Some(canonical)),
            Err(err) => {
                log_contact_rejected(field, &raw);
                Err(err)
            }
        },
    }
}
