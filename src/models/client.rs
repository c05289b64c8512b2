//! Client model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};

/// Client sex, stored as a single-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, EnumString, Display, Default)]
pub enum Sex {
    #[default]
    #[sqlx(rename = "M")]
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Male,
    #[sqlx(rename = "F")]
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub sex: Sex,
    /// Canonical digit string (11 digits starting with the country code)
    pub phone: Option<String>,
    /// Canonical VK identifier: numeric id or handle, no scheme or domain
    pub vk_id: Option<String>,
    /// Canonical Telegram handle, no scheme, path prefix or `@`
    pub tg_id: Option<String>,
    pub group_id: Option<i64>,
    /// Derived: minimum payment date across all line items under this
    /// client's orders. Never written directly by callers.
    pub first_order_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub sex: Sex,
    pub phone: Option<String>,
    pub vk_id: Option<String>,
    pub tg_id: Option<String>,
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub phone: Option<String>,
    pub vk_id: Option<String>,
    pub tg_id: Option<String>,
    pub group_id: Option<i64>,
}
