//! Menu Item Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// Catalog CRUD lives in its own subsystem; order writing only reads
/// `price` and `cost` from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub price: Decimal,
    /// Unit cost snapshotted onto order lines at sale time
    pub cost: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
