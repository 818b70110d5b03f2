//! Promotion database operations
//!
//! Promotions are created and edited by the catalog subsystem; order
//! writing only ever reads them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{DiscountKind, Promotion};
use sqlx::PgPool;

/// Raw promotion row; the discount kind spelling is normalized on read
#[derive(sqlx::FromRow)]
struct PromotionRow {
    id: i64,
    store_id: i64,
    name: String,
    description: Option<String>,
    discount_kind: String,
    discount_value: Decimal,
    min_order_amount: Option<Decimal>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    active: bool,
}

impl PromotionRow {
    /// A row whose kind does not normalize degrades to no promotion
    /// rather than blocking checkout.
    fn normalize(self) -> Option<Promotion> {
        let Some(kind) = DiscountKind::parse(&self.discount_kind, self.discount_value) else {
            tracing::warn!(
                promotion_id = self.id,
                discount_kind = %self.discount_kind,
                "Unknown discount kind on promotion, ignoring it"
            );
            return None;
        };
        Some(Promotion {
            id: self.id,
            store_id: self.store_id,
            name: self.name,
            description: self.description,
            kind,
            min_order_amount: self.min_order_amount,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            active: self.active,
        })
    }
}

/// Fetch one promotion by id, scoped to its store
pub async fn fetch(
    conn: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
    store_id: i64,
    promotion_id: i64,
) -> Result<Option<Promotion>, sqlx::Error> {
    let row: Option<PromotionRow> = sqlx::query_as(
        "SELECT id, store_id, name, description, discount_kind, discount_value,
            min_order_amount, starts_at, ends_at, active
            FROM promotions
            WHERE id = $1 AND store_id = $2",
    )
    .bind(promotion_id)
    .bind(store_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.and_then(PromotionRow::normalize))
}

/// List promotions currently inside their validity window
///
/// The read the ordering UI shows at checkout; rows with an unknown
/// discount kind are dropped here as well.
pub async fn list_active(
    pool: &PgPool,
    store_id: i64,
    at: DateTime<Utc>,
) -> Result<Vec<Promotion>, sqlx::Error> {
    let rows: Vec<PromotionRow> = sqlx::query_as(
        "SELECT id, store_id, name, description, discount_kind, discount_value,
            min_order_amount, starts_at, ends_at, active
            FROM promotions
            WHERE store_id = $1 AND active = TRUE AND starts_at <= $2 AND ends_at >= $2
            ORDER BY starts_at, id",
    )
    .bind(store_id)
    .bind(at)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(PromotionRow::normalize).collect())
}
