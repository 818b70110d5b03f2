//! Promotion Resolver
//!
//! Tolerant by design: a promotion id that is absent, unknown, inactive
//! or outside its validity window resolves to `None`, never an error.
//! Clients pre-filter promotions that may go stale between page load and
//! checkout; stale state must not block the sale.

use chrono::{DateTime, Utc};
use shared::models::Promotion;

use crate::db;

/// Resolve a promotion reference to a currently eligible promotion
pub async fn resolve(
    conn: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
    store_id: i64,
    promotion_id: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Option<Promotion>, sqlx::Error> {
    let Some(id) = promotion_id else {
        return Ok(None);
    };

    let Some(promotion) = db::promotions::fetch(conn, store_id, id).await? else {
        tracing::debug!(store_id, promotion_id = id, "Promotion not found, no discount");
        return Ok(None);
    };

    if !promotion.is_eligible_at(now) {
        tracing::debug!(
            store_id,
            promotion_id = id,
            active = promotion.active,
            "Promotion not eligible at order time, no discount"
        );
        return Ok(None);
    }

    Ok(Some(promotion))
}
