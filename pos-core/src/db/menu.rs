//! Menu item database operations
//!
//! The cost/price lookup boundary consumed by order writing. Missing
//! rows are `None`, never errors: a menu item deleted mid-checkout must
//! not block the sale.

use rust_decimal::Decimal;
use shared::models::MenuItem;
use sqlx::PgPool;

/// Unit cost of a menu item, for the cost-at-sale snapshot
///
/// Soft-deleted items count as absent.
pub async fn unit_cost(
    conn: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
    menu_item_id: i64,
) -> Result<Option<Decimal>, sqlx::Error> {
    let row: Option<(Decimal,)> =
        sqlx::query_as("SELECT cost FROM menu_items WHERE id = $1 AND deleted_at IS NULL")
            .bind(menu_item_id)
            .fetch_optional(conn)
            .await?;

    Ok(row.map(|(cost,)| cost))
}

/// Fetch one menu item by id, scoped to its store
pub async fn fetch(
    pool: &PgPool,
    store_id: i64,
    menu_item_id: i64,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>(
        "SELECT id, store_id, name, price, cost, description, image_url,
            category_id, available, created_at, updated_at
            FROM menu_items
            WHERE id = $1 AND store_id = $2 AND deleted_at IS NULL",
    )
    .bind(menu_item_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await
}
