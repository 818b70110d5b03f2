//! Order database operations (read side)
//!
//! Writes go through the ledger writer only; everything here is lookup
//! and reporting.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{CreatedOrder, Order, OrderItem};
use sqlx::PgPool;

use crate::ledger::order_number;

/// Per-day paid totals, summed straight off the ledger
#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct DailySummary {
    pub sale_day: NaiveDate,
    pub orders_paid: i64,
    pub subtotal_paid: Decimal,
    pub discount_paid: Decimal,
    pub tax_paid: Decimal,
    pub service_paid: Decimal,
    pub total_paid: Decimal,
}

/// Fetch one order header by id, scoped to its store
pub async fn fetch(
    pool: &PgPool,
    store_id: i64,
    order_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, store_id, order_number, order_day, subtotal, discount,
            promotion_id, tax_amount, service_charge, total, status,
            idempotency_key, created_at
            FROM orders
            WHERE id = $1 AND store_id = $2",
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await
}

/// Fetch the line items of an order, in insertion order
pub async fn fetch_items(pool: &PgPool, order_id: i64) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, price, quantity, subtotal,
            cost_at_sale, note
            FROM order_items
            WHERE order_id = $1
            ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

/// List a store's most recent orders
pub async fn list_recent(
    pool: &PgPool,
    store_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, store_id, order_number, order_day, subtotal, discount,
            promotion_id, tax_amount, service_charge, total, status,
            idempotency_key, created_at
            FROM orders
            WHERE store_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3",
    )
    .bind(store_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Look up an already-written order by its replay key
pub async fn find_by_idempotency_key(
    conn: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
    store_id: i64,
    key: &str,
) -> Result<Option<CreatedOrder>, sqlx::Error> {
    let row: Option<(i64, String)> = sqlx::query_as(
        "SELECT id, order_number FROM orders WHERE store_id = $1 AND idempotency_key = $2",
    )
    .bind(store_id)
    .bind(key)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|(id, order_number)| CreatedOrder { id, order_number }))
}

/// Preview the next receipt number without claiming it
///
/// Display-only: the value is not reserved, so the order that ends up
/// carrying it may be a different caller's under concurrency.
pub async fn peek_next_number(
    pool: &PgPool,
    store_id: i64,
    now: DateTime<Utc>,
) -> Result<String, sqlx::Error> {
    let order_day = now.date_naive();
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT last_seq FROM order_day_counters WHERE store_id = $1 AND order_day = $2",
    )
    .bind(store_id)
    .bind(order_day)
    .fetch_optional(pool)
    .await?;

    let next_seq = row.map(|(seq,)| seq + 1).unwrap_or(1);
    Ok(order_number::format_order_number(order_day, next_seq))
}

/// Paid totals for one store-day, or `None` when nothing was paid
pub async fn daily_summary(
    pool: &PgPool,
    store_id: i64,
    day: NaiveDate,
) -> Result<Option<DailySummary>, sqlx::Error> {
    sqlx::query_as::<_, DailySummary>(
        "SELECT order_day AS sale_day,
            COUNT(*) AS orders_paid,
            SUM(subtotal) AS subtotal_paid,
            SUM(discount) AS discount_paid,
            SUM(tax_amount) AS tax_paid,
            SUM(service_charge) AS service_paid,
            SUM(total) AS total_paid
            FROM orders
            WHERE store_id = $1 AND order_day = $2 AND status = 'paid'
            GROUP BY order_day",
    )
    .bind(store_id)
    .bind(day)
    .fetch_optional(pool)
    .await
}
