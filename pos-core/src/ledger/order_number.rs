//! Order Number Generator
//!
//! Human-readable receipt numbers: `YYYYMMDD` plus a zero-padded
//! sequence that resets each calendar day (UTC) per store. The next
//! value is claimed with an upsert on `order_day_counters` inside the
//! caller's transaction; concurrent claims serialize on the counter
//! row's lock, so two committed orders can never share a number.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgConnection;

/// A number claimed for one order
#[derive(Debug, Clone)]
pub struct IssuedNumber {
    /// The day the sequence belongs to; the header must persist this
    /// same day so the per-day uniqueness constraint lines up
    pub order_day: NaiveDate,
    pub sequence: i64,
    pub number: String,
}

/// Format a receipt number from its day and daily sequence
///
/// The sequence is padded to four digits and keeps growing past 9999
/// on a very busy day rather than truncating.
pub fn format_order_number(day: NaiveDate, sequence: i64) -> String {
    format!("{}{:04}", day.format("%Y%m%d"), sequence)
}

/// Claim the next number for `store_id` on the calendar day of `now`
///
/// Must run inside the transaction that inserts the order: if that
/// transaction rolls back, the counter increment rolls back with it and
/// the value is handed out again, so committed sequences have no holes
/// from failed writes.
pub async fn next(
    conn: &mut PgConnection,
    store_id: i64,
    now: DateTime<Utc>,
) -> Result<IssuedNumber, sqlx::Error> {
    let order_day = now.date_naive();

    let (sequence,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO order_day_counters (store_id, order_day, last_seq)
        VALUES ($1, $2, 1)
        ON CONFLICT (store_id, order_day)
        DO UPDATE SET last_seq = order_day_counters.last_seq + 1
        RETURNING last_seq
        "#,
    )
    .bind(store_id)
    .bind(order_day)
    .fetch_one(&mut *conn)
    .await?;

    Ok(IssuedNumber {
        order_day,
        sequence,
        number: format_order_number(order_day, sequence),
    })
}
