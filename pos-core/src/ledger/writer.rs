//! Order Ledger Writer
//!
//! The orchestrator: validates the cart, recomputes every amount from
//! the raw lines and the freshly resolved promotion, claims a receipt
//! number and persists header plus items in one transaction. Client-sent
//! totals are never accepted; the request carries lines and references
//! only. An order is either fully written or not written at all.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{CreatedOrder, OrderStatus};
use shared::request::{CartItemInput, OrderCreateRequest};
use sqlx::PgPool;

use crate::db;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{order_number, resolver};
use crate::money::{self, MAX_PRICE, MAX_QUANTITY};

/// A validated line with its server-computed subtotal
#[derive(Debug, Clone)]
pub(crate) struct PricedLine {
    pub menu_item_id: i64,
    pub price: Decimal,
    pub quantity: Decimal,
    pub subtotal: Decimal,
    pub note: Option<String>,
}

/// A cart priced and ready to persist
#[derive(Debug, Clone)]
pub(crate) struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
}

/// Server-computed order amounts
///
/// Holds `total = max(0, subtotal - discount) + tax + service` with
/// `0 <= discount <= subtotal` by construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
}

/// An order fully computed but not yet persisted
#[derive(Debug, Clone)]
pub(crate) struct OrderDraft<'a> {
    pub cart: &'a PricedCart,
    pub totals: OrderTotals,
    /// Promotion whose discount applied; an id that failed to resolve,
    /// or resolved but moved no money, is never persisted
    pub promotion_id: Option<i64>,
    pub status: OrderStatus,
    pub idempotency_key: Option<&'a str>,
}

/// Validate raw cart lines and compute each line subtotal
///
/// The whole request is rejected on the first offending line, carrying
/// its index; lines are never silently dropped. Unit prices are rounded
/// to 2dp and quantities to 3dp before multiplication, so the persisted
/// columns reproduce each line subtotal exactly.
pub(crate) fn price_cart(items: &[CartItemInput]) -> LedgerResult<PricedCart> {
    if items.is_empty() {
        return Err(LedgerError::EmptyOrder);
    }

    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        if !item.price.is_finite() {
            return Err(LedgerError::invalid_item(
                index,
                format!("price must be a finite number, got {}", item.price),
            ));
        }
        if item.price < 0.0 {
            return Err(LedgerError::invalid_item(
                index,
                format!("price must be non-negative, got {}", item.price),
            ));
        }
        if item.price > MAX_PRICE {
            return Err(LedgerError::invalid_item(
                index,
                format!("price exceeds maximum allowed ({MAX_PRICE}), got {}", item.price),
            ));
        }
        if !item.quantity.is_finite() {
            return Err(LedgerError::invalid_item(
                index,
                format!("quantity must be a finite number, got {}", item.quantity),
            ));
        }
        if item.quantity > MAX_QUANTITY {
            return Err(LedgerError::invalid_item(
                index,
                format!(
                    "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
                    item.quantity
                ),
            ));
        }

        let price = money::round2(money::to_decimal(item.price));
        let quantity = money::round_qty(money::to_decimal(item.quantity));
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::invalid_item(
                index,
                format!("quantity must be at least 0.001, got {}", item.quantity),
            ));
        }

        let line_subtotal = money::round2(price * quantity);
        subtotal += line_subtotal;
        lines.push(PricedLine {
            menu_item_id: item.menu_item_id,
            price,
            quantity,
            subtotal: line_subtotal,
            note: item.note.clone(),
        });
    }

    Ok(PricedCart {
        lines,
        subtotal: money::round2(subtotal),
    })
}

/// Combine the priced cart with discount, tax and service charge
///
/// Negative tax/service inputs are coerced to zero; non-finite ones are
/// rejected before any coercion can mask them.
pub(crate) fn compute_totals(
    cart: &PricedCart,
    discount: Decimal,
    tax_amount: f64,
    service_charge: f64,
) -> LedgerResult<OrderTotals> {
    if !tax_amount.is_finite() || !service_charge.is_finite() {
        return Err(LedgerError::InvalidTotal);
    }

    let tax = money::round2(money::to_decimal(tax_amount).max(Decimal::ZERO));
    let service = money::round2(money::to_decimal(service_charge).max(Decimal::ZERO));
    let total = money::round2((cart.subtotal - discount).max(Decimal::ZERO) + tax + service);

    if total < Decimal::ZERO {
        return Err(LedgerError::InvalidTotal);
    }

    Ok(OrderTotals {
        subtotal: cart.subtotal,
        discount,
        tax_amount: tax,
        service_charge: service,
        total,
    })
}

/// Write an order to the ledger
pub async fn create_order(
    pool: &PgPool,
    store_id: i64,
    request: &OrderCreateRequest,
) -> LedgerResult<CreatedOrder> {
    create_order_at(pool, store_id, request, Utc::now()).await
}

/// [`create_order`] with an explicit clock
///
/// Promotion eligibility and the receipt day both derive from `now`, so
/// pinning it makes order writing deterministic under test.
pub async fn create_order_at(
    pool: &PgPool,
    store_id: i64,
    request: &OrderCreateRequest,
    now: DateTime<Utc>,
) -> LedgerResult<CreatedOrder> {
    let cart = price_cart(&request.items)?;

    let promotion = resolver::resolve(pool, store_id, request.promotion_id, now).await?;
    let discount = super::compute_discount(cart.subtotal, promotion.as_ref());
    let totals = compute_totals(&cart, discount, request.tax_amount, request.service_charge)?;

    let draft = OrderDraft {
        cart: &cart,
        totals,
        promotion_id: promotion
            .as_ref()
            .map(|p| p.id)
            .filter(|_| totals.discount > Decimal::ZERO),
        status: request.status,
        idempotency_key: request.idempotency_key.as_deref(),
    };
    let created = persist_order(pool, store_id, &draft, now).await?;

    tracing::info!(
        store_id,
        order_id = created.id,
        order_number = %created.order_number,
        total = %totals.total,
        status = draft.status.as_str(),
        "Order written"
    );

    Ok(created)
}

/// Persist a draft, resolving a lost idempotency race to its winner
///
/// When two requests carry the same key concurrently, the loser's insert
/// hits the unique index after the winner commits; the loser's write is
/// rolled back and the winner's identifiers are returned instead.
pub(crate) async fn persist_order(
    pool: &PgPool,
    store_id: i64,
    draft: &OrderDraft<'_>,
    now: DateTime<Utc>,
) -> LedgerResult<CreatedOrder> {
    match insert_order(pool, store_id, draft, now).await {
        Err(LedgerError::Persistence(err)) if is_idempotency_conflict(&err) => {
            let Some(key) = draft.idempotency_key else {
                return Err(LedgerError::Persistence(err));
            };
            match db::orders::find_by_idempotency_key(pool, store_id, key).await? {
                Some(existing) => {
                    tracing::info!(
                        store_id,
                        order_id = existing.id,
                        "Concurrent replay resolved to the first committed order"
                    );
                    Ok(existing)
                }
                None => Err(LedgerError::Persistence(err)),
            }
        }
        other => other,
    }
}

/// One atomic write attempt: number claim, header, items, paid transition
async fn insert_order(
    pool: &PgPool,
    store_id: i64,
    draft: &OrderDraft<'_>,
    now: DateTime<Utc>,
) -> LedgerResult<CreatedOrder> {
    let mut tx = pool.begin().await?;

    // Replay of a key we already served returns the original identifiers.
    if let Some(key) = draft.idempotency_key
        && let Some(existing) = db::orders::find_by_idempotency_key(&mut *tx, store_id, key).await?
    {
        tx.commit().await?;
        tracing::info!(
            store_id,
            order_id = existing.id,
            "Idempotent replay, returning original order"
        );
        return Ok(existing);
    }

    let issued = order_number::next(&mut tx, store_id, now).await?;

    let (order_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO orders (
            store_id, order_number, order_day,
            subtotal, discount, promotion_id,
            tax_amount, service_charge, total,
            status, idempotency_key
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id
        "#,
    )
    .bind(store_id)
    .bind(&issued.number)
    .bind(issued.order_day)
    .bind(draft.totals.subtotal)
    .bind(draft.totals.discount)
    .bind(draft.promotion_id)
    .bind(draft.totals.tax_amount)
    .bind(draft.totals.service_charge)
    .bind(draft.totals.total)
    .bind(OrderStatus::Open.as_str())
    .bind(draft.idempotency_key)
    .fetch_one(&mut *tx)
    .await?;

    for line in &draft.cart.lines {
        // Missing cost never blocks the sale; it snapshots as zero.
        let cost_at_sale = db::menu::unit_cost(&mut *tx, line.menu_item_id)
            .await?
            .unwrap_or(Decimal::ZERO);

        sqlx::query(
            r#"
            INSERT INTO order_items (
                order_id, menu_item_id, price, quantity, subtotal, cost_at_sale, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(order_id)
        .bind(line.menu_item_id)
        .bind(line.price)
        .bind(line.quantity)
        .bind(line.subtotal)
        .bind(cost_at_sale)
        .bind(&line.note)
        .execute(&mut *tx)
        .await?;
    }

    // Paid is the final statement of the transaction; a header is never
    // observable as paid without all of its items.
    if draft.status == OrderStatus::Paid {
        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(OrderStatus::Paid.as_str())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(CreatedOrder {
        id: order_id,
        order_number: issued.number,
    })
}

fn is_idempotency_conflict(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("idx_orders_idempotency"))
}
