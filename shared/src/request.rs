//! Request types for the shared crate
//!
//! Payloads submitted by ordering clients. Numbers arrive as raw JSON
//! values; missing price/quantity default to 0 and are validated by the
//! backend, never trusted.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// One cart line as submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub menu_item_id: i64,
    /// Unit price the client displayed (re-checked server-side)
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: f64,
    /// Opaque variant/customization text
    #[serde(default)]
    pub note: Option<String>,
}

/// Order-creation payload
///
/// Client-side subtotal/discount/total figures are deliberately absent:
/// the backend recomputes every amount from the raw lines and the
/// freshly resolved promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub items: Vec<CartItemInput>,
    #[serde(default)]
    pub promotion_id: Option<i64>,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub service_charge: f64,
    #[serde(default)]
    pub status: OrderStatus,
    /// Replay guard for client retries, unique per store when present
    #[serde(default)]
    pub idempotency_key: Option<String>,
}
