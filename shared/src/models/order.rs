//! Order Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status
///
/// `Open` is persisted but not yet settled; `Paid` is terminal for this
/// flow (no further line-item or total mutation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    #[default]
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Paid => "paid",
        }
    }
}

/// Status text in a stored row that is neither `open` nor `paid`
#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0:?}")]
pub struct UnknownOrderStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OrderStatus::Open),
            "paid" => Ok(OrderStatus::Paid),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownOrderStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Order header entity
///
/// Monetary invariants are enforced at write time and backstopped by
/// CHECK constraints: `total = max(0, subtotal - discount) + tax_amount
/// + service_charge`, `discount <= subtotal`, all amounts non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub store_id: i64,
    /// Human-readable receipt number: `YYYYMMDD` + daily sequence
    pub order_number: String,
    /// Calendar day (UTC) the order number was issued for
    pub order_day: NaiveDate,
    pub subtotal: Decimal,
    pub discount: Decimal,
    /// Promotion whose discount applied to this order; None otherwise
    pub promotion_id: Option<i64>,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    /// Caller-supplied replay guard, unique per store when present
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Menu item identity at time of sale (snapshot, not a live join)
    pub menu_item_id: i64,
    /// Unit price at time of sale
    pub price: Decimal,
    pub quantity: Decimal,
    /// Line subtotal, always persisted explicitly
    pub subtotal: Decimal,
    /// Unit cost snapshot for later profit reporting
    pub cost_at_sale: Option<Decimal>,
    /// Opaque variant/customization text; never interpreted server-side
    pub note: Option<String>,
}

/// Identifiers returned for a successfully written order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedOrder {
    pub id: i64,
    pub order_number: String,
}
