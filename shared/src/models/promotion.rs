//! Promotion Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount kind with its value, as a closed tagged variant
///
/// External data carries the kind as text with legacy spellings;
/// [`DiscountKind::parse`] is the single place those spellings are
/// normalized. Internal code matches on the variant, never on strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percent of the order subtotal (nominal range 0-100)
    Percentage(Decimal),
    /// Flat amount off the order subtotal
    FixedAmount(Decimal),
}

impl DiscountKind {
    /// Normalize a stored discount-kind spelling
    ///
    /// Legacy rows spell percentage discounts as either `percent` or
    /// `percentage`, fixed ones as `fixed` or `fixed_amount`. Anything
    /// else is `None`, so a malformed promotion degrades to no discount
    /// instead of failing checkout.
    pub fn parse(kind: &str, value: Decimal) -> Option<Self> {
        match kind {
            "percent" | "percentage" => Some(DiscountKind::Percentage(value)),
            "fixed" | "fixed_amount" => Some(DiscountKind::FixedAmount(value)),
            _ => None,
        }
    }
}

/// Promotion entity
///
/// Created and edited by the catalog subsystem; strictly read-only to
/// order writing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: DiscountKind,
    /// Floor below which the promotion does not apply
    pub min_order_amount: Option<Decimal>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
}

impl Promotion {
    /// Active and inside the validity window, both ends inclusive
    pub fn is_eligible_at(&self, now: DateTime<Utc>) -> bool {
        self.active && self.starts_at <= now && now <= self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn make_promotion(active: bool) -> Promotion {
        Promotion {
            id: 1,
            store_id: 1,
            name: "10% off".to_string(),
            description: None,
            kind: DiscountKind::Percentage(Decimal::from(10)),
            min_order_amount: None,
            starts_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
            active,
        }
    }

    #[test]
    fn parse_accepts_both_percentage_spellings() {
        let v = Decimal::from(10);
        assert_eq!(DiscountKind::parse("percent", v), Some(DiscountKind::Percentage(v)));
        assert_eq!(DiscountKind::parse("percentage", v), Some(DiscountKind::Percentage(v)));
    }

    #[test]
    fn parse_accepts_both_fixed_spellings() {
        let v = Decimal::from(5);
        assert_eq!(DiscountKind::parse("fixed", v), Some(DiscountKind::FixedAmount(v)));
        assert_eq!(DiscountKind::parse("fixed_amount", v), Some(DiscountKind::FixedAmount(v)));
    }

    #[test]
    fn parse_rejects_unknown_spellings() {
        let v = Decimal::from(5);
        assert_eq!(DiscountKind::parse("FIXED", v), None);
        assert_eq!(DiscountKind::parse("percent ", v), None);
        assert_eq!(DiscountKind::parse("bogo", v), None);
        assert_eq!(DiscountKind::parse("", v), None);
    }

    #[test]
    fn eligibility_window_is_inclusive() {
        let promo = make_promotion(true);
        assert!(promo.is_eligible_at(promo.starts_at));
        assert!(promo.is_eligible_at(promo.ends_at));
        assert!(!promo.is_eligible_at(promo.starts_at - chrono::Duration::seconds(1)));
        assert!(!promo.is_eligible_at(promo.ends_at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn inactive_promotion_is_never_eligible() {
        let promo = make_promotion(false);
        let inside = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert!(!promo.is_eligible_at(inside));
    }
}
