//! Discount Calculator
//!
//! Pure and deterministic: given the rounded subtotal and the resolved
//! promotion, produce the discount amount. The ordering UI carries its
//! own estimate of these rules for display; this one is authoritative.

use rust_decimal::Decimal;
use shared::models::{DiscountKind, Promotion};

use crate::money::round2;

/// Compute the discount a resolved promotion grants on `subtotal`
///
/// `subtotal` must already be rounded to 2dp and non-negative. The result
/// is always within `[0, subtotal]`. A promotion whose minimum order
/// amount is not reached contributes nothing; that is silent, not an
/// error.
pub fn compute_discount(subtotal: Decimal, promotion: Option<&Promotion>) -> Decimal {
    let Some(promotion) = promotion else {
        return Decimal::ZERO;
    };

    if let Some(min) = promotion.min_order_amount
        && subtotal < min
    {
        return Decimal::ZERO;
    }

    let raw = match promotion.kind {
        DiscountKind::Percentage(pct) => round2(subtotal * pct / Decimal::ONE_HUNDRED),
        DiscountKind::FixedAmount(v) => round2(v),
    };

    raw.min(subtotal).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn promo(kind: DiscountKind, min_order_amount: Option<Decimal>) -> Promotion {
        Promotion {
            id: 1,
            store_id: 1,
            name: "test".to_string(),
            description: None,
            kind,
            min_order_amount,
            starts_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap(),
            active: true,
        }
    }

    #[test]
    fn no_promotion_means_no_discount() {
        assert_eq!(compute_discount(Decimal::from(100), None), Decimal::ZERO);
    }

    #[test]
    fn percentage_of_subtotal() {
        let p = promo(DiscountKind::Percentage(Decimal::from(10)), None);
        assert_eq!(
            compute_discount(Decimal::from(100), Some(&p)),
            Decimal::from(10)
        );
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 12.5% of 10.05 = 1.25625 -> 1.26
        let p = promo(DiscountKind::Percentage(Decimal::new(125, 1)), None);
        assert_eq!(
            compute_discount(Decimal::new(1005, 2), Some(&p)),
            Decimal::new(126, 2)
        );
    }

    #[test]
    fn percentage_above_hundred_clamps_to_subtotal() {
        let p = promo(DiscountKind::Percentage(Decimal::from(150)), None);
        assert_eq!(
            compute_discount(Decimal::from(80), Some(&p)),
            Decimal::from(80)
        );
    }

    #[test]
    fn negative_percentage_clamps_to_zero() {
        let p = promo(DiscountKind::Percentage(Decimal::from(-5)), None);
        assert_eq!(compute_discount(Decimal::from(80), Some(&p)), Decimal::ZERO);
    }

    #[test]
    fn fixed_amount_caps_at_subtotal() {
        let p = promo(DiscountKind::FixedAmount(Decimal::from(50)), None);
        assert_eq!(
            compute_discount(Decimal::from(30), Some(&p)),
            Decimal::from(30)
        );
        assert_eq!(
            compute_discount(Decimal::from(70), Some(&p)),
            Decimal::from(50)
        );
    }

    #[test]
    fn min_order_boundary_is_inclusive() {
        let p = promo(
            DiscountKind::Percentage(Decimal::from(10)),
            Some(Decimal::from(50)),
        );
        // Exactly at the floor: applies
        assert_eq!(
            compute_discount(Decimal::from(50), Some(&p)),
            Decimal::from(5)
        );
        // One cent below: does not
        assert_eq!(
            compute_discount(Decimal::new(4999, 2), Some(&p)),
            Decimal::ZERO
        );
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let p = promo(DiscountKind::Percentage(Decimal::from(15)), None);
        let subtotal = Decimal::new(12345, 2);
        assert_eq!(
            compute_discount(subtotal, Some(&p)),
            compute_discount(subtotal, Some(&p))
        );
    }
}
