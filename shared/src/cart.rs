//! Optimistic cart totals
//!
//! The ordering UI recomputes subtotal/discount/total locally on every
//! cart mutation so the screen updates without a round trip. These are
//! display estimates only: at submission the backend recomputes every
//! figure from the raw lines and the freshly resolved promotion, and
//! never accepts the client's numbers.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::models::{DiscountKind, Promotion};
use crate::request::CartItemInput;

/// Display totals for the cart screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

fn coerce(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

fn round2(n: f64) -> f64 {
    ((coerce(n) + f64::EPSILON) * 100.0).round() / 100.0
}

fn promotion_discount(subtotal: f64, promotion: Option<&Promotion>, now: DateTime<Utc>) -> f64 {
    let Some(promo) = promotion else { return 0.0 };
    if !promo.is_eligible_at(now) {
        return 0.0;
    }
    if let Some(min) = promo.min_order_amount {
        if subtotal < min.to_f64().unwrap_or(0.0) {
            return 0.0;
        }
    }
    let cap = subtotal.max(0.0);
    match promo.kind {
        DiscountKind::Percentage(p) => {
            let pct = p.to_f64().unwrap_or(0.0).max(0.0);
            round2(subtotal * (pct / 100.0)).max(0.0).min(cap)
        }
        DiscountKind::FixedAmount(v) => round2(v.to_f64().unwrap_or(0.0)).max(0.0).min(cap),
    }
}

/// Recompute display totals for the current cart
///
/// The previewed `total` is `subtotal - discount`; tax and service
/// charge are settled at checkout and not shown in the cart.
pub fn estimate_totals(
    items: &[CartItemInput],
    promotion: Option<&Promotion>,
    now: DateTime<Utc>,
) -> CartTotals {
    let subtotal = round2(
        items
            .iter()
            .map(|it| coerce(it.price) * coerce(it.quantity))
            .sum::<f64>(),
    );
    let discount = round2(promotion_discount(subtotal, promotion, now));
    let total = round2(subtotal - discount);
    CartTotals { subtotal, discount, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn line(menu_item_id: i64, price: f64, quantity: f64) -> CartItemInput {
        CartItemInput { menu_item_id, price, quantity, note: None }
    }

    fn promo(kind: DiscountKind, min_order: Option<i64>) -> Promotion {
        Promotion {
            id: 1,
            store_id: 1,
            name: "promo".to_string(),
            description: None,
            kind,
            min_order_amount: min_order.map(Decimal::from),
            starts_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(),
            active: true,
        }
    }

    fn mid_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_promotion_totals() {
        let totals = estimate_totals(&[line(1, 50.0, 2.0)], None, mid_2025());
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn percentage_discount_with_min_order_met() {
        let p = promo(DiscountKind::Percentage(Decimal::from(10)), Some(50));
        let totals = estimate_totals(&[line(1, 100.0, 1.0)], Some(&p), mid_2025());
        assert_eq!(totals.discount, 10.0);
        assert_eq!(totals.total, 90.0);
    }

    #[test]
    fn fixed_discount_clamps_to_subtotal() {
        let p = promo(DiscountKind::FixedAmount(Decimal::from(50)), None);
        let totals = estimate_totals(&[line(1, 30.0, 1.0)], Some(&p), mid_2025());
        assert_eq!(totals.discount, 30.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn expired_promotion_gives_no_discount() {
        let p = promo(DiscountKind::Percentage(Decimal::from(50)), None);
        let after_end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let totals = estimate_totals(&[line(1, 100.0, 1.0)], Some(&p), after_end);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn min_order_boundary_is_exact() {
        let p = promo(DiscountKind::Percentage(Decimal::from(10)), Some(100));
        let at = estimate_totals(&[line(1, 100.0, 1.0)], Some(&p), mid_2025());
        assert_eq!(at.discount, 10.0);
        let below = estimate_totals(&[line(1, 99.99, 1.0)], Some(&p), mid_2025());
        assert_eq!(below.discount, 0.0);
    }

    #[test]
    fn float_noise_rounds_away() {
        // 0.1 * 3 accumulates binary noise; the display value must not
        let totals = estimate_totals(
            &[line(1, 0.1, 1.0), line(2, 0.1, 1.0), line(3, 0.1, 1.0)],
            None,
            mid_2025(),
        );
        assert_eq!(totals.subtotal, 0.3);
        assert_eq!(totals.total, 0.3);
    }

    #[test]
    fn non_finite_inputs_are_treated_as_zero() {
        let totals = estimate_totals(&[line(1, f64::NAN, 2.0), line(2, 10.0, 1.0)], None, mid_2025());
        assert_eq!(totals.subtotal, 10.0);
    }
}
