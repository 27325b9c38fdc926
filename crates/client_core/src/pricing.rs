//! Cart totals and coupon lookup.
//!
//! Everything here is recomputed from the cart on each call. Amounts are plain
//! `f64` with no currency rounding.

use shared::domain::CartEntry;

pub const TAX_RATE_PERCENT: f64 = 10.0;
pub const COUPON_CODE: &str = "SAVE10";
pub const COUPON_DISCOUNT_PERCENT: f64 = 10.0;

/// Discount percentage granted by `code`, if it is a recognised coupon.
pub fn coupon_discount_rate(code: &str) -> Option<f64> {
    (code == COUPON_CODE).then_some(COUPON_DISCOUNT_PERCENT)
}

pub fn subtotal(entries: &[CartEntry]) -> f64 {
    entries.iter().map(CartEntry::line_total).sum()
}

pub fn discount(subtotal: f64, discount_rate: f64) -> f64 {
    subtotal * (discount_rate / 100.0)
}

pub fn tax(subtotal: f64, discount: f64) -> f64 {
    (subtotal - discount) * (TAX_RATE_PERCENT / 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub final_total: f64,
}

impl PriceBreakdown {
    pub fn compute(entries: &[CartEntry], discount_rate: f64) -> Self {
        let subtotal = subtotal(entries);
        let discount = discount(subtotal, discount_rate);
        let tax = tax(subtotal, discount);
        Self {
            subtotal,
            discount,
            tax,
            final_total: subtotal - discount + tax,
        }
    }
}
