//! # Basket Totals
//!
//! Footer summary over the basket's engine-supplied amounts.
//!
//! Pure summation for display: the business-rules engine already computed
//! every line's extended amount (including signs on returns); this module
//! only adds them up for the footer row.

use serde::Serialize;

use crate::basket::Basket;
use lane_core::money::Money;

/// Basket totals summary for the display footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    /// Sum of engine-supplied extended amounts (signed).
    pub extended_amount: Money,
}

impl From<&Basket> for BasketTotals {
    fn from(basket: &Basket) -> Self {
        BasketTotals {
            line_count: basket.line_count(),
            total_quantity: basket.lines().iter().map(|l| l.quantity).sum(),
            extended_amount: basket.lines().iter().map(|l| l.extended_amount()).sum(),
        }
    }
}
