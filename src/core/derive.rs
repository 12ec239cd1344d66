//! Derivation engine: per-point sums, base total and the markup/VAT cascade.

use crate::core::data::{Ledger, POINTS};
use crate::utils::format::{format_integer, CurrencyFormat};

/// Markup applied to the base total
pub const MARKUP_RATE: f64 = 0.35;
/// VAT applied to the base total plus markup
pub const VAT_RATE: f64 = 0.07;

/// Derived values for a ledger. Never stored; rebuilt by [`recompute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// One entry per row, in ledger order
    pub row_totals: Vec<f64>,
    pub per_point: [f64; POINTS],
    pub base_total: f64,
    pub markup: f64,
    pub subtotal_with_markup: f64,
    pub vat: f64,
    pub grand_total: f64,
}

/// Display strings for [`Totals`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsDisplay {
    pub row_totals: Vec<String>,
    pub per_point: [String; POINTS],
    /// Base total as a rounded integer, shown under the grid
    pub base_rounded: String,
    pub base_total: String,
    pub markup: String,
    pub subtotal_with_markup: String,
    pub vat: String,
    pub grand_total: String,
}

/// Compute every derived value for the current ledger.
///
/// Per-point sums are aggregated column by column, independently of the row
/// totals; both decompositions add up to the same base total.
pub fn recompute(ledger: &Ledger) -> Totals {
    let mut per_point = [0.0; POINTS];
    let mut row_totals = Vec::with_capacity(ledger.len());
    let mut base_total = 0.0;

    for row in ledger.rows() {
        let row_total = row.total();
        row_totals.push(row_total);
        base_total += row_total;

        for (sum, quantity) in per_point.iter_mut().zip(row.quantities.iter()) {
            *sum += row.unit_price * quantity;
        }
    }

    let markup = base_total * MARKUP_RATE;
    let subtotal_with_markup = base_total + markup;
    let vat = subtotal_with_markup * VAT_RATE;
    let grand_total = subtotal_with_markup + vat;

    Totals {
        row_totals,
        per_point,
        base_total,
        markup,
        subtotal_with_markup,
        vat,
        grand_total,
    }
}

impl Totals {
    pub fn display(&self, currency: &CurrencyFormat) -> TotalsDisplay {
        TotalsDisplay {
            row_totals: self.row_totals.iter().map(|t| format_integer(*t)).collect(),
            per_point: self.per_point.map(format_integer),
            base_rounded: format_integer(self.base_total),
            base_total: currency.format(self.base_total),
            markup: currency.format(self.markup),
            subtotal_with_markup: currency.format(self.subtotal_with_markup),
            vat: currency.format(self.vat),
            grand_total: currency.format(self.grand_total),
        }
    }
}
