//! Financial ratios per filing row.
//!
//! Ratios are derived, never stored independently: a [`RatioRow`] can only be
//! built from a [`FilingRow`] by [`compute_ratios`], and exposes its fields
//! read-only. A ratio whose operand is missing, or whose denominator is zero,
//! is `None` for that field alone.

use chrono::NaiveDate;
use facts_core::FilingRow;
use serde::Serialize;

/// A filing row extended with its derived profitability, liquidity and leverage figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatioRow {
    filing: FilingRow,
    gross_profit: f64,
    gross_profit_margin: Option<f64>,
    net_profit_margin: Option<f64>,
    quick_assets: Option<f64>,
    current_ratio: Option<f64>,
    quick_ratio: Option<f64>,
    debt_to_equity: Option<f64>,
}

/// `numerator / denominator`, undefined for a missing operand or a zero denominator.
fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Derive every ratio for a filing row.
pub fn compute_ratios(filing: &FilingRow) -> RatioRow {
    let gross_profit = filing.revenue - filing.cost_of_revenue;
    let quick_assets = match (filing.current_assets, filing.inventory) {
        (Some(assets), Some(inventory)) => Some(assets - inventory),
        _ => None,
    };

    RatioRow {
        gross_profit,
        gross_profit_margin: ratio(Some(gross_profit), Some(filing.revenue)),
        net_profit_margin: ratio(Some(filing.net_income), Some(filing.revenue)),
        quick_assets,
        current_ratio: ratio(filing.current_assets, filing.current_liabilities),
        quick_ratio: ratio(quick_assets, filing.current_liabilities),
        debt_to_equity: ratio(filing.total_liabilities, filing.total_equity),
        filing: filing.clone(),
    }
}

impl RatioRow {
    /// The underlying filing row.
    #[must_use]
    pub const fn filing(&self) -> &FilingRow {
        &self.filing
    }

    /// End of the reporting period.
    #[must_use]
    pub const fn period_end(&self) -> NaiveDate {
        self.filing.period_end
    }

    /// Revenue minus cost of revenue.
    #[must_use]
    pub const fn gross_profit(&self) -> f64 {
        self.gross_profit
    }

    /// Gross profit over revenue.
    #[must_use]
    pub const fn gross_profit_margin(&self) -> Option<f64> {
        self.gross_profit_margin
    }

    /// Net income over revenue.
    #[must_use]
    pub const fn net_profit_margin(&self) -> Option<f64> {
        self.net_profit_margin
    }

    /// Current assets minus inventory.
    #[must_use]
    pub const fn quick_assets(&self) -> Option<f64> {
        self.quick_assets
    }

    /// Current assets over current liabilities.
    #[must_use]
    pub const fn current_ratio(&self) -> Option<f64> {
        self.current_ratio
    }

    /// Current assets less inventory, over current liabilities.
    #[must_use]
    pub const fn quick_ratio(&self) -> Option<f64> {
        self.quick_ratio
    }

    /// Total liabilities over stockholders' equity.
    #[must_use]
    pub const fn debt_to_equity(&self) -> Option<f64> {
        self.debt_to_equity
    }
}
