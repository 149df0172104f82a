//! Outliers, descriptive statistics and growth over concept tables.
//!
//! Quantiles interpolate linearly between the closest ranks, so the 25th
//! percentile of `[10, 12, 12, 12, 13, 14, 200]` is 12 and the 75th is 13.5.

use chrono::NaiveDate;
use facts_core::ConceptTable;
use serde::Serialize;
use std::collections::HashMap;

/// Multiplier applied to the interquartile range for outlier fences.
pub const IQR_FENCE: f64 = 1.5;

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// The `q`-quantile (0 ≤ q ≤ 1) of `values`, `None` when empty.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

/// Interquartile-range fences.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IqrBounds {
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// `q3 - q1`.
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`.
    pub lower: f64,
    /// `q3 + 1.5 * iqr`.
    pub upper: f64,
}

impl IqrBounds {
    /// Returns true if the value falls strictly outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Fences for a series, `None` when it is empty.
pub fn iqr_bounds(values: &[f64]) -> Option<IqrBounds> {
    let sorted = sorted(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some(IqrBounds {
        q1,
        q3,
        iqr,
        lower: q1 - IQR_FENCE * iqr,
        upper: q3 + IQR_FENCE * iqr,
    })
}

/// Facts whose value lies outside the table's own IQR fences.
pub fn iqr_outliers(table: &ConceptTable) -> ConceptTable {
    match iqr_bounds(&table.values()) {
        Some(bounds) => table.filter(|f| bounds.is_outlier(f.value)),
        None => table.with_facts(Vec::new()),
    }
}

/// Descriptive statistics of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarize a series, `None` when it is empty.
pub fn describe(values: &[f64]) -> Option<Summary> {
    let sorted = sorted(values);
    let count = sorted.len();
    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    Some(Summary {
        count,
        mean,
        std,
        min,
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max,
    })
}

/// Percentage change of a value against the previous period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GrowthPoint {
    /// End of the period.
    pub period_end: NaiveDate,
    /// Value for the period.
    pub value: f64,
    /// `(value - previous) / previous * 100`; undefined when previous is zero.
    pub growth_pct: Option<f64>,
}

/// Period-over-period growth, ordered by period end.
///
/// The first period has no predecessor and produces no point, so the result
/// holds one point fewer than the table.
pub fn yoy_growth(table: &ConceptTable) -> Vec<GrowthPoint> {
    let ordered = table.sorted_by_period_end();
    ordered
        .facts()
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            GrowthPoint {
                period_end: current.period_end,
                value: current.value,
                growth_pct: (previous.value != 0.0)
                    .then(|| (current.value - previous.value) / previous.value * 100.0),
            }
        })
        .collect()
}

/// Every fact whose period end is shared with another fact, in table order.
pub fn duplicate_periods(table: &ConceptTable) -> ConceptTable {
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for fact in table {
        *counts.entry(fact.period_end).or_default() += 1;
    }
    table.filter(|f| counts.get(&f.period_end).is_some_and(|&n| n > 1))
}
