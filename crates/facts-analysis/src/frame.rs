//! Polars views of concept and ratio tables.
//!
//! Frames are built for display and column-wise inspection only; the pipeline
//! itself works on the typed tables.

use chrono::{Datelike, NaiveDate};
use facts_core::{ConceptTable, FactsError, Result};
use polars::prelude::*;

use crate::ratios::RatioRow;

/// Days from 0001-01-01 (CE) to the Unix epoch; polars dates count from the epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn frame_error(e: PolarsError) -> FactsError {
    FactsError::Frame(e.to_string())
}

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

fn date_column(name: &str, dates: impl Iterator<Item = NaiveDate>) -> Result<Column> {
    let days: Vec<i32> = dates.map(epoch_days).collect();
    let series = Series::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(frame_error)?;
    Ok(Column::from(series))
}

fn opt_date_column(name: &str, dates: impl Iterator<Item = Option<NaiveDate>>) -> Result<Column> {
    let days: Vec<Option<i32>> = dates.map(|d| d.map(epoch_days)).collect();
    let series = Series::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(frame_error)?;
    Ok(Column::from(series))
}

/// A concept table as a frame with the provider's column names:
/// `accn, start, end, val, fy, fp, form, filed, frame`.
pub fn concept_frame(table: &ConceptTable) -> Result<DataFrame> {
    let facts = table.facts();

    DataFrame::new(vec![
        Column::new(
            "accn".into(),
            facts
                .iter()
                .map(|f| f.accession_id.as_str())
                .collect::<Vec<_>>(),
        ),
        opt_date_column("start", facts.iter().map(|f| f.period_start))?,
        date_column("end", facts.iter().map(|f| f.period_end))?,
        Column::new("val".into(), facts.iter().map(|f| f.value).collect::<Vec<_>>()),
        Column::new(
            "fy".into(),
            facts.iter().map(|f| f.fiscal_year).collect::<Vec<_>>(),
        ),
        Column::new(
            "fp".into(),
            facts
                .iter()
                .map(|f| f.fiscal_period.as_deref())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "form".into(),
            facts
                .iter()
                .map(|f| f.filing_form.as_str())
                .collect::<Vec<_>>(),
        ),
        opt_date_column("filed", facts.iter().map(|f| f.filed))?,
        Column::new(
            "frame".into(),
            facts.iter().map(|f| f.frame.as_deref()).collect::<Vec<_>>(),
        ),
    ])
    .map_err(frame_error)
}

/// The ratio table as a frame, one row per filing period.
pub fn ratio_frame(rows: &[RatioRow]) -> Result<DataFrame> {
    let values = |f: fn(&RatioRow) -> f64| rows.iter().map(f).collect::<Vec<_>>();
    let optional = |f: fn(&RatioRow) -> Option<f64>| rows.iter().map(f).collect::<Vec<_>>();

    DataFrame::new(vec![
        date_column("end", rows.iter().map(RatioRow::period_end))?,
        Column::new("revenue".into(), values(|r| r.filing().revenue)),
        Column::new("net_income".into(), values(|r| r.filing().net_income)),
        Column::new("cost_of_revenue".into(), values(|r| r.filing().cost_of_revenue)),
        Column::new("gross_profit".into(), values(RatioRow::gross_profit)),
        Column::new(
            "gross_profit_margin".into(),
            optional(RatioRow::gross_profit_margin),
        ),
        Column::new(
            "net_profit_margin".into(),
            optional(RatioRow::net_profit_margin),
        ),
        Column::new("current_assets".into(), optional(|r| r.filing().current_assets)),
        Column::new(
            "current_liabilities".into(),
            optional(|r| r.filing().current_liabilities),
        ),
        Column::new("inventory".into(), optional(|r| r.filing().inventory)),
        Column::new("quick_assets".into(), optional(RatioRow::quick_assets)),
        Column::new("current_ratio".into(), optional(RatioRow::current_ratio)),
        Column::new("quick_ratio".into(), optional(RatioRow::quick_ratio)),
        Column::new("debt_to_equity".into(), optional(RatioRow::debt_to_equity)),
    ])
    .map_err(frame_error)
}

/// Null count of one frame column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullCount {
    /// Column name.
    pub column: String,
    /// Number of null values.
    pub nulls: usize,
}

/// Null counts for every column, in column order.
pub fn null_counts(df: &DataFrame) -> Vec<NullCount> {
    df.get_columns()
        .iter()
        .map(|c| NullCount {
            column: c.name().to_string(),
            nulls: c.null_count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::compute_ratios;
    use facts_core::{FilingRow, FinancialFact, USD_UNIT};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> ConceptTable {
        ConceptTable::new(
            "Revenues",
            USD_UNIT,
            vec![
                FinancialFact::new("a", date(2022, 12, 31), 282.0, "10-K")
                    .with_period_start(date(2022, 1, 1))
                    .with_fiscal(2022, "FY")
                    .with_filed(date(2023, 2, 3))
                    .with_frame("CY2022"),
                FinancialFact::new("b", date(2023, 6, 30), 74.0, "10-Q")
                    .with_period_start(date(2023, 4, 1))
                    .with_fiscal(2023, "Q2")
                    .with_filed(date(2023, 7, 26)),
            ],
        )
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(epoch_days(date(1970, 1, 1)), 0);
        assert_eq!(epoch_days(date(1970, 1, 2)), 1);
    }

    #[test]
    fn test_concept_frame_shape() {
        let df = concept_frame(&table()).unwrap();
        assert_eq!(df.shape(), (2, 9));
        assert_eq!(df.column("end").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("val").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_null_counts() {
        let df = concept_frame(&table()).unwrap();
        let counts = null_counts(&df);

        assert_eq!(counts.len(), 9);
        let frame = counts.iter().find(|c| c.column == "frame").unwrap();
        assert_eq!(frame.nulls, 1);
        assert_eq!(counts.iter().map(|c| c.nulls).sum::<usize>(), 1);
    }

    #[test]
    fn test_empty_concept_frame() {
        let df = concept_frame(&ConceptTable::empty("InventoryNet", USD_UNIT)).unwrap();
        assert_eq!(df.shape(), (0, 9));
    }

    #[test]
    fn test_ratio_frame() {
        let rows = vec![compute_ratios(&FilingRow::new(
            "a",
            date(2023, 12, 31),
            100.0,
            10.0,
            40.0,
        ))];
        let df = ratio_frame(&rows).unwrap();

        assert_eq!(df.shape(), (1, 14));
        let counts = null_counts(&df);
        let current_ratio = counts.iter().find(|c| c.column == "current_ratio").unwrap();
        assert_eq!(current_ratio.nulls, 1);
        let margin = counts.iter().find(|c| c.column == "gross_profit_margin").unwrap();
        assert_eq!(margin.nulls, 0);
    }
}
