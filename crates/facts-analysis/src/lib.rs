#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Concept extraction from a company-facts payload.
pub mod extract;
/// Polars views of concept and ratio tables.
pub mod frame;
/// Annual, deduplication and calendar-frame filters.
pub mod filter;
/// Alignment of concept tables into filing rows.
pub mod join;
/// Financial ratios per filing row.
pub mod ratios;
/// Outliers, descriptive statistics and growth.
pub mod stats;

pub use extract::{extract_concept, extract_tag};
pub use filter::{annual_filings, annual_latest, calendar_year_annual, framed, latest_per_accession};
pub use frame::{NullCount, concept_frame, null_counts, ratio_frame};
pub use join::{FilingTables, join_filings};
pub use ratios::{RatioRow, compute_ratios};
pub use stats::{
    GrowthPoint, IqrBounds, Summary, describe, duplicate_periods, iqr_bounds, iqr_outliers,
    quantile, yoy_growth,
};
