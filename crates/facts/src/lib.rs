#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Core types and traits
pub use facts_core::*;

// Sources
pub use facts_edgar::EdgarClient;

// Analysis stages
pub use facts_analysis::{
    FilingTables, GrowthPoint, IqrBounds, NullCount, RatioRow, Summary, annual_filings,
    annual_latest, calendar_year_annual, compute_ratios, concept_frame, describe,
    duplicate_periods, extract_concept, extract_tag, framed, iqr_bounds, iqr_outliers,
    join_filings, latest_per_accession, null_counts, quantile, ratio_frame, yoy_growth,
};

// Presentation
pub use facts_report::{
    Chart, ChartRenderer, ChartSeries, MAX_HEIGHT, MAX_WIDTH, Panels, TextRenderer,
    duplicates_section, format_value, null_counts_section, outliers_section, ratio_table,
    summary_section,
};

mod pipeline;
pub use pipeline::{Company, RatioAnalysis, TrendAnalysis, analyze_ratios, analyze_trend, fetch_facts};
