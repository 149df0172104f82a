#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod report;

pub use chart::{Chart, ChartRenderer, ChartSeries, MAX_HEIGHT, MAX_WIDTH, Panels, TextRenderer};
pub use report::{
    duplicates_section, format_value, null_counts_section, outliers_section, ratio_table,
    summary_section,
};
