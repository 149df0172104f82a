#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for company financial disclosure analysis.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`FactsSource`](source::FactsSource) - Fetch capability for company facts
//! - [`CompanyFacts`](payload::CompanyFacts) - Raw company-facts payload
//! - [`ConceptTable`](types::ConceptTable) - Facts for a single concept
//! - [`FilingRow`](types::FilingRow) - One joined filing period

/// Error types for fetch and analysis operations.
pub mod error;
/// Company-facts payload as returned by the provider.
pub mod payload;
/// Fetch trait and the in-memory source.
pub mod source;
/// Domain types (Symbol, Cik, FinancialFact, ConceptTable, FilingRow).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FactsError, Result};
pub use payload::{CompanyFacts, ConceptFacts, ConceptLookup, FactRecord};
pub use source::{FactsSource, StaticFactsSource};
pub use types::{
    ANNUAL_FORM, Cik, Concept, ConceptTable, FilingRow, FinancialFact, Symbol, US_GAAP, USD_UNIT,
};
