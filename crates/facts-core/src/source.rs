//! Fetch trait for company facts.
//!
//! [`FactsSource`] is the single seam between the analyses and the network:
//! resolve a ticker to a CIK, then fetch the company-facts payload for that CIK.
//! [`StaticFactsSource`] serves fixed payloads from memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::{FactsError, Result},
    payload::CompanyFacts,
    types::{Cik, Symbol},
};

/// Source of company facts.
///
/// Implementations perform one request per call; callers await them in sequence.
#[async_trait]
pub trait FactsSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Resolves a ticker symbol to its CIK.
    ///
    /// Returns [`FactsError::SymbolNotFound`] if the ticker is not listed.
    async fn lookup_cik(&self, symbol: &Symbol) -> Result<Cik>;

    /// Fetches every disclosed fact for a company.
    async fn company_facts(&self, cik: Cik) -> Result<CompanyFacts>;

    /// Resolves a ticker and fetches its company facts.
    async fn company_facts_for(&self, symbol: &Symbol) -> Result<CompanyFacts> {
        let cik = self.lookup_cik(symbol).await?;
        debug!(source = self.name(), symbol = %symbol, cik = %cik, "Resolved CIK");
        self.company_facts(cik).await
    }
}

/// In-memory facts source backed by fixed payloads.
///
/// Used by tests and for offline runs against a saved company-facts document.
#[derive(Debug, Default, Clone)]
pub struct StaticFactsSource {
    tickers: HashMap<Symbol, Cik>,
    companies: HashMap<Cik, CompanyFacts>,
}

impl StaticFactsSource {
    /// Create a new empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a company under a ticker, keyed by the payload's CIK.
    #[must_use]
    pub fn with_company(mut self, symbol: impl Into<Symbol>, facts: CompanyFacts) -> Self {
        let cik = facts.cik();
        self.tickers.insert(symbol.into(), cik);
        self.companies.insert(cik, facts);
        self
    }

    /// Registers a payload reachable only by CIK.
    #[must_use]
    pub fn with_facts(mut self, facts: CompanyFacts) -> Self {
        self.companies.insert(facts.cik(), facts);
        self
    }
}

#[async_trait]
impl FactsSource for StaticFactsSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn lookup_cik(&self, symbol: &Symbol) -> Result<Cik> {
        self.tickers
            .get(symbol)
            .copied()
            .ok_or_else(|| FactsError::SymbolNotFound(symbol.to_string()))
    }

    async fn company_facts(&self, cik: Cik) -> Result<CompanyFacts> {
        self.companies
            .get(&cik)
            .cloned()
            .ok_or_else(|| FactsError::FactsNotFound(cik.to_string()))
    }
}
