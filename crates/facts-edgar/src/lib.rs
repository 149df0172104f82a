#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR source for company facts.
//!
//! This crate provides access to the SEC EDGAR API:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Company facts (every XBRL fact a company has disclosed)
//!
//! # Example
//!
//! ```no_run
//! use facts_core::{FactsSource, Symbol};
//! use facts_edgar::EdgarClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp/1.0 (contact@example.com)")?;
//!
//!     let cik = client.lookup_cik(&Symbol::new("GOOGL")).await?;
//!     let facts = client.company_facts(cik).await?;
//!     println!("{} (CIK {})", facts.entity_name, cik);
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use facts_core::{Cik, CompanyFacts, FactsError, FactsSource, Result, Symbol};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Request timeout for EDGAR calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SEC EDGAR facts source.
///
/// Issues plain sequential GET requests; there is no retry, caching or
/// throttling, so a failed request aborts the caller.
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    user_agent: String,
    tickers_url: String,
    api_base_url: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use facts_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("MyApp/1.0 (contact@example.com)").unwrap();
    /// assert_eq!(client.user_agent(), "MyApp/1.0 (contact@example.com)");
    /// ```
    pub fn new(user_agent: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(FactsError::InvalidParameter(
                "Empty user agent".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FactsError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, user_agent))
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured reqwest client
    /// * `user_agent` - User agent string (for identification purposes)
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            tickers_url: COMPANY_TICKERS_URL.to_string(),
            api_base_url: EDGAR_BASE_URL.to_string(),
        }
    }

    /// Point the client at different endpoints (e.g. a local test server).
    ///
    /// # Arguments
    /// * `tickers_url` - Full URL of the ticker → CIK document
    /// * `api_base_url` - Base URL under which `/api/xbrl/companyfacts/` lives
    #[must_use]
    pub fn with_base_urls(
        mut self,
        tickers_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        self.tickers_url = tickers_url.into();
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// URL of the company-facts document for a CIK.
    #[must_use]
    pub fn company_facts_url(&self, cik: Cik) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.api_base_url, cik)
    }

    /// GET a JSON document, mapping transport and status failures to
    /// [`FactsError::Network`] and decoding failures to [`FactsError::Parse`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!("Fetching {} from {}", what, url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FactsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FactsError::Network(format!(
                "Failed to fetch {}: HTTP {}",
                what,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FactsError::Parse(format!("Failed to parse {}: {}", what, e)))
    }
}

#[async_trait]
impl FactsSource for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn lookup_cik(&self, symbol: &Symbol) -> Result<Cik> {
        if symbol.as_str().is_empty() {
            return Err(FactsError::InvalidParameter("Empty ticker".to_string()));
        }

        let tickers: HashMap<String, CompanyTickerInfo> =
            self.get_json(&self.tickers_url, "company tickers").await?;

        let cik = find_cik(&tickers, symbol)?;
        debug!("Found CIK {} for ticker {}", cik, symbol);
        Ok(cik)
    }

    #[instrument(skip(self), fields(cik = %cik))]
    async fn company_facts(&self, cik: Cik) -> Result<CompanyFacts> {
        let url = self.company_facts_url(cik);
        let facts: CompanyFacts = self
            .get_json(&url, &format!("company facts for CIK {cik}"))
            .await?;

        debug!(
            entity = %facts.entity_name,
            taxonomies = facts.facts.len(),
            "Fetched company facts"
        );
        Ok(facts)
    }
}

/// Search the ticker document for a symbol (case-insensitive).
fn find_cik(tickers: &HashMap<String, CompanyTickerInfo>, symbol: &Symbol) -> Result<Cik> {
    tickers
        .values()
        .find(|company| company.ticker.eq_ignore_ascii_case(symbol.as_str()))
        .map(|company| Cik::new(company.cik_str))
        .ok_or_else(|| FactsError::SymbolNotFound(symbol.to_string()))
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers() -> HashMap<String, CompanyTickerInfo> {
        serde_json::from_str(
            r#"{
                "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
                "1": {"cik_str": 1652044, "ticker": "GOOGL", "title": "Alphabet Inc."}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_cik() {
        let cik = find_cik(&tickers(), &Symbol::new("googl")).unwrap();
        assert_eq!(cik, Cik::new(1_652_044));
        assert_eq!(cik.to_string(), "0001652044");
    }

    #[test]
    fn test_find_cik_missing_ticker() {
        let err = find_cik(&tickers(), &Symbol::new("ZZZZ")).unwrap_err();
        assert!(matches!(err, FactsError::SymbolNotFound(_)));
    }

    #[test]
    fn test_company_facts_url() {
        let client = EdgarClient::new("Test/1.0 (test@example.com)").unwrap();
        assert_eq!(
            client.company_facts_url(Cik::new(1_652_044)),
            "https://data.sec.gov/api/xbrl/companyfacts/CIK0001652044.json"
        );

        let local = client.with_base_urls("http://localhost/t.json", "http://localhost:8080/");
        assert_eq!(
            local.company_facts_url(Cik::new(320_193)),
            "http://localhost:8080/api/xbrl/companyfacts/CIK0000320193.json"
        );
    }

    #[test]
    fn test_provider_name_and_user_agent() {
        let client = EdgarClient::new("Test/1.0 (test@example.com)").unwrap();
        assert_eq!(client.name(), "SEC EDGAR");
        assert_eq!(client.user_agent(), "Test/1.0 (test@example.com)");
        assert!(EdgarClient::new("  ").is_err());
    }
}
