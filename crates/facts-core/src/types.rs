//! Core domain types for company financial disclosures.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Cik`] - SEC Central Index Key
//! - [`Concept`] - The XBRL concepts used by the analyses
//! - [`FinancialFact`] - One disclosed value in one filing
//! - [`ConceptTable`] - Ordered facts for a single concept and unit
//! - [`FilingRow`] - One filing period with one value per concept

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FactsError;

/// Form type marking an annual report.
pub const ANNUAL_FORM: &str = "10-K";

/// Reporting unit for monetary facts.
pub const USD_UNIT: &str = "USD";

/// The US-GAAP taxonomy key in a company-facts payload.
pub const US_GAAP: &str = "us-gaap";

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// SEC Central Index Key.
///
/// Displays zero-padded to the 10 digits the EDGAR endpoints expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cik(u64);

impl Cik {
    /// Creates a CIK from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl FromStr for Cik {
    type Err = FactsError;

    /// Parses "1652044", "0001652044" or "CIK0001652044".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("CIK") => &trimmed[3..],
            _ => trimmed,
        };
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| FactsError::InvalidParameter(format!("Invalid CIK: {s}")))
    }
}

/// The us-gaap concepts consumed by the analyses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// Total revenues.
    Revenues,
    /// Net income (loss).
    NetIncomeLoss,
    /// Cost of revenue.
    CostOfRevenue,
    /// Current assets.
    AssetsCurrent,
    /// Current liabilities.
    LiabilitiesCurrent,
    /// Inventory, net.
    InventoryNet,
    /// Total liabilities.
    Liabilities,
    /// Stockholders' equity.
    StockholdersEquity,
}

impl Concept {
    /// All concepts, in join order.
    pub const ALL: [Self; 8] = [
        Self::Revenues,
        Self::NetIncomeLoss,
        Self::CostOfRevenue,
        Self::AssetsCurrent,
        Self::LiabilitiesCurrent,
        Self::InventoryNet,
        Self::Liabilities,
        Self::StockholdersEquity,
    ];

    /// The XBRL tag name in the us-gaap taxonomy.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Revenues => "Revenues",
            Self::NetIncomeLoss => "NetIncomeLoss",
            Self::CostOfRevenue => "CostOfRevenue",
            Self::AssetsCurrent => "AssetsCurrent",
            Self::LiabilitiesCurrent => "LiabilitiesCurrent",
            Self::InventoryNet => "InventoryNet",
            Self::Liabilities => "Liabilities",
            Self::StockholdersEquity => "StockholdersEquity",
        }
    }

    /// Column name used once the concept is joined into a filing row.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Revenues => "revenue",
            Self::NetIncomeLoss => "net_income",
            Self::CostOfRevenue => "cost_of_revenue",
            Self::AssetsCurrent => "current_assets",
            Self::LiabilitiesCurrent => "current_liabilities",
            Self::InventoryNet => "inventory",
            Self::Liabilities => "total_liabilities",
            Self::StockholdersEquity => "total_equity",
        }
    }

    /// Whether the concept must be present for a filing row to exist.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Revenues | Self::NetIncomeLoss | Self::CostOfRevenue
        )
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Concept {
    type Err = FactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.tag().eq_ignore_ascii_case(s) || c.column().eq_ignore_ascii_case(s))
            .ok_or_else(|| FactsError::InvalidParameter(format!("Unknown concept: {s}")))
    }
}

/// One disclosed value for one concept in one filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialFact {
    /// Accession number of the source filing.
    pub accession_id: String,
    /// Start of the reporting period (duration facts only).
    pub period_start: Option<NaiveDate>,
    /// End of the reporting period.
    pub period_end: NaiveDate,
    /// Reported value.
    pub value: f64,
    /// Filing form, e.g. "10-K" or "10-Q".
    pub filing_form: String,
    /// Fiscal year of the filing.
    pub fiscal_year: Option<i32>,
    /// Fiscal period of the filing, e.g. "FY" or "Q2".
    pub fiscal_period: Option<String>,
    /// Date the filing was submitted.
    pub filed: Option<NaiveDate>,
    /// Standardized calendar period, e.g. "CY2023" or "CY2023Q4I".
    pub frame: Option<String>,
}

impl FinancialFact {
    /// Creates a fact with the required fields.
    #[must_use]
    pub fn new(
        accession_id: impl Into<String>,
        period_end: NaiveDate,
        value: f64,
        filing_form: impl Into<String>,
    ) -> Self {
        Self {
            accession_id: accession_id.into(),
            period_start: None,
            period_end,
            value,
            filing_form: filing_form.into(),
            fiscal_year: None,
            fiscal_period: None,
            filed: None,
            frame: None,
        }
    }

    /// Sets the standardized calendar frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    /// Sets the period start date.
    #[must_use]
    pub const fn with_period_start(mut self, start: NaiveDate) -> Self {
        self.period_start = Some(start);
        self
    }

    /// Sets the fiscal year and period.
    #[must_use]
    pub fn with_fiscal(mut self, year: i32, period: impl Into<String>) -> Self {
        self.fiscal_year = Some(year);
        self.fiscal_period = Some(period.into());
        self
    }

    /// Sets the filing date.
    #[must_use]
    pub const fn with_filed(mut self, filed: NaiveDate) -> Self {
        self.filed = Some(filed);
        self
    }

    /// Returns true if this fact comes from an annual report.
    #[must_use]
    pub fn is_annual(&self) -> bool {
        self.filing_form == ANNUAL_FORM
    }

    /// Returns true if the frame marks a full calendar year ("CY" + four digits).
    #[must_use]
    pub fn is_calendar_year(&self) -> bool {
        self.frame
            .as_deref()
            .and_then(|f| f.strip_prefix("CY"))
            .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// Ordered facts for a single concept in a single reporting unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptTable {
    concept: String,
    unit: String,
    facts: Vec<FinancialFact>,
}

impl ConceptTable {
    /// Creates a table from facts that all share `concept` and `unit`.
    #[must_use]
    pub fn new(concept: impl Into<String>, unit: impl Into<String>, facts: Vec<FinancialFact>) -> Self {
        Self {
            concept: concept.into(),
            unit: unit.into(),
            facts,
        }
    }

    /// Creates an empty table for a concept.
    #[must_use]
    pub fn empty(concept: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(concept, unit, Vec::new())
    }

    /// Returns the concept name.
    #[must_use]
    pub fn concept(&self) -> &str {
        &self.concept
    }

    /// Returns the reporting unit.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the facts in order.
    #[must_use]
    pub fn facts(&self) -> &[FinancialFact] {
        &self.facts
    }

    /// Returns the number of facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if there are no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Returns an iterator over the facts.
    pub fn iter(&self) -> impl Iterator<Item = &FinancialFact> {
        self.facts.iter()
    }

    /// Returns the reported values in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.facts.iter().map(|f| f.value).collect()
    }

    /// Builds a new table for the same concept and unit from other facts.
    #[must_use]
    pub fn with_facts(&self, facts: Vec<FinancialFact>) -> Self {
        Self {
            concept: self.concept.clone(),
            unit: self.unit.clone(),
            facts,
        }
    }

    /// Keeps the facts matching a predicate.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&FinancialFact) -> bool) -> Self {
        self.with_facts(self.facts.iter().filter(|f| predicate(*f)).cloned().collect())
    }

    /// Returns a copy stably sorted by period end.
    #[must_use]
    pub fn sorted_by_period_end(&self) -> Self {
        let mut facts = self.facts.clone();
        facts.sort_by_key(|f| f.period_end);
        self.with_facts(facts)
    }
}

impl<'a> IntoIterator for &'a ConceptTable {
    type Item = &'a FinancialFact;
    type IntoIter = std::slice::Iter<'a, FinancialFact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

/// One filing period, keyed by (accession id, period end), with one value per concept.
///
/// The income-statement concepts are always present; balance-sheet concepts
/// may be missing for a period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilingRow {
    /// Accession number of the filing.
    pub accession_id: String,
    /// End of the reporting period.
    pub period_end: NaiveDate,
    /// Total revenues.
    pub revenue: f64,
    /// Net income (loss).
    pub net_income: f64,
    /// Cost of revenue.
    pub cost_of_revenue: f64,
    /// Current assets.
    pub current_assets: Option<f64>,
    /// Current liabilities.
    pub current_liabilities: Option<f64>,
    /// Inventory, net.
    pub inventory: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Stockholders' equity.
    pub total_equity: Option<f64>,
}

impl FilingRow {
    /// Creates a row with the required income-statement values and no balance-sheet data.
    #[must_use]
    pub fn new(
        accession_id: impl Into<String>,
        period_end: NaiveDate,
        revenue: f64,
        net_income: f64,
        cost_of_revenue: f64,
    ) -> Self {
        Self {
            accession_id: accession_id.into(),
            period_end,
            revenue,
            net_income,
            cost_of_revenue,
            current_assets: None,
            current_liabilities: None,
            inventory: None,
            total_liabilities: None,
            total_equity: None,
        }
    }

    /// Returns the row key.
    #[must_use]
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.accession_id, self.period_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("googl");
        assert_eq!(symbol.as_str(), "GOOGL");
        assert_eq!(symbol.to_string(), "GOOGL");
    }

    #[rstest]
    #[case("1652044", 1_652_044)]
    #[case("0001652044", 1_652_044)]
    #[case("CIK0001652044", 1_652_044)]
    #[case("cik0001652044", 1_652_044)]
    #[case("Cik0001652044", 1_652_044)]
    #[case(" 320193 ", 320_193)]
    fn test_cik_parse(#[case] input: &str, #[case] expected: u64) {
        let cik: Cik = input.parse().unwrap();
        assert_eq!(cik, Cik::new(expected));
    }

    #[test]
    fn test_cik_padding() {
        assert_eq!(Cik::new(320_193).to_string(), "0000320193");
        assert!("ABC".parse::<Cik>().is_err());
        assert!("CIKX".parse::<Cik>().is_err());
        assert!("ÇIK1".parse::<Cik>().is_err());
    }

    #[rstest]
    #[case(Some("CY2019"), true)]
    #[case(Some("CY2023"), true)]
    #[case(Some("CY2023Q4I"), false)]
    #[case(Some("CY2023Q2"), false)]
    #[case(Some("FY2023"), false)]
    #[case(Some("CY23"), false)]
    #[case(None, false)]
    fn test_calendar_year_frame(#[case] frame: Option<&str>, #[case] expected: bool) {
        let mut fact = FinancialFact::new("a", date(2023, 12, 31), 1.0, "10-K");
        fact.frame = frame.map(str::to_string);
        assert_eq!(fact.is_calendar_year(), expected);
    }

    #[test]
    fn test_concept_lookup_by_name() {
        assert_eq!("Revenues".parse::<Concept>().unwrap(), Concept::Revenues);
        assert_eq!("net_income".parse::<Concept>().unwrap(), Concept::NetIncomeLoss);
        assert!("Goodwill".parse::<Concept>().is_err());
        assert_eq!(Concept::ALL.iter().filter(|c| c.is_required()).count(), 3);
    }

    #[test]
    fn test_concept_table_sort_is_stable() {
        let table = ConceptTable::new(
            "Revenues",
            USD_UNIT,
            vec![
                FinancialFact::new("b", date(2023, 12, 31), 2.0, "10-K"),
                FinancialFact::new("a", date(2022, 12, 31), 1.0, "10-K"),
                FinancialFact::new("c", date(2023, 12, 31), 3.0, "10-K"),
            ],
        );
        let sorted = table.sorted_by_period_end();
        assert_eq!(sorted.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(sorted.concept(), "Revenues");
        assert_eq!(sorted.unit(), USD_UNIT);
    }
}
