//! The two analyses over a fetched company-facts payload.
//!
//! Every stage is a pure function from one table to the next; the only I/O is
//! [`fetch_facts`], which awaits the source's calls in sequence.

use facts_analysis::{
    FilingTables, GrowthPoint, IqrBounds, NullCount, RatioRow, Summary, annual_latest,
    calendar_year_annual, compute_ratios, concept_frame, describe, duplicate_periods,
    extract_concept, extract_tag, framed, iqr_bounds, iqr_outliers, join_filings, null_counts,
    yoy_growth,
};
use facts_core::{Cik, CompanyFacts, ConceptTable, FactsSource, Result, Symbol};
use facts_report::{Chart, ChartSeries, Panels};
use std::fmt;
use tracing::{info, instrument};

/// How a company is identified to the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Company {
    /// A ticker, resolved to a CIK by the source.
    Ticker(Symbol),
    /// A known CIK; no ticker lookup is made.
    Cik(Cik),
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticker(symbol) => write!(f, "{symbol}"),
            Self::Cik(cik) => write!(f, "CIK{cik}"),
        }
    }
}

/// Fetch the company-facts payload for a company.
#[instrument(skip(source), fields(provider = source.name()))]
pub async fn fetch_facts(source: &dyn FactsSource, company: &Company) -> Result<CompanyFacts> {
    let facts = match company {
        Company::Ticker(symbol) => source.company_facts_for(symbol).await?,
        Company::Cik(cik) => source.company_facts(*cik).await?,
    };
    info!(
        entity = %facts.entity_name,
        cik = %facts.cik(),
        concepts = facts.concept_count(facts_core::US_GAAP),
        "Fetched company facts"
    );
    Ok(facts)
}

/// Results of the trend analysis of one concept.
#[derive(Clone, Debug)]
pub struct TrendAnalysis {
    /// The analysed tag.
    pub concept: String,
    /// Facts carrying a standardized frame, ordered by period end.
    pub framed: ConceptTable,
    /// IQR fences over the framed values, `None` for an empty series.
    pub bounds: Option<IqrBounds>,
    /// Framed facts outside the fences.
    pub outliers: ConceptTable,
    /// Null counts per column of the framed table.
    pub null_counts: Vec<NullCount>,
    /// Framed facts whose period end is reported more than once.
    pub duplicates: ConceptTable,
    /// Annual calendar-year facts, ordered by period end.
    pub annual: ConceptTable,
    /// Descriptive statistics of the annual values.
    pub summary: Option<Summary>,
    /// Year-over-year growth of the annual values.
    pub growth: Vec<GrowthPoint>,
}

/// Analyse one concept over time.
///
/// A concept the company never reported yields empty tables and no summary,
/// not an error.
#[instrument(skip(facts))]
pub fn analyze_trend(facts: &CompanyFacts, concept: &str) -> Result<TrendAnalysis> {
    let table = extract_tag(facts, concept);
    let framed = framed(&table);
    let bounds = iqr_bounds(&framed.values());
    let outliers = iqr_outliers(&framed);
    let null_counts = null_counts(&concept_frame(&framed)?);
    let duplicates = duplicate_periods(&framed);
    let annual = calendar_year_annual(&table);
    let summary = describe(&annual.values());
    let growth = yoy_growth(&annual);

    info!(
        facts = table.len(),
        framed = framed.len(),
        outliers = outliers.len(),
        annual = annual.len(),
        "Trend analysis complete"
    );

    Ok(TrendAnalysis {
        concept: concept.to_string(),
        framed,
        bounds,
        outliers,
        null_counts,
        duplicates,
        annual,
        summary,
        growth,
    })
}

impl TrendAnalysis {
    /// Annual values over time.
    #[must_use]
    pub fn value_chart(&self, entity: &str) -> Chart {
        Chart::new(
            format!("{entity} Annual {} Trend Over Time", self.concept),
            format!("{} (USD)", self.concept),
        )
        .with_series(ChartSeries::new(
            self.concept.clone(),
            self.annual.iter().map(|f| (f.period_end, f.value)).collect(),
        ))
    }

    /// Year-over-year growth in percent; undefined growth is left out.
    #[must_use]
    pub fn growth_chart(&self, entity: &str) -> Chart {
        Chart::new(
            format!("{entity} Year-over-Year Annual {} Growth", self.concept),
            "Growth (%)",
        )
        .with_series(ChartSeries::from_options(
            "YoY growth",
            self.growth.iter().map(|g| (g.period_end, g.growth_pct)),
        ))
    }
}

/// Results of the ratio analysis.
#[derive(Clone, Debug)]
pub struct RatioAnalysis {
    tables: FilingTables,
    rows: Vec<RatioRow>,
}

/// Align annual filings and derive their ratios, ordered by period end.
#[instrument(skip(facts), fields(entity = %facts.entity_name))]
pub fn analyze_ratios(facts: &CompanyFacts) -> RatioAnalysis {
    let tables = FilingTables::from_fn(|concept| annual_latest(&extract_concept(facts, concept)));
    let mut rows: Vec<RatioRow> = join_filings(&tables).iter().map(compute_ratios).collect();
    rows.sort_by_key(RatioRow::period_end);

    info!(rows = rows.len(), "Ratio analysis complete");
    RatioAnalysis { tables, rows }
}

impl RatioAnalysis {
    /// The deduplicated annual table of every concept.
    #[must_use]
    pub const fn tables(&self) -> &FilingTables {
        &self.tables
    }

    /// One row per filing period, ordered by period end.
    #[must_use]
    pub fn rows(&self) -> &[RatioRow] {
        &self.rows
    }

    /// Current ratio, quick ratio and debt-to-equity, one panel each.
    #[must_use]
    pub fn liquidity_panels(&self, entity: &str) -> Panels {
        let panel = |title: &str, y_label: &str, ratio: fn(&RatioRow) -> Option<f64>| {
            Chart::new(title, y_label).with_series(ChartSeries::from_options(
                title,
                self.rows.iter().map(|r| (r.period_end(), ratio(r))),
            ))
        };

        Panels::new(
            format!("{entity} Liquidity and Leverage Ratios"),
            vec![
                panel("Current Ratio", "Current Ratio", RatioRow::current_ratio),
                panel("Quick Ratio", "Quick Ratio", RatioRow::quick_ratio),
                panel("Debt-to-Equity Ratio", "D/E Ratio", RatioRow::debt_to_equity),
            ],
        )
    }
}
