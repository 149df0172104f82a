//! Period filters and deduplication.

use facts_core::{ConceptTable, FinancialFact};
use std::collections::HashMap;
use tracing::debug;

/// Keep only facts filed on the annual report form (10-K).
pub fn annual_filings(table: &ConceptTable) -> ConceptTable {
    table.filter(FinancialFact::is_annual)
}

/// Keep one fact per accession id: the one with the latest period end.
///
/// A 10-K restates prior periods alongside the current one; the latest period
/// within a filing is the one it reports on. When two facts of a filing share
/// the latest period end, the first one encountered wins. The result is
/// ordered by period end.
pub fn latest_per_accession(table: &ConceptTable) -> ConceptTable {
    let mut kept: Vec<FinancialFact> = Vec::with_capacity(table.len());
    let mut by_accession: HashMap<&str, usize> = HashMap::new();

    for fact in table {
        match by_accession.get(fact.accession_id.as_str()) {
            Some(&i) => {
                if fact.period_end > kept[i].period_end {
                    kept[i] = fact.clone();
                }
            }
            None => {
                by_accession.insert(&fact.accession_id, kept.len());
                kept.push(fact.clone());
            }
        }
    }

    kept.sort_by_key(|f| f.period_end);
    debug!(
        concept = table.concept(),
        before = table.len(),
        after = kept.len(),
        "Deduplicated by accession"
    );
    table.with_facts(kept)
}

/// Annual filter followed by accession deduplication.
pub fn annual_latest(table: &ConceptTable) -> ConceptTable {
    latest_per_accession(&annual_filings(table))
}

/// Keep facts carrying a standardized calendar frame, ordered by period end.
pub fn framed(table: &ConceptTable) -> ConceptTable {
    table.filter(|f| f.frame.is_some()).sorted_by_period_end()
}

/// Keep annual-report facts framed as a full calendar year ("CY2019"),
/// ordered by period end.
///
/// Excludes partial-year, quarterly and transition-period disclosures.
pub fn calendar_year_annual(table: &ConceptTable) -> ConceptTable {
    table
        .filter(|f| f.is_annual() && f.is_calendar_year())
        .sorted_by_period_end()
}
