//! Concept extraction.
//!
//! A concept missing from the payload yields an empty [`ConceptTable`] rather
//! than an error: downstream joins then degrade to missing columns.

use chrono::NaiveDate;
use facts_core::{
    CompanyFacts, Concept, ConceptLookup, ConceptTable, FactRecord, FinancialFact, US_GAAP,
    USD_UNIT,
};
use tracing::debug;

/// Extract every USD fact reported for a concept.
pub fn extract_concept(facts: &CompanyFacts, concept: Concept) -> ConceptTable {
    extract_tag(facts, concept.tag())
}

/// Extract every USD fact reported for a us-gaap tag.
///
/// Records that cannot be turned into a [`FinancialFact`] (unparseable end
/// date, missing accession number or form) are skipped.
pub fn extract_tag(facts: &CompanyFacts, tag: &str) -> ConceptTable {
    let records = match facts.lookup(US_GAAP, tag, USD_UNIT) {
        ConceptLookup::Found(records) => records,
        miss => {
            debug!(concept = tag, lookup = ?miss, "Concept not reported, using empty table");
            return ConceptTable::empty(tag, USD_UNIT);
        }
    };

    let extracted: Vec<FinancialFact> = records.iter().filter_map(to_fact).collect();
    if extracted.len() < records.len() {
        debug!(
            concept = tag,
            skipped = records.len() - extracted.len(),
            "Skipped incomplete fact records"
        );
    }
    debug!(concept = tag, rows = extracted.len(), "Extracted concept");

    ConceptTable::new(tag, USD_UNIT, extracted)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn to_fact(record: &FactRecord) -> Option<FinancialFact> {
    let period_end = parse_date(&record.end)?;
    let accession_id = record.accn.clone()?;
    let filing_form = record.form.clone()?;

    Some(FinancialFact {
        accession_id,
        period_start: record.start.as_deref().and_then(parse_date),
        period_end,
        value: record.val,
        filing_form,
        fiscal_year: record.fy,
        fiscal_period: record.fp.clone(),
        filed: record.filed.as_deref().and_then(parse_date),
        frame: record.frame.clone().filter(|f| !f.is_empty()),
    })
}
