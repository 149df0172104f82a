//! Company-facts payload as returned by the provider.
//!
//! The payload is a nested mapping of taxonomy → concept → reporting unit →
//! list of fact records. [`CompanyFacts::lookup`] walks that mapping and
//! reports *where* a lookup stopped instead of failing, so callers can decide
//! how to degrade.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::types::Cik;

/// Response from the company facts API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    /// CIK number.
    #[serde(default)]
    pub cik: u64,
    /// Entity name.
    #[serde(default)]
    pub entity_name: String,
    /// Facts organized by taxonomy and tag.
    #[serde(default)]
    pub facts: HashMap<String, HashMap<String, ConceptFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptFacts {
    /// Label.
    #[serde(default)]
    pub label: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Units (USD, shares, etc.) containing the actual fact values.
    #[serde(default)]
    pub units: HashMap<String, Vec<FactRecord>>,
}

/// A single fact value with metadata, exactly as the provider reports it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Start date of the period (duration facts only).
    #[serde(default)]
    pub start: Option<String>,
    /// End date of the period.
    pub end: String,
    /// Value.
    pub val: f64,
    /// Accession number.
    #[serde(default)]
    pub accn: Option<String>,
    /// Fiscal year.
    #[serde(default)]
    pub fy: Option<i32>,
    /// Fiscal period.
    #[serde(default)]
    pub fp: Option<String>,
    /// Form type.
    #[serde(default)]
    pub form: Option<String>,
    /// Filed date.
    #[serde(default)]
    pub filed: Option<String>,
    /// Frame (standardized calendar period).
    #[serde(default)]
    pub frame: Option<String>,
}

/// Outcome of looking up a concept/unit pair in a payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConceptLookup<'a> {
    /// The records reported for the concept in the unit.
    Found(&'a [FactRecord]),
    /// The payload has no facts for the taxonomy.
    MissingTaxonomy,
    /// The taxonomy does not contain the concept.
    MissingConcept,
    /// The concept is not reported in the unit.
    MissingUnit,
}

impl<'a> ConceptLookup<'a> {
    /// Returns the records, treating every miss as no records.
    #[must_use]
    pub const fn records(self) -> &'a [FactRecord] {
        match self {
            Self::Found(records) => records,
            Self::MissingTaxonomy | Self::MissingConcept | Self::MissingUnit => &[],
        }
    }

    /// Returns true if the lookup found the concept in the unit.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl CompanyFacts {
    /// Parses a company-facts JSON document.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a company-facts document saved to disk.
    ///
    /// A missing or unreadable file is [`FactsError::Io`](crate::FactsError::Io),
    /// malformed content is [`FactsError::Parse`](crate::FactsError::Parse).
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let facts = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), entity = %facts.entity_name, "Loaded company facts");
        Ok(facts)
    }

    /// Returns the CIK of the entity.
    #[must_use]
    pub const fn cik(&self) -> Cik {
        Cik::new(self.cik)
    }

    /// Looks up the records for `concept` in `unit` under `taxonomy`.
    #[must_use]
    pub fn lookup(&self, taxonomy: &str, concept: &str, unit: &str) -> ConceptLookup<'_> {
        let Some(concepts) = self.facts.get(taxonomy) else {
            return ConceptLookup::MissingTaxonomy;
        };
        let Some(concept_facts) = concepts.get(concept) else {
            return ConceptLookup::MissingConcept;
        };
        match concept_facts.units.get(unit) {
            Some(records) => ConceptLookup::Found(records),
            None => ConceptLookup::MissingUnit,
        }
    }

    /// Returns the number of concepts reported under a taxonomy.
    #[must_use]
    pub fn concept_count(&self, taxonomy: &str) -> usize {
        self.facts.get(taxonomy).map_or(0, HashMap::len)
    }
}
