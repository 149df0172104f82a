//! Alignment of per-concept tables into one row per filing period.
//!
//! Rows are keyed by (accession id, period end). Revenue, net income and cost
//! of revenue are inner-joined: a row exists only when all three are reported.
//! Balance-sheet concepts are left-joined onto those rows and may be missing.

use chrono::NaiveDate;
use facts_core::{Concept, ConceptTable, FilingRow};
use std::collections::HashMap;
use tracing::debug;

type RowKey<'a> = (&'a str, NaiveDate);

/// The concept tables feeding [`join_filings`], one per [`Concept`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilingTables {
    /// Revenues.
    pub revenue: ConceptTable,
    /// Net income (loss).
    pub net_income: ConceptTable,
    /// Cost of revenue.
    pub cost_of_revenue: ConceptTable,
    /// Current assets.
    pub current_assets: ConceptTable,
    /// Current liabilities.
    pub current_liabilities: ConceptTable,
    /// Inventory, net.
    pub inventory: ConceptTable,
    /// Total liabilities.
    pub total_liabilities: ConceptTable,
    /// Stockholders' equity.
    pub total_equity: ConceptTable,
}

impl FilingTables {
    /// Build every table by calling `f` once per concept, in join order.
    pub fn from_fn(mut f: impl FnMut(Concept) -> ConceptTable) -> Self {
        Self {
            revenue: f(Concept::Revenues),
            net_income: f(Concept::NetIncomeLoss),
            cost_of_revenue: f(Concept::CostOfRevenue),
            current_assets: f(Concept::AssetsCurrent),
            current_liabilities: f(Concept::LiabilitiesCurrent),
            inventory: f(Concept::InventoryNet),
            total_liabilities: f(Concept::Liabilities),
            total_equity: f(Concept::StockholdersEquity),
        }
    }

    /// Returns the table for a concept.
    #[must_use]
    pub const fn get(&self, concept: Concept) -> &ConceptTable {
        match concept {
            Concept::Revenues => &self.revenue,
            Concept::NetIncomeLoss => &self.net_income,
            Concept::CostOfRevenue => &self.cost_of_revenue,
            Concept::AssetsCurrent => &self.current_assets,
            Concept::LiabilitiesCurrent => &self.current_liabilities,
            Concept::InventoryNet => &self.inventory,
            Concept::Liabilities => &self.total_liabilities,
            Concept::StockholdersEquity => &self.total_equity,
        }
    }
}

/// Index a table by row key; the first fact for a key wins.
fn index(table: &ConceptTable) -> HashMap<RowKey<'_>, f64> {
    let mut map = HashMap::with_capacity(table.len());
    for fact in table {
        map.entry((fact.accession_id.as_str(), fact.period_end))
            .or_insert(fact.value);
    }
    map
}

/// Join the concept tables into filing rows, in revenue-table order.
///
/// Concepts for which [`Concept::is_required`] holds are inner-joined; the
/// rest are left-joined. With accession-deduplicated inputs the row count
/// never exceeds the smallest required table, and the optional joins never
/// add or drop rows.
pub fn join_filings(tables: &FilingTables) -> Vec<FilingRow> {
    let indexes: HashMap<Concept, HashMap<RowKey<'_>, f64>> = Concept::ALL
        .into_iter()
        .map(|concept| (concept, index(tables.get(concept))))
        .collect();
    let value = |concept: Concept, key: &RowKey<'_>| {
        indexes.get(&concept).and_then(|index| index.get(key)).copied()
    };

    let rows: Vec<FilingRow> = tables
        .get(Concept::Revenues)
        .iter()
        .filter_map(|revenue| {
            let key = (revenue.accession_id.as_str(), revenue.period_end);
            let complete = Concept::ALL
                .into_iter()
                .filter(Concept::is_required)
                .all(|concept| value(concept, &key).is_some());
            if !complete {
                return None;
            }

            let mut row = FilingRow::new(
                revenue.accession_id.clone(),
                revenue.period_end,
                revenue.value,
                value(Concept::NetIncomeLoss, &key)?,
                value(Concept::CostOfRevenue, &key)?,
            );
            row.current_assets = value(Concept::AssetsCurrent, &key);
            row.current_liabilities = value(Concept::LiabilitiesCurrent, &key);
            row.inventory = value(Concept::InventoryNet, &key);
            row.total_liabilities = value(Concept::Liabilities, &key);
            row.total_equity = value(Concept::StockholdersEquity, &key);
            Some(row)
        })
        .collect();

    debug!(
        revenue = tables.revenue.len(),
        net_income = tables.net_income.len(),
        cost_of_revenue = tables.cost_of_revenue.len(),
        rows = rows.len(),
        "Joined filing rows"
    );
    rows
}
