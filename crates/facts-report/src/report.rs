//! Console report sections.
//!
//! Each section is returned as a `String` so callers decide where it goes.
//! Concept tables are printed through their polars frames; the ratio table is
//! laid out by hand so every column and row stays visible.

use facts_analysis::{NullCount, RatioRow, Summary, concept_frame};
use facts_core::{ConceptTable, FactsError, Result};
use std::fmt::Write as _;

const RULE_WIDTH: usize = 80;

/// Compact rendering of a monetary or ratio value (`307.39B`, `1.25`).
#[must_use]
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.4}")
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_value)
}

fn selected_frame(table: &ConceptTable, columns: &[&str]) -> Result<String> {
    let df = concept_frame(table)?
        .select(columns.iter().copied())
        .map_err(|e| FactsError::Frame(e.to_string()))?;
    Ok(df.to_string())
}

/// Facts outside the IQR fences, or a no-outliers message.
pub fn outliers_section(outliers: &ConceptTable) -> Result<String> {
    let concept = outliers.concept();
    if outliers.is_empty() {
        return Ok(format!("No significant {concept} outliers detected.\n"));
    }
    Ok(format!(
        "{concept} outliers detected (outside 1.5*IQR):\n{}\n",
        selected_frame(outliers, &["end", "val", "form", "frame"])?
    ))
}

/// Per-column null counts, followed by an all-clear message when there are none.
#[must_use]
pub fn null_counts_section(counts: &[NullCount]) -> String {
    let mut out = String::from("Missing values per column:\n");
    for count in counts {
        let _ = writeln!(out, "  {:<10} {}", count.column, count.nulls);
    }
    if counts.iter().all(|c| c.nulls == 0) {
        out.push_str("No missing or null values detected in any examined columns.\n");
    }
    out
}

/// Facts sharing a period end with another fact, or a no-duplicates message.
pub fn duplicates_section(duplicates: &ConceptTable) -> Result<String> {
    if duplicates.is_empty() {
        return Ok("No duplicate period entries detected.\n".to_string());
    }
    Ok(format!(
        "Duplicate entries (same period):\n{}\n",
        selected_frame(duplicates, &["end", "val", "accn", "form", "frame"])?
    ))
}

/// Descriptive statistics for the annual series, then its standard deviation.
#[must_use]
pub fn summary_section(concept: &str, summary: Option<&Summary>) -> String {
    let mut out = format!("Annual {concept} statistical summary:\n");
    let Some(s) = summary else {
        out.push_str("  No annual calendar-year facts reported.\n");
        return out;
    };

    let rows = [
        ("count", s.count as f64),
        ("mean", s.mean),
        ("std", s.std.unwrap_or(f64::NAN)),
        ("min", s.min),
        ("25%", s.q1),
        ("50%", s.median),
        ("75%", s.q3),
        ("max", s.max),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "  {name:<6} {value:>20.2}");
    }
    let _ = writeln!(
        out,
        "\nStandard deviation: {}",
        s.std.map_or_else(|| "undefined".to_string(), |v| format!("{v:.2}"))
    );
    out
}

/// The full ratio table, one line per filing period.
#[must_use]
pub fn ratio_table(rows: &[RatioRow]) -> String {
    let headers = [
        "end", "revenue", "net_inc", "cost_rev", "gross", "gpm", "npm", "cur_ast", "cur_liab",
        "inv", "quick_ast", "current", "quick", "d/e",
    ];

    let mut out = String::new();
    let _ = writeln!(out, "\nFinancial Ratios ({} filing periods)", rows.len());
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    if rows.is_empty() {
        out.push_str("No filing periods report revenue, net income and cost of revenue.\n");
        return out;
    }

    let _ = write!(out, "{:<10}", headers[0]);
    for header in &headers[1..] {
        let _ = write!(out, " {header:>9}");
    }
    out.push('\n');
    out.push_str(&"-".repeat(10 + 10 * (headers.len() - 1)));
    out.push('\n');

    for row in rows {
        let filing = row.filing();
        let cells = [
            format_value(filing.revenue),
            format_value(filing.net_income),
            format_value(filing.cost_of_revenue),
            format_value(row.gross_profit()),
            format_optional(row.gross_profit_margin()),
            format_optional(row.net_profit_margin()),
            format_optional(filing.current_assets),
            format_optional(filing.current_liabilities),
            format_optional(filing.inventory),
            format_optional(row.quick_assets()),
            format_optional(row.current_ratio()),
            format_optional(row.quick_ratio()),
            format_optional(row.debt_to_equity()),
        ];
        let _ = write!(out, "{:<10}", row.period_end());
        for cell in &cells {
            let _ = write!(out, " {cell:>9}");
        }
        out.push('\n');
    }
    out
}
