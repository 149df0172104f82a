//! End-to-end analyses against an in-memory company-facts document.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use facts::{
    ChartRenderer, Company, CompanyFacts, FactsError, StaticFactsSource, Symbol, TextRenderer,
    analyze_ratios, analyze_trend, fetch_facts, outliers_section, ratio_table, summary_section,
};
use serde_json::{Value, json};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn usd(records: Value) -> Value {
    json!({ "label": null, "units": { "USD": records } })
}

fn fact(accn: &str, end: &str, val: f64, form: &str) -> Value {
    json!({ "end": end, "val": val, "accn": accn, "form": form, "fy": 2023, "fp": "FY" })
}

fn framed(accn: &str, end: &str, val: f64, form: &str, frame: &str) -> Value {
    json!({
        "start": format!("{}-01-01", &end[..4]),
        "end": end,
        "val": val,
        "accn": accn,
        "form": form,
        "fy": end[..4].parse::<i32>().unwrap(),
        "fp": "FY",
        "filed": format!("{}-02-01", end[..4].parse::<i32>().unwrap() + 1),
        "frame": frame,
    })
}

/// Two annual filings, a quarterly filing, a restated prior period inside the
/// 2023 annual filing and no inventory concept at all.
fn ratio_document() -> CompanyFacts {
    let doc = json!({
        "cik": 1652044,
        "entityName": "Alphabet Inc.",
        "facts": {
            "us-gaap": {
                "Revenues": usd(json!([
                    fact("acc-2023", "2023-06-30", 150.0, "10-K"),
                    fact("acc-2023", "2023-12-31", 307.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 282.0, "10-K"),
                    fact("acc-q3", "2023-09-30", 76.0, "10-Q"),
                ])),
                "NetIncomeLoss": usd(json!([
                    fact("acc-2023", "2023-12-31", 73.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 59.0, "10-K"),
                    fact("acc-q3", "2023-09-30", 19.0, "10-Q"),
                ])),
                "CostOfRevenue": usd(json!([
                    fact("acc-2023", "2023-12-31", 133.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 126.0, "10-K"),
                    fact("acc-q3", "2023-09-30", 33.0, "10-Q"),
                ])),
                "AssetsCurrent": usd(json!([
                    fact("acc-2023", "2023-12-31", 171.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 164.0, "10-K"),
                ])),
                "LiabilitiesCurrent": usd(json!([
                    fact("acc-2023", "2023-12-31", 81.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 0.0, "10-K"),
                ])),
                "Liabilities": usd(json!([
                    fact("acc-2023", "2023-12-31", 119.0, "10-K"),
                ])),
                "StockholdersEquity": usd(json!([
                    fact("acc-2023", "2023-12-31", 283.0, "10-K"),
                    fact("acc-2022", "2022-12-31", 256.0, "10-K"),
                ])),
            }
        }
    });
    serde_json::from_value(doc).unwrap()
}

fn trend_document() -> CompanyFacts {
    let mut records: Vec<Value> = [10.0, 12.0, 12.0, 13.0, 12.0, 14.0, 200.0]
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let year = 2010 + i;
            framed(
                &format!("acc-{year}"),
                &format!("{year}-12-31"),
                *v,
                "10-K",
                &format!("CY{year}"),
            )
        })
        .collect();
    // the same period reported again as a quarterly-framed fact
    records.push(framed("acc-2016q", "2016-12-31", 55.0, "10-Q", "CY2016Q4"));
    // an unframed fact never reaches the trend tables
    records.push(fact("acc-x", "2017-03-31", 60.0, "10-Q"));

    let doc = json!({
        "cik": 1652044,
        "entityName": "Alphabet Inc.",
        "facts": { "us-gaap": { "Revenues": usd(Value::Array(records)) } }
    });
    serde_json::from_value(doc).unwrap()
}

#[test]
fn ratio_analysis_aligns_annual_filings() {
    let analysis = analyze_ratios(&ratio_document());
    let rows = analysis.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].period_end(), date(2022, 12, 31));
    assert_eq!(rows[1].period_end(), date(2023, 12, 31));

    // the restated 2023-06-30 revenue is superseded within its filing
    assert_eq!(rows[1].filing().revenue, 307.0);
    assert_eq!(analysis.tables().revenue.len(), 2);
    assert!(analysis.tables().inventory.is_empty());

    assert_relative_eq!(rows[1].gross_profit(), 174.0);
    assert_relative_eq!(rows[1].gross_profit_margin().unwrap(), 174.0 / 307.0);
    assert_relative_eq!(rows[1].net_profit_margin().unwrap(), 73.0 / 307.0);
    assert_relative_eq!(rows[1].debt_to_equity().unwrap(), 119.0 / 283.0);
}

#[test]
fn missing_inventory_leaves_only_quick_figures_undefined() {
    let analysis = analyze_ratios(&ratio_document());
    let latest = &analysis.rows()[1];

    assert_eq!(latest.quick_assets(), None);
    assert_eq!(latest.quick_ratio(), None);
    assert_relative_eq!(latest.current_ratio().unwrap(), 171.0 / 81.0);
}

#[test]
fn zero_current_liabilities_leave_current_ratio_undefined() {
    let analysis = analyze_ratios(&ratio_document());
    let earliest = &analysis.rows()[0];

    assert_eq!(earliest.current_ratio(), None);
    assert_eq!(earliest.debt_to_equity(), None);
    assert!(earliest.gross_profit_margin().is_some());

    let table = ratio_table(analysis.rows());
    assert!(table.contains("2022-12-31"));
    assert!(table.contains("2023-12-31"));
}

#[test]
fn trend_analysis_flags_outliers_and_duplicates() {
    let trend = analyze_trend(&trend_document(), "Revenues").unwrap();

    assert_eq!(trend.framed.len(), 8);
    let bounds = trend.bounds.unwrap();
    assert!(bounds.is_outlier(200.0));
    assert!(trend.outliers.values().contains(&200.0));

    let duplicates: Vec<_> = trend
        .duplicates
        .iter()
        .map(|f| f.accession_id.as_str())
        .collect();
    assert_eq!(duplicates, vec!["acc-2016", "acc-2016q"]);

    let total_nulls: usize = trend.null_counts.iter().map(|c| c.nulls).sum();
    assert_eq!(total_nulls, 0);

    assert!(outliers_section(&trend.outliers).unwrap().contains("outliers detected"));
}

#[test]
fn trend_analysis_summarizes_calendar_years() {
    let trend = analyze_trend(&trend_document(), "Revenues").unwrap();

    assert_eq!(trend.annual.len(), 7);
    let summary = trend.summary.unwrap();
    assert_eq!(summary.count, 7);
    assert_relative_eq!(summary.q1, 12.0);
    assert_relative_eq!(summary.q3, 13.5);
    assert_relative_eq!(summary.max, 200.0);

    assert_eq!(trend.growth.len(), 6);
    assert_relative_eq!(trend.growth[0].growth_pct.unwrap(), 20.0);

    let section = summary_section(&trend.concept, trend.summary.as_ref());
    assert!(section.starts_with("Annual Revenues statistical summary"));

    let chart = TextRenderer::default().render(&trend.value_chart("Alphabet Inc."));
    assert!(chart.starts_with("Alphabet Inc. Annual Revenues Trend Over Time"));
}

#[tokio::test]
async fn fetch_then_analyze() {
    let source = StaticFactsSource::new().with_company("GOOGL", ratio_document());

    let facts = fetch_facts(&source, &Company::Ticker(Symbol::new("googl")))
        .await
        .unwrap();
    assert_eq!(analyze_ratios(&facts).rows().len(), 2);

    let err = fetch_facts(&source, &Company::Ticker(Symbol::new("NOPE")))
        .await
        .unwrap_err();
    assert!(matches!(err, FactsError::SymbolNotFound(_)));
}
