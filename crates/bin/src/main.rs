//! Facts CLI binary.
//!
//! Fetches a company's disclosed facts and prints the trend and ratio
//! analyses, followed by their charts.

use clap::Parser;
use facts::{
    Chart, ChartRenderer, Cik, Company, CompanyFacts, Concept, EdgarClient, FactsSource,
    MAX_HEIGHT, MAX_WIDTH, Panels, StaticFactsSource, Symbol, TextRenderer, analyze_ratios,
    analyze_trend, duplicates_section, fetch_facts, null_counts_section, outliers_section,
    ratio_table, summary_section,
};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_USER_AGENT: &str = "facts-cli/0.1 (contact@example.com)";

#[derive(Parser, Debug)]
#[command(name = "facts")]
#[command(about = "Trend and ratio analysis of SEC company facts", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticker symbol to analyse
    #[arg(long, default_value = "GOOGL")]
    ticker: String,

    /// CIK to fetch directly, skipping the ticker lookup
    #[arg(long)]
    cik: Option<Cik>,

    /// Contact string sent as the User-Agent header
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Concept for the trend analysis (tag or column name)
    #[arg(long, default_value = "Revenues")]
    concept: String,

    /// Read a saved company-facts JSON document instead of the network
    #[arg(long)]
    facts_file: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Print charts as JSON for an external plotting tool
    #[arg(long, conflicts_with = "no_charts")]
    chart_json: bool,

    /// Chart plot width in characters
    #[arg(long, default_value = "72", value_parser = clap::value_parser!(u16).range(1..=MAX_WIDTH as i64))]
    chart_width: u16,

    /// Chart plot height in lines
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u16).range(1..=MAX_HEIGHT as i64))]
    chart_height: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (source, company) = match &cli.facts_file {
        Some(path) => {
            let payload = CompanyFacts::from_file(path)?;
            let company = Company::Cik(payload.cik());
            let source: Box<dyn FactsSource> = Box::new(StaticFactsSource::new().with_facts(payload));
            (source, company)
        }
        None => {
            let company = cli
                .cik
                .map_or_else(|| Company::Ticker(Symbol::new(&cli.ticker)), Company::Cik);
            let source: Box<dyn FactsSource> = Box::new(EdgarClient::new(&cli.user_agent)?);
            (source, company)
        }
    };

    let facts = fetch_facts(source.as_ref(), &company).await?;
    let entity = if facts.entity_name.is_empty() {
        company.to_string()
    } else {
        facts.entity_name.clone()
    };
    println!("{entity} (CIK {})\n", facts.cik());
    info!(entity = %entity, cik = %facts.cik(), concept = %cli.concept, "Running analyses");

    let tag = cli
        .concept
        .parse::<Concept>()
        .map_or_else(|_| cli.concept.clone(), |c| c.tag().to_string());
    let trend = analyze_trend(&facts, &tag)?;

    print!("{}", outliers_section(&trend.outliers)?);
    println!();
    print!("{}", null_counts_section(&trend.null_counts));
    println!();
    print!("{}", duplicates_section(&trend.duplicates)?);
    println!();
    print!("{}", summary_section(&trend.concept, trend.summary.as_ref()));

    let ratios = analyze_ratios(&facts);
    print!("{}", ratio_table(ratios.rows()));

    if cli.no_charts {
        return Ok(());
    }

    let charts = [trend.value_chart(&entity), trend.growth_chart(&entity)];
    let panels = ratios.liquidity_panels(&entity);
    info!(charts = charts.len() + panels.charts.len(), json = cli.chart_json, "Rendering charts");
    if cli.chart_json {
        print_json(&charts, &panels)?;
    } else {
        let renderer = TextRenderer::new(cli.chart_width.into(), cli.chart_height.into());
        debug!(width = renderer.width(), height = renderer.height(), "Text renderer");
        for chart in &charts {
            println!("\n{}", renderer.render(chart));
        }
        println!("\n{}", renderer.render_panels(&panels));
    }

    Ok(())
}

fn print_json(charts: &[Chart], panels: &Panels) -> Result<(), Box<dyn std::error::Error>> {
    for chart in charts {
        println!("{}", chart.to_json()?);
    }
    println!("{}", panels.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["facts"]).unwrap();
        assert_eq!(cli.ticker, "GOOGL");
        assert_eq!(cli.concept, "Revenues");
        assert!(cli.cik.is_none());
        assert!(!cli.no_charts);
    }

    #[test]
    fn test_cik_argument() {
        let cli = Cli::try_parse_from(["facts", "--cik", "1652044"]).unwrap();
        assert_eq!(cli.cik, Some(Cik::new(1_652_044)));

        assert!(Cli::try_parse_from(["facts", "--cik", "googl"]).is_err());
        assert!(Cli::try_parse_from(["facts", "--no-charts", "--chart-json"]).is_err());
    }

    #[test]
    fn test_chart_size_bounds() {
        let cli = Cli::try_parse_from(["facts"]).unwrap();
        assert_eq!((cli.chart_width, cli.chart_height), (72, 16));

        let cli = Cli::try_parse_from(["facts", "--chart-width", "400", "--chart-height", "200"])
            .unwrap();
        assert_eq!((cli.chart_width, cli.chart_height), (400, 200));

        for args in [
            ["facts", "--chart-width", "401"],
            ["facts", "--chart-width", "0"],
            ["facts", "--chart-width", "18446744073709551615"],
            ["facts", "--chart-height", "201"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?}");
        }
    }
}
