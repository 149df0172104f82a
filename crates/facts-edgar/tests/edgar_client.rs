//! Integration tests for the EDGAR client against a local HTTP server.

use facts_core::{Cik, FactsError, FactsSource, Symbol, USD_UNIT, US_GAAP};
use facts_edgar::EdgarClient;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "FactsTest/1.0 (test@example.com)";

async fn client_for(server: &MockServer) -> EdgarClient {
    EdgarClient::new(USER_AGENT)
        .unwrap()
        .with_base_urls(
            format!("{}/files/company_tickers.json", server.uri()),
            server.uri(),
        )
}

async fn mount_tickers(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/files/company_tickers.json"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": 1652044, "ticker": "GOOGL", "title": "Alphabet Inc."}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_then_fetch_company_facts() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/xbrl/companyfacts/CIK0001652044.json"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cik": 1652044,
            "entityName": "Alphabet Inc.",
            "facts": {
                "us-gaap": {
                    "Revenues": {
                        "label": "Revenues",
                        "units": {
                            "USD": [{
                                "start": "2023-01-01", "end": "2023-12-31",
                                "val": 307394000000i64, "accn": "0001652044-24-000022",
                                "fy": 2023, "fp": "FY", "form": "10-K",
                                "filed": "2024-01-31", "frame": "CY2023"
                            }]
                        }
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let facts = client
        .company_facts_for(&Symbol::new("googl"))
        .await
        .unwrap();

    assert_eq!(facts.cik(), Cik::new(1_652_044));
    assert_eq!(facts.entity_name, "Alphabet Inc.");
    let records = facts.lookup(US_GAAP, "Revenues", USD_UNIT).records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].accn.as_deref(), Some("0001652044-24-000022"));
}

#[tokio::test]
async fn test_unknown_ticker_is_symbol_not_found() {
    let server = MockServer::start().await;
    mount_tickers(&server).await;

    let client = client_for(&server).await;
    let err = client.lookup_cik(&Symbol::new("NOPE")).await.unwrap_err();

    assert!(matches!(err, FactsError::SymbolNotFound(ref s) if s == "NOPE"));
}

#[tokio::test]
async fn test_http_error_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/xbrl/companyfacts/CIK0000000042.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.company_facts(Cik::new(42)).await.unwrap_err();

    match err {
        FactsError::Network(msg) => assert!(msg.contains("404")),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/company_tickers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.lookup_cik(&Symbol::new("GOOGL")).await.unwrap_err();

    assert!(matches!(err, FactsError::Parse(_)));
}
