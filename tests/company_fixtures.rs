mod common;

use std::collections::HashMap;
use std::fs;

use common::{offline_edgar, read_fixture};
use edgar_digest::{
    CompanyTicker, DigestError, TickerResolver, load_ticker_cache, ticker_map_from,
};

#[test]
fn parse_company_tickers() {
    let content = read_fixture("tickers/company_tickers.json");
    let parsed: HashMap<String, CompanyTicker> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["1"].ticker, "NVDA");
    assert_eq!(parsed["1"].cik, 1045810);

    let map = ticker_map_from(parsed.into_values());
    assert_eq!(map["AAPL"], "0000320193");
    assert_eq!(map["BRKB"], "0001067983");
    assert!(!map.contains_key("BRK-B"));
}

#[tokio::test]
async fn resolver_uses_cache_when_sec_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company_tickers.json");
    fs::write(&path, r#"{"NVDA": "0001045810"}"#).unwrap();

    let edgar = offline_edgar();
    let resolver = TickerResolver::new(&edgar, &path);
    assert_eq!(resolver.resolve("nvda").await.unwrap(), "0001045810");
}

#[tokio::test]
async fn resolver_falls_back_to_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company_tickers.json");

    let edgar = offline_edgar();
    let resolver = TickerResolver::new(&edgar, &path);
    assert_eq!(resolver.resolve("googl").await.unwrap(), "0001652044");
    assert_eq!(resolver.resolve("0789019").await.unwrap(), "0000789019");
    assert!(load_ticker_cache(&path).is_none());

    let err = resolver.resolve("NOTATICKER").await.unwrap_err();
    assert!(matches!(err, DigestError::TickerNotFound(_)));
    assert!(err.to_string().contains("NOTATICKER"));
}

#[tokio::test]
async fn resolver_matches_class_share_tickers_from_cached_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company_tickers.json");
    let parsed: HashMap<String, CompanyTicker> =
        serde_json::from_str(&read_fixture("tickers/company_tickers.json")).unwrap();
    edgar_digest::save_ticker_cache(&path, &ticker_map_from(parsed.into_values())).unwrap();

    let edgar = offline_edgar();
    let resolver = TickerResolver::new(&edgar, &path);
    assert_eq!(resolver.resolve("brk.b").await.unwrap(), "0001067983");
    assert_eq!(resolver.resolve("BRK-B").await.unwrap(), "0001067983");
}
