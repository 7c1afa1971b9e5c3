mod common;

use std::fs;

use common::{edgar, offline_edgar, read_fixture};
use edgar_digest::{DigestError, FilingOperations, Submission};

fn forms() -> Vec<String> {
    vec!["10-Q".to_string(), "10-K".to_string()]
}

#[test]
fn parse_submission() {
    let submission: Submission =
        serde_json::from_str(&read_fixture("submissions/submission.json")).unwrap();

    assert_eq!(submission.name, "Apple Inc.");
    assert_eq!(submission.tickers, vec!["AAPL"]);
    assert_eq!(submission.filings.recent.form.len(), 4);
}

#[test]
fn latest_filing_skips_other_forms() {
    let submission: Submission =
        serde_json::from_str(&read_fixture("submissions/submission.json")).unwrap();
    let edgar = edgar();

    let meta = edgar
        .latest_from_submission(&submission, "AAPL", "0000320193", &forms())
        .unwrap();
    assert_eq!(meta.form, "10-Q");
    assert_eq!(meta.filing_date.as_deref(), Some("2025-01-31"));
    assert_eq!(meta.report_date.as_deref(), Some("2024-12-28"));
    assert_eq!(meta.primary_document.as_deref(), Some("aapl-20241228.htm"));
    assert_eq!(
        meta.filing_detail_url,
        "https://www.sec.gov/Archives/edgar/data/320193/000032019325000008/index.html"
    );

    let ten_k = edgar
        .latest_from_submission(&submission, "AAPL", "0000320193", &["10-K".to_string()])
        .unwrap();
    assert_eq!(ten_k.accession_number.as_deref(), Some("0000320193-24-000123"));

    let json = serde_json::to_value(&ten_k).unwrap();
    assert_eq!(json["accessionNumber"], "0000320193-24-000123");
    assert_eq!(json["reportDate"], "2024-09-28");
}

#[tokio::test]
async fn cached_document_skips_network() {
    let submission: Submission =
        serde_json::from_str(&read_fixture("submissions/submission.json")).unwrap();
    let edgar = offline_edgar();
    let meta = edgar
        .latest_from_submission(&submission, "AAPL", "0000320193", &forms())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let cached = dir.path().join("aapl_10-q_000032019325000008_aapl-20241228.htm");
    fs::write(&cached, "<html>cached</html>").unwrap();

    let (path, html) = edgar
        .download_primary_document(&meta, dir.path())
        .await
        .unwrap();
    assert_eq!(path, cached);
    assert_eq!(html, "<html>cached</html>");
}

#[tokio::test]
async fn uncached_document_needs_network() {
    let submission: Submission =
        serde_json::from_str(&read_fixture("submissions/submission.json")).unwrap();
    let edgar = offline_edgar();
    let meta = edgar
        .latest_from_submission(&submission, "AAPL", "0000320193", &forms())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let result = edgar.download_primary_document(&meta, dir.path()).await;
    assert!(matches!(result, Err(DigestError::RequestError(_))));
}

#[tokio::test]
async fn missing_primary_document_is_reported() {
    let submission: Submission =
        serde_json::from_str(&read_fixture("submissions/submission.json")).unwrap();
    let edgar = offline_edgar();
    let mut meta = edgar
        .latest_from_submission(&submission, "AAPL", "0000320193", &forms())
        .unwrap();
    meta.primary_document = None;

    let dir = tempfile::tempdir().unwrap();
    let result = edgar.download_primary_document(&meta, dir.path()).await;
    assert!(matches!(result, Err(DigestError::MissingField(_))));
}
