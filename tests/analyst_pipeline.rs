mod common;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use common::{offline_edgar, read_fixture};
use edgar_digest::{
    CompanyOperations, CompanyTicker, DigestConfig, DigestError, Edgar, FilingMeta,
    FilingOperations, Result, Submission, analyst,
};

/// Serves fixtures in place of SEC.gov.
struct FixtureEdgar {
    urls: Edgar,
}

#[async_trait]
impl CompanyOperations for FixtureEdgar {
    async fn company_tickers(&self) -> Result<Vec<CompanyTicker>> {
        let map: HashMap<String, CompanyTicker> =
            serde_json::from_str(&read_fixture("tickers/company_tickers.json"))?;
        Ok(map.into_values().collect())
    }
}

#[async_trait]
impl FilingOperations for FixtureEdgar {
    async fn submissions(&self, cik: &str) -> Result<Submission> {
        if cik != "0000320193" {
            return Err(DigestError::NotFound);
        }
        Ok(serde_json::from_str(&read_fixture("submissions/submission.json"))?)
    }

    async fn latest_filing(
        &self,
        ticker: &str,
        cik: &str,
        forms: &[String],
    ) -> Result<Option<FilingMeta>> {
        let submission = self.submissions(cik).await?;
        Ok(self.urls.latest_from_submission(&submission, ticker, cik, forms))
    }

    async fn download_primary_document(
        &self,
        meta: &FilingMeta,
        filings_dir: &Path,
    ) -> Result<(PathBuf, String)> {
        fs::create_dir_all(filings_dir)?;
        let path = filings_dir.join(meta.cache_file_name()?);
        let html = read_fixture("html/10k_sample.html");
        fs::write(&path, &html)?;
        Ok((path, html))
    }
}

fn config(root: &Path) -> DigestConfig {
    DigestConfig {
        data_dir: root.join("data"),
        output_dir: root.to_path_buf(),
        ..DigestConfig::default()
    }
}

#[tokio::test]
async fn renders_report_with_highlights() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let edgar = FixtureEdgar { urls: offline_edgar() };

    let page = analyst::run(&config, &edgar, "aapl").await.unwrap();
    assert_eq!(page, root.path().join("analyst").join("docs").join("index.html"));

    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains("<title>Analyst Report · AAPL · FinOps Platform</title>"));
    assert!(html.contains("<h2>Analyst · AAPL</h2>"));
    assert!(html.contains("<strong>Form:</strong> 10-Q"));
    assert!(html.contains("/320193/000032019325000008/index.html"));
    assert_eq!(html.matches("<li>").count(), 6);
    assert!(!html.contains("No highlights found."));
    assert!(html.contains("aapl_10-q_000032019325000008_aapl-20241228.htm"));

    // Live ticker lookup went through the fixture and was cached.
    assert!(config.ticker_cache_path().exists());
}

#[tokio::test]
async fn no_matching_filing_renders_notice() {
    let root = tempfile::tempdir().unwrap();
    let config = DigestConfig {
        forms: vec!["S-1".to_string()],
        ..config(root.path())
    };
    let edgar = FixtureEdgar { urls: offline_edgar() };

    let page = analyst::run(&config, &edgar, "320193").await.unwrap();
    let html = fs::read_to_string(page).unwrap();
    assert!(html.contains("Could not find SEC filings for <strong>320193</strong>"));
    assert!(!config.filings_dir().exists());
}

#[tokio::test]
async fn unknown_ticker_fails() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());
    let edgar = FixtureEdgar { urls: offline_edgar() };

    let result = analyst::run(&config, &edgar, "ZZZZZ").await;
    assert!(matches!(result, Err(DigestError::TickerNotFound(_))));
    assert!(!root.path().join("analyst").exists());
}
