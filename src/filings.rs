use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Edgar;
use super::error::{DigestError, Result};
use super::traits::FilingOperations;

/// The parts of a company's submissions JSON the digest reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub cik: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tickers: Vec<String>,
    pub filings: FilingsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilingsData {
    pub recent: RecentFilings,
}

/// Column-oriented listing of recent filings, newest first. Columns other than
/// `form` may be missing or shorter than `form`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentFilings {
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(rename = "accessionNumber")]
    pub accession_number: Option<Vec<String>>,
    #[serde(rename = "filingDate")]
    pub filing_date: Option<Vec<String>>,
    #[serde(rename = "reportDate")]
    pub report_date: Option<Vec<String>>,
    #[serde(rename = "primaryDocument")]
    pub primary_document: Option<Vec<String>>,
}

impl RecentFilings {
    fn get_vec_item_at(&self, vec_opt: &Option<Vec<String>>, idx: usize) -> Option<String> {
        vec_opt
            .as_ref()
            .and_then(|v| v.get(idx))
            .filter(|s| !s.is_empty())
            .cloned()
    }

    /// Index of the newest filing whose form is in `forms`.
    pub fn latest_index(&self, forms: &[String]) -> Option<usize> {
        self.form.iter().position(|form| forms.contains(form))
    }
}

/// Metadata of the filing a report is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingMeta {
    pub ticker: String,
    /// Zero-padded to 10 digits.
    pub cik: String,
    pub form: String,
    pub filing_date: Option<String>,
    pub report_date: Option<String>,
    pub accession_number: Option<String>,
    pub primary_document: Option<String>,
    pub filing_detail_url: String,
}

impl FilingMeta {
    /// File name used for the cached primary document,
    /// `<ticker>_<form>_<accession without dashes>_<document>` in lower case.
    pub fn cache_file_name(&self) -> Result<String> {
        let accession = self
            .accession_number
            .as_deref()
            .ok_or(DigestError::MissingField("accessionNumber"))?;
        let primary = self
            .primary_document
            .as_deref()
            .ok_or(DigestError::MissingField("primaryDocument"))?;
        Ok(format!(
            "{}_{}_{}_{}",
            self.ticker,
            self.form,
            accession.replace('-', ""),
            primary
        )
        .to_lowercase())
    }
}

/// Archive paths use the CIK without its zero padding.
fn unpadded_cik(cik: &str) -> &str {
    let trimmed = cik.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

#[derive(Debug)]
enum UrlType {
    Submission,
    FilingDetail,
    FilingContent,
}

impl Edgar {
    fn build_url(&self, url_type: UrlType, params: &[&str]) -> String {
        match url_type {
            UrlType::Submission => {
                let cik = format!("{:0>10}", params[0]);
                format!("{}/submissions/CIK{}.json", self.edgar_data_url, cik)
            }
            UrlType::FilingDetail => {
                let (cik, acc_no) = (params[0], params[1]);
                format!(
                    "{}/data/{}/{}/index.html",
                    self.edgar_archives_url,
                    unpadded_cik(cik),
                    acc_no.replace('-', "")
                )
            }
            UrlType::FilingContent => {
                let (cik, acc_no, filename) = (params[0], params[1], params[2]);
                format!(
                    "{}/data/{}/{}/{}",
                    self.edgar_archives_url,
                    unpadded_cik(cik),
                    acc_no.replace('-', ""),
                    filename
                )
            }
        }
    }

    /// `<data>/submissions/CIK<padded>.json`
    pub fn submissions_url(&self, cik: &str) -> String {
        self.build_url(UrlType::Submission, &[cik])
    }

    /// Human-readable filing index page on SEC.gov.
    pub fn filing_detail_url(&self, cik: &str, accession_number: &str) -> String {
        self.build_url(UrlType::FilingDetail, &[cik, accession_number])
    }

    pub fn primary_document_url(
        &self,
        cik: &str,
        accession_number: &str,
        primary_document: &str,
    ) -> String {
        self.build_url(
            UrlType::FilingContent,
            &[cik, accession_number, primary_document],
        )
    }

    /// Picks the newest filing of an allowed form out of already fetched
    /// submissions. No network access.
    pub fn latest_from_submission(
        &self,
        submission: &Submission,
        ticker: &str,
        cik: &str,
        forms: &[String],
    ) -> Option<FilingMeta> {
        let recent = &submission.filings.recent;
        let idx = recent.latest_index(forms)?;
        let accession_number = recent.get_vec_item_at(&recent.accession_number, idx);
        let filing_detail_url = accession_number
            .as_deref()
            .map(|acc| self.filing_detail_url(cik, acc))
            .unwrap_or_default();

        Some(FilingMeta {
            ticker: ticker.to_string(),
            cik: cik.to_string(),
            form: recent.form[idx].clone(),
            filing_date: recent.get_vec_item_at(&recent.filing_date, idx),
            report_date: recent.get_vec_item_at(&recent.report_date, idx),
            accession_number,
            primary_document: recent.get_vec_item_at(&recent.primary_document, idx),
            filing_detail_url,
        })
    }
}

#[async_trait]
impl FilingOperations for Edgar {
    async fn submissions(&self, cik: &str) -> Result<Submission> {
        let response = self.get(&self.submissions_url(cik)).await?;
        Ok(serde_json::from_str::<Submission>(&response)?)
    }

    /// Fetches the company's submissions and returns the newest filing whose
    /// form is in `forms`, or `None` if there is none among recent filings.
    async fn latest_filing(
        &self,
        ticker: &str,
        cik: &str,
        forms: &[String],
    ) -> Result<Option<FilingMeta>> {
        let submission = self.submissions(cik).await?;
        let meta = self.latest_from_submission(&submission, ticker, cik, forms);
        match &meta {
            Some(m) => tracing::info!(
                "Latest {} for {} (CIK {}) filed {}",
                m.form,
                ticker,
                cik,
                m.filing_date.as_deref().unwrap_or("?")
            ),
            None => tracing::info!("No {:?} filings for {} (CIK {})", forms, ticker, cik),
        }
        Ok(meta)
    }

    /// Returns the primary document from `filings_dir` if it was downloaded
    /// before, otherwise downloads and caches it.
    ///
    /// # Errors
    ///
    /// `DigestError::MissingField` when the metadata has no accession number
    /// or primary document.
    async fn download_primary_document(
        &self,
        meta: &FilingMeta,
        filings_dir: &Path,
    ) -> Result<(PathBuf, String)> {
        let local_path = filings_dir.join(meta.cache_file_name()?);
        if local_path.exists() {
            tracing::debug!("Using cached document {}", local_path.display());
            let bytes = fs::read(&local_path)?;
            return Ok((local_path, String::from_utf8_lossy(&bytes).into_owned()));
        }

        let (Some(accession), Some(primary)) = (
            meta.accession_number.as_deref(),
            meta.primary_document.as_deref(),
        ) else {
            return Err(DigestError::MissingField("primaryDocument"));
        };
        let url = self.primary_document_url(&meta.cik, accession, primary);
        let html = self.get(&url).await?;

        fs::create_dir_all(filings_dir)?;
        fs::write(&local_path, &html)?;
        tracing::info!("Saved primary document to {}", local_path.display());
        Ok((local_path, html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edgar() -> Edgar {
        Edgar::new("test_agent example@example.com").unwrap()
    }

    fn recent() -> RecentFilings {
        let col = |items: &[&str]| Some(items.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        RecentFilings {
            form: vec!["8-K".into(), "10-Q".into(), "10-K".into()],
            accession_number: col(&["0000320193-25-000001", "0000320193-25-000002", "0000320193-24-000123"]),
            filing_date: col(&["2025-05-02", "2025-05-01", "2024-11-01"]),
            report_date: col(&["", "2025-03-29"]),
            primary_document: col(&["a8k.htm", "aapl-20250329.htm", "aapl-20240928.htm"]),
        }
    }

    #[test]
    fn test_urls() {
        let edgar = edgar();
        assert_eq!(
            edgar.submissions_url("320193"),
            "https://data.sec.gov/submissions/CIK0000320193.json"
        );
        assert_eq!(
            edgar.filing_detail_url("0000320193", "0000320193-24-000123"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/index.html"
        );
        assert_eq!(
            edgar.primary_document_url("0000320193", "0000320193-24-000123", "aapl-20240928.htm"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm"
        );
        assert_eq!(unpadded_cik("0000000000"), "0");
    }

    #[test]
    fn test_latest_from_submission() {
        let submission = Submission {
            cik: "320193".into(),
            name: "Apple Inc.".into(),
            tickers: vec!["AAPL".into()],
            filings: FilingsData { recent: recent() },
        };
        let forms = vec!["10-K".to_string(), "10-Q".to_string()];
        let meta = edgar()
            .latest_from_submission(&submission, "AAPL", "0000320193", &forms)
            .unwrap();

        assert_eq!(meta.form, "10-Q");
        assert_eq!(meta.report_date.as_deref(), Some("2025-03-29"));
        assert_eq!(meta.accession_number.as_deref(), Some("0000320193-25-000002"));
        assert!(meta.filing_detail_url.ends_with("/320193/000032019325000002/index.html"));

        let only_10k = vec!["10-K".to_string()];
        let meta = edgar()
            .latest_from_submission(&submission, "AAPL", "0000320193", &only_10k)
            .unwrap();
        assert_eq!(meta.report_date, None);

        assert!(edgar()
            .latest_from_submission(&submission, "AAPL", "0000320193", &["S-1".to_string()])
            .is_none());
    }

    #[test]
    fn test_cache_file_name() {
        let meta = FilingMeta {
            ticker: "AAPL".into(),
            cik: "0000320193".into(),
            form: "10-K".into(),
            filing_date: None,
            report_date: None,
            accession_number: Some("0000320193-24-000123".into()),
            primary_document: Some("AAPL-20240928.htm".into()),
            filing_detail_url: String::new(),
        };
        assert_eq!(
            meta.cache_file_name().unwrap(),
            "aapl_10-k_000032019324000123_aapl-20240928.htm"
        );

        let missing = FilingMeta {
            primary_document: None,
            ..meta
        };
        assert!(matches!(
            missing.cache_file_name(),
            Err(DigestError::MissingField("primaryDocument"))
        ));
    }
}
