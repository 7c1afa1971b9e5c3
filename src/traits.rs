//! Trait definitions grouping the EDGAR operations the digest relies on.
//!
//! `Edgar` implements both traits against SEC.gov. Ticker resolution only
//! depends on [`CompanyOperations`], so tests can substitute an in-memory
//! ticker source for the live endpoint.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::company::{CompanyTicker, TickerMap, ticker_map_from};
use super::error::Result;
use super::filings::{FilingMeta, Submission};

/// Operations for resolving companies.
#[async_trait]
pub trait CompanyOperations: Send + Sync {
    /// Retrieves the full SEC ticker list.
    async fn company_tickers(&self) -> Result<Vec<CompanyTicker>>;

    /// Ticker → zero-padded CIK, built from [`CompanyOperations::company_tickers`].
    async fn ticker_map(&self) -> Result<TickerMap> {
        Ok(ticker_map_from(self.company_tickers().await?))
    }
}

/// Operations for locating and downloading filings.
#[async_trait]
pub trait FilingOperations: Send + Sync {
    /// Retrieves the submissions listing for a CIK.
    async fn submissions(&self, cik: &str) -> Result<Submission>;
    /// The newest filing whose form is one of `forms`.
    async fn latest_filing(
        &self,
        ticker: &str,
        cik: &str,
        forms: &[String],
    ) -> Result<Option<FilingMeta>>;
    /// The filing's primary document, cached under `filings_dir`.
    async fn download_primary_document(
        &self,
        meta: &FilingMeta,
        filings_dir: &Path,
    ) -> Result<(PathBuf, String)>;
}
