//! Ticker → CIK resolution.
//!
//! Almost every EDGAR endpoint is keyed by the company's Central Index Key, so
//! the digest first turns whatever the user typed (`aapl`, `BRK.B`, `320193`)
//! into a zero-padded CIK. Resolution tries, in order:
//!
//! 1. the input itself, when it is already 1–10 digits;
//! 2. the flat-file cache of the SEC ticker map;
//! 3. a live download of `company_tickers.json`, written back to the cache;
//! 4. a small builtin table of well-known tickers.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Edgar;
use super::error::{DigestError, Result};
use super::traits::CompanyOperations;

/// Ticker (upper-case) → zero-padded CIK.
pub type TickerMap = BTreeMap<String, String>;

/// Used when neither the cache nor the SEC ticker file can answer.
pub const BUILTIN_CIKS: &[(&str, &str)] = &[
    ("AAPL", "0000320193"),
    ("MSFT", "0000789019"),
    ("AMZN", "0001018724"),
    ("GOOGL", "0001652044"),
    ("TSLA", "0001318605"),
];

/// Mapping between stock ticker symbols and company CIKs, as published in
/// the SEC's `company_tickers.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyTicker {
    #[serde(rename = "cik_str")]
    pub cik: u64,
    pub ticker: String,
    pub title: String,
}

/// Strips everything but ASCII letters and digits and upper-cases the rest.
///
/// ```rust
/// # use edgar_digest::normalize_ticker_symbol;
/// assert_eq!(normalize_ticker_symbol(" brk.b "), "BRKB");
/// ```
pub fn normalize_ticker_symbol(ticker: &str) -> String {
    ticker
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Left-pads a CIK with zeros to the 10 digits the SEC uses in URLs.
pub fn pad_cik(cik: impl Display) -> String {
    format!("{:0>10}", cik.to_string())
}

/// Whether `s` is a bare CIK (1 to 10 ASCII digits).
pub fn is_cik(s: &str) -> bool {
    (1..=10).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Looks `ticker` up in [`BUILTIN_CIKS`].
pub fn builtin_cik(ticker: &str) -> Option<&'static str> {
    BUILTIN_CIKS
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, cik)| *cik)
}

/// Builds a [`TickerMap`] from the SEC ticker list, keyed the way lookups
/// normalize symbols (`BRK-B` is stored as `BRKB`).
pub fn ticker_map_from(tickers: impl IntoIterator<Item = CompanyTicker>) -> TickerMap {
    tickers
        .into_iter()
        .map(|t| (normalize_ticker_symbol(&t.ticker), pad_cik(t.cik)))
        .collect()
}

/// Reads the cached ticker map. A missing, unreadable or malformed file
/// counts as no cache.
///
/// Keys are normalized like lookup symbols and values zero-padded, so hand-edited caches with
/// numeric CIKs still work.
pub fn load_ticker_cache(path: &Path) -> Option<TickerMap> {
    let raw = fs::read_to_string(path).ok()?;
    let parsed: HashMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Ignoring malformed ticker cache {}: {}", path.display(), e);
            return None;
        }
    };

    let mut map = TickerMap::new();
    for (ticker, value) in parsed {
        let cik = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        map.insert(normalize_ticker_symbol(&ticker), pad_cik(cik));
    }
    Some(map)
}

/// Writes the ticker map as a flat JSON object, creating parent directories.
pub fn save_ticker_cache(path: &Path, map: &TickerMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string(map)?)?;
    Ok(())
}

/// Resolves tickers against a cache file and a live [`CompanyOperations`]
/// source.
///
/// ```ignore
/// # use edgar_digest::{Edgar, TickerResolver};
/// # async fn example() -> edgar_digest::Result<()> {
/// let edgar = Edgar::new("edgar-digest/0.1 (+me@example.com)")?;
/// let resolver = TickerResolver::new(&edgar, "data/company_tickers.json");
/// assert_eq!(resolver.resolve("aapl").await?, "0000320193");
/// # Ok(())
/// # }
/// ```
pub struct TickerResolver<'a, C: ?Sized> {
    source: &'a C,
    cache_path: PathBuf,
}

impl<'a, C> TickerResolver<'a, C>
where
    C: CompanyOperations + ?Sized,
{
    pub fn new(source: &'a C, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns the 10-digit CIK for a ticker or raw CIK.
    ///
    /// # Errors
    ///
    /// `DigestError::TickerNotFound` when no source knows the symbol. Failures
    /// of the live lookup are logged and do not surface on their own.
    pub async fn resolve(&self, symbol_or_cik: &str) -> Result<String> {
        let input = symbol_or_cik.trim();
        if is_cik(input) {
            return Ok(pad_cik(input));
        }

        let ticker = normalize_ticker_symbol(input);

        if let Some(cik) = load_ticker_cache(&self.cache_path).and_then(|map| map.get(&ticker).cloned())
        {
            tracing::debug!("Resolved {} to CIK {} from cache", ticker, cik);
            return Ok(cik);
        }

        match self.source.ticker_map().await {
            Ok(fresh) => {
                if let Err(e) = save_ticker_cache(&self.cache_path, &fresh) {
                    tracing::warn!(
                        "Could not write ticker cache {}: {}",
                        self.cache_path.display(),
                        e
                    );
                }
                if let Some(cik) = fresh.get(&ticker) {
                    return Ok(cik.clone());
                }
            }
            Err(e) => {
                tracing::warn!("Live ticker lookup failed, trying builtin table: {}", e);
            }
        }

        builtin_cik(&ticker)
            .map(str::to_string)
            .ok_or_else(|| DigestError::TickerNotFound(symbol_or_cik.to_string()))
    }
}

impl Edgar {
    fn company_tickers_url(&self) -> String {
        format!("{}/company_tickers.json", self.edgar_files_url)
    }
}

#[async_trait]
impl CompanyOperations for Edgar {
    /// Downloads the SEC ticker list.
    ///
    /// The payload is an object keyed by row number
    /// (`{"0": {"cik_str": 320193, "ticker": "AAPL", ...}}`).
    async fn company_tickers(&self) -> Result<Vec<CompanyTicker>> {
        let response = self.get(&self.company_tickers_url()).await?;
        let map: HashMap<String, CompanyTicker> = serde_json::from_str(&response)?;
        Ok(map.into_values().collect())
    }
}
