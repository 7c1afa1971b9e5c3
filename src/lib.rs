//! # edgar-digest
//!
//! Turns a company's latest SEC EDGAR filing into a short static HTML digest.
//!
//! ## Pipeline
//!
//! - **Resolve** a ticker (or raw CIK) to a zero-padded CIK
//! - **Fetch** the newest 10-Q/10-K metadata and its primary document, through a
//!   rate-limited client that complies with SEC.gov fair access rules
//! - **Extract** the MD&A and Risk Factors sections from the filing HTML
//! - **Summarize** each section into its highest-scoring TF-IDF sentences
//! - **Render** the highlights into `<out>/analyst/docs/index.html`
//!
//! The summarizer and section extractor are plain functions and work on any
//! text or HTML:
//!
//! ```rust
//! use edgar_digest::{extract_section_texts, top_sentences};
//!
//! let html = "<h2>Item 1A. Risk Factors</h2><p>Supply may tighten. Rates may rise.</p>";
//! let sections = extract_section_texts(html);
//! let top = top_sentences(&sections.risk, 1)?;
//! assert_eq!(top.len(), 1);
//! # Ok::<(), edgar_digest::DigestError>(())
//! ```
//!
//! ## Requirements
//!
//! Network access is async and requires a tokio runtime.
//!
//! ```ignore
//! use edgar_digest::{DigestConfig, Edgar, analyst};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DigestConfig::from_env();
//!     let edgar = Edgar::with_config(config.edgar.clone())?;
//!     let page = analyst::run(&config, &edgar, "AAPL").await?;
//!     println!("Wrote {}", page.display());
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod traits;

pub mod analyst;
mod company;
mod filings;
pub mod publish;
pub mod report;
pub mod sections;
pub mod summarize;

pub use config::{
    DEFAULT_CONTACT_EMAIL, DEFAULT_HIGHLIGHTS, DEFAULT_TICKER, DigestConfig, EdgarConfig,
    EdgarUrls, user_agent_for,
};
pub use self::core::Edgar;
pub use error::{DigestError, Result};

pub use company::{
    BUILTIN_CIKS, CompanyTicker, TickerMap, TickerResolver, builtin_cik, is_cik,
    load_ticker_cache, normalize_ticker_symbol, pad_cik, save_ticker_cache, ticker_map_from,
};
pub use filings::{FilingMeta, FilingsData, RecentFilings, Submission};
pub use publish::publish;
pub use sections::{Section, SectionTexts, extract_section_texts};
pub use summarize::{Summarizer, top_sentences};

pub use traits::{CompanyOperations, FilingOperations};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
