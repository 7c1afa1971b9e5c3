//! The analyst pipeline: ticker in, HTML report out.

use std::path::PathBuf;

use super::company::{TickerResolver, normalize_ticker_symbol};
use super::config::DigestConfig;
use super::error::Result;
use super::report::{self, Highlights};
use super::sections::{Section, SectionTexts, extract_section_texts};
use super::summarize::Summarizer;
use super::traits::{CompanyOperations, FilingOperations};

/// Module slug of the analyst report.
pub const MODULE: &str = "analyst";

/// Top `k` sentences of each section.
///
/// A section that cannot be scored is logged and left without highlights so
/// the other section still reaches the report.
pub fn highlight_sections(summarizer: &Summarizer, sections: &SectionTexts, k: usize) -> Highlights {
    let mut highlights = Highlights::default();
    for section in Section::ALL {
        match summarizer.summarize(sections.get(section), k) {
            Ok(top) => highlights.set(section, top),
            Err(e) => tracing::warn!("Could not score {} sentences: {}", section, e),
        }
    }
    highlights
}

/// Resolves `ticker`, fetches its latest filing, summarizes it and writes
/// `<output_dir>/analyst/docs/index.html`. Returns the written path.
///
/// A ticker without any filing of the configured forms still gets a page
/// saying so.
pub async fn run<E>(config: &DigestConfig, edgar: &E, ticker: &str) -> Result<PathBuf>
where
    E: CompanyOperations + FilingOperations,
{
    let title = report::analyst_title(ticker.trim());

    let cik = TickerResolver::new(edgar, config.ticker_cache_path())
        .resolve(ticker)
        .await?;
    let symbol = normalize_ticker_symbol(ticker);
    tracing::info!("Resolved {} to CIK {}", symbol, cik);

    let Some(meta) = edgar.latest_filing(&symbol, &cik, &config.forms).await? else {
        return report::render_page(
            MODULE,
            &title,
            &report::not_found_body(ticker.trim()),
            &config.nav_modules,
            &config.output_dir,
        );
    };

    let (local_path, html) = edgar
        .download_primary_document(&meta, &config.filings_dir())
        .await?;
    let sections = extract_section_texts(&html);
    let highlights = highlight_sections(&Summarizer::default(), &sections, config.highlights);

    report::render_page(
        MODULE,
        &title,
        &report::analyst_body(&meta, &highlights, &local_path),
        &config.nav_modules,
        &config.output_dir,
    )
}
