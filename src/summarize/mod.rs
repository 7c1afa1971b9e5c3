//! Extractive summarization: split a section into sentences, weight each
//! sentence by TF-IDF and keep the best few in reading order.
//!
//! ```rust
//! use edgar_digest::summarize::top_sentences;
//!
//! let text = "Revenue increased due to new products. Margins improved. \
//!             Services revenue reached a record. The board met twice.";
//! let highlights = top_sentences(text, 2)?;
//! assert_eq!(highlights.len(), 2);
//! # Ok::<(), edgar_digest::DigestError>(())
//! ```

mod select;
mod sentences;
mod stopwords;
mod tfidf;

pub use select::select_top_k;
pub use sentences::split_sentences;
pub use stopwords::is_stop_word;
pub use tfidf::{DEFAULT_MAX_FEATURES, Phase, ScoreOutcome, TfidfScorer, score_with_fallback};

use crate::error::Result;

/// Sentence ranker with configurable term weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summarizer {
    scorer: TfidfScorer,
}

impl Summarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.scorer.max_features = max_features;
        self
    }

    /// Whether the first scoring attempt removes English stopwords.
    pub fn with_stop_words(mut self, stop_words: bool) -> Self {
        self.scorer.stop_words = stop_words;
        self
    }

    pub fn scorer(&self) -> &TfidfScorer {
        &self.scorer
    }

    /// Returns up to `k` sentences of `text`, verbatim and in source order.
    ///
    /// Blank input and `k == 0` yield no sentences. When the text has at most
    /// `k` sentences they are all returned without scoring. Text with no
    /// scorable term at all yields its first `k` sentences.
    pub fn summarize(&self, text: &str, k: usize) -> Result<Vec<String>> {
        Ok(self.summarize_with_phase(text, k)?.0)
    }

    /// Like [`Summarizer::summarize`], also reporting which scoring phase ran
    /// (`None` when no scoring was needed).
    pub fn summarize_with_phase(&self, text: &str, k: usize) -> Result<(Vec<String>, Option<Phase>)> {
        let text = text.trim();
        if text.is_empty() || k == 0 {
            return Ok((Vec::new(), None));
        }

        let sentences = split_sentences(text);
        if sentences.len() <= k {
            return Ok((sentences, None));
        }

        let outcome = score_with_fallback(&self.scorer, &sentences)?;
        let keep = select_top_k(&outcome.scores, k);
        let picked = keep.into_iter().map(|i| sentences[i].clone()).collect();
        Ok((picked, Some(outcome.phase)))
    }
}

/// [`Summarizer::summarize`] with default settings.
pub fn top_sentences(text: &str, k: usize) -> Result<Vec<String>> {
    Summarizer::default().summarize(text, k)
}
