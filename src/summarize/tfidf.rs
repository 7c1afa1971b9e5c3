//! Per-sentence TF-IDF scoring.
//!
//! Every sentence is treated as its own document. A sentence's score is the
//! sum of its L2-normalized TF-IDF row, so sentences carrying terms that are
//! frequent locally but rare across the section score higher.

use std::collections::{BTreeMap, HashMap};

use super::stopwords::is_stop_word;
use crate::error::{DigestError, Result};

/// Vocabulary cap used when none is given.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Term-weighting settings for one scoring attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfScorer {
    /// Keep at most this many terms, highest corpus frequency first.
    pub max_features: Option<usize>,
    /// Drop English stopwords before building the vocabulary.
    pub stop_words: bool,
}

impl Default for TfidfScorer {
    fn default() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
            stop_words: true,
        }
    }
}

/// Which configuration produced a set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Stopwords removed.
    Primary,
    /// Retried with stopwords kept after the primary vocabulary came up empty.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub scores: Vec<f64>,
    pub phase: Phase,
}

impl TfidfScorer {
    /// Same settings with stopword removal switched off.
    pub fn without_stop_words(self) -> Self {
        Self {
            stop_words: false,
            ..self
        }
    }

    /// Lower-cases `sentence` and returns its runs of two or more word
    /// characters, minus stopwords when enabled.
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        sentence
            .to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !(self.stop_words && is_stop_word(token)))
            .map(str::to_string)
            .collect()
    }

    /// One score per sentence, in input order.
    ///
    /// # Errors
    ///
    /// `DigestError::EmptyVocabulary` when no sentence contributes a term.
    pub fn score(&self, sentences: &[String]) -> Result<Vec<f64>> {
        let counts: Vec<BTreeMap<String, usize>> = sentences
            .iter()
            .map(|sentence| {
                let mut terms = BTreeMap::new();
                for token in self.tokenize(sentence) {
                    *terms.entry(token).or_insert(0) += 1;
                }
                terms
            })
            .collect();

        let vocabulary = build_vocabulary(&counts, self.max_features);
        if vocabulary.is_empty() {
            return Err(DigestError::EmptyVocabulary);
        }

        let n = sentences.len() as f64;
        let scores = counts
            .iter()
            .map(|terms| {
                let weights: Vec<f64> = terms
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocabulary
                            .get(term)
                            .map(|&df| count as f64 * smoothed_idf(n, df as f64))
                    })
                    .collect();
                let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
                if norm == 0.0 {
                    0.0
                } else {
                    weights.iter().map(|w| w / norm).sum()
                }
            })
            .collect();

        Ok(scores)
    }
}

/// Scores with `primary`, retrying once without stopwords if the primary
/// vocabulary is empty. If the retry has no terms either, every sentence
/// scores zero so selection falls back to document order.
pub fn score_with_fallback(primary: &TfidfScorer, sentences: &[String]) -> Result<ScoreOutcome> {
    match primary.score(sentences) {
        Ok(scores) => Ok(ScoreOutcome {
            scores,
            phase: Phase::Primary,
        }),
        Err(DigestError::EmptyVocabulary) => {
            tracing::debug!(
                "Empty vocabulary with stopwords removed across {} sentences, retrying with stopwords kept",
                sentences.len()
            );
            let scores = match primary.without_stop_words().score(sentences) {
                Ok(scores) => scores,
                Err(DigestError::EmptyVocabulary) => {
                    tracing::debug!("No scorable terms with stopwords kept, scoring every sentence 0");
                    vec![0.0; sentences.len()]
                }
                Err(e) => return Err(e),
            };
            Ok(ScoreOutcome {
                scores,
                phase: Phase::Fallback,
            })
        }
        Err(e) => Err(e),
    }
}

fn smoothed_idf(n: f64, df: f64) -> f64 {
    ((1.0 + n) / (1.0 + df)).ln() + 1.0
}

/// Term → document frequency, capped at `max_features` terms by corpus
/// frequency (ties go to the alphabetically smaller term).
fn build_vocabulary(
    counts: &[BTreeMap<String, usize>],
    max_features: Option<usize>,
) -> HashMap<String, usize> {
    let mut corpus: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for terms in counts {
        for (term, &count) in terms {
            let entry = corpus.entry(term.as_str()).or_insert((0, 0));
            entry.0 += count;
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<(&str, usize, usize)> = corpus
        .into_iter()
        .map(|(term, (tf, df))| (term, tf, df))
        .collect();
    if let Some(limit) = max_features {
        if ranked.len() > limit {
            // Stable sort keeps alphabetical order among equal frequencies.
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(limit);
        }
    }

    ranked
        .into_iter()
        .map(|(term, _, df)| (term.to_string(), df))
        .collect()
}
