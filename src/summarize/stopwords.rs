//! English stopword lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{LANGUAGE, get};

static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    get(LANGUAGE::English)
        .iter()
        .map(|s| s.to_lowercase())
        .collect()
});

/// Whether `token` (already lower-cased) is an English stopword.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}
