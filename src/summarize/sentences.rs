//! Naive sentence segmentation on end punctuation.

/// Splits `text` after every `.`, `!` or `?` that is followed by whitespace.
///
/// Fragments are trimmed and empty ones dropped. Abbreviations, decimals and
/// quoted punctuation are not special-cased.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
            let end = i + c.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(out: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_basic_sentences() {
        let sentences = split_sentences("Hello world. This is a test! Is it final? Yes.");
        assert_eq!(
            sentences,
            vec!["Hello world.", "This is a test!", "Is it final?", "Yes."]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_punctuation_without_whitespace_does_not_split() {
        let sentences = split_sentences("Revenue grew 4.5% in fiscal 2024. Margins held.");
        assert_eq!(sentences, vec!["Revenue grew 4.5% in fiscal 2024.", "Margins held."]);
    }

    #[test]
    fn test_trailing_fragment_without_punctuation() {
        let sentences = split_sentences("First one.  second has no end");
        assert_eq!(sentences, vec!["First one.", "second has no end"]);
    }

    #[test]
    fn test_lone_punctuation_is_kept() {
        assert_eq!(split_sentences("a. . b"), vec!["a.", ".", "b"]);
    }
}
