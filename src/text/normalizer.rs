use std::collections::HashSet;

use super::StopWords;

/// Tokens shorter than this many characters are never keywords.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Lower-cases text, turns every non-word character into a space and
/// collapses runs of whitespace.
///
/// Word characters are Unicode letters, digits and `_`.
///
/// # Examples
///
/// ```
/// use notegraph::text::normalize_text;
///
/// assert_eq!(normalize_text("Hello, World!"), "hello world");
/// assert_eq!(normalize_text("  snake_case\tstays "), "snake_case stays");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits normalized text into tokens, without filtering.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Whether a normalized token may become a keyword.
///
/// Rejects tokens shorter than [`MIN_TOKEN_CHARS`], stop words and purely
/// numeric tokens.
pub fn is_candidate(token: &str, stop_words: &StopWords) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
        && !stop_words.contains(token)
        && !token.chars().all(char::is_numeric)
}

/// Tokenizes text and keeps only keyword candidates, in reading order.
///
/// # Examples
///
/// ```
/// use notegraph::text::{candidate_tokens, StopWords};
///
/// let tokens = candidate_tokens("The 2024 Rust book, by me", StopWords::english());
/// assert_eq!(tokens, vec!["rust", "book"]);
/// ```
pub fn candidate_tokens(text: &str, stop_words: &StopWords) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| is_candidate(token, stop_words))
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Normalizes a tag label to lowercase kebab-case.
///
/// # Normalization rules
///
/// - Converts to lowercase
/// - Replaces spaces with hyphens
/// - Removes all characters except alphanumeric and hyphens
/// - Collapses repeated hyphens and trims them from both ends
///
/// # Examples
///
/// ```
/// use notegraph::text::normalize_tag;
///
/// assert_eq!(normalize_tag("Machine Learning!"), "machine-learning");
/// assert_eq!(normalize_tag("  --rust--  "), "rust");
/// ```
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalizes tag labels, dropping empties and duplicates (first one wins).
#[must_use]
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_punctuation_with_spaces() {
        assert_eq!(normalize_text("rust's borrow-checker"), "rust s borrow checker");
        assert_eq!(normalize_text("a.b,c;d"), "a b c d");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize_text("Café Über"), "café über");
    }

    #[test]
    fn test_tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n !!! ").is_empty());
    }

    #[test]
    fn test_short_tokens_rejected() {
        let stop_words = StopWords::none();
        assert!(!is_candidate("go", &stop_words));
        assert!(is_candidate("git", &stop_words));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(!is_candidate("éé", &StopWords::none()));
    }

    #[test]
    fn test_numeric_tokens_rejected() {
        let stop_words = StopWords::none();
        assert!(!is_candidate("2024", &stop_words));
        assert!(is_candidate("web3", &stop_words));
        assert!(is_candidate("3d_model", &stop_words));
    }

    #[test]
    fn test_stop_words_rejected() {
        assert!(!is_candidate("the", StopWords::english()));
        assert!(is_candidate("the", &StopWords::none()));
    }

    #[test]
    fn test_candidate_tokens_preserves_order_and_duplicates() {
        let tokens = candidate_tokens("graph theory, graph search", StopWords::english());
        assert_eq!(tokens, vec!["graph", "theory", "graph", "search"]);
    }

    #[test]
    fn test_normalize_tag_rules() {
        assert_eq!(normalize_tag("RUST"), "rust");
        assert_eq!(normalize_tag("c++"), "c");
        assert_eq!(normalize_tag("node.js"), "nodejs");
        assert_eq!(normalize_tag("--WEB 2.0--"), "web-20");
    }

    #[test]
    fn test_normalize_tags_dedups_in_order() {
        assert_eq!(
            normalize_tags(["Rust", "AI", "rust", "   ", "Web"]),
            vec!["rust", "ai", "web"]
        );
    }
}
