use std::collections::HashSet;
use std::sync::LazyLock;

/// English filler words that never become keywords.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does",
    "doesn", "doing", "don", "down", "during", "each", "etc", "even", "ever", "every", "few",
    "for", "from", "further", "get", "gets", "got", "had", "hadn", "has", "hasn", "have",
    "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "let",
    "like", "made", "make", "many", "may", "me", "might", "more", "most", "much", "must",
    "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "one",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "really", "same",
    "shall", "she", "should", "shouldn", "since", "so", "some", "still", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "though", "through", "thus", "to", "too", "under", "until", "up", "upon",
    "us", "use", "used", "using", "very", "via", "was", "wasn", "we", "well", "were", "weren",
    "what", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "won", "would", "wouldn", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

static ENGLISH: LazyLock<StopWords> = LazyLock::new(|| StopWords::from_words(ENGLISH_STOP_WORDS));

/// Immutable set of words excluded from keyword candidacy.
///
/// Words are stored lower-cased; lookups expect already normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds a set from arbitrary words.
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::text::StopWords;
    ///
    /// let stop_words = StopWords::from_words(["Lorem", "ipsum"]);
    /// assert!(stop_words.contains("lorem"));
    /// assert!(!stop_words.contains("dolor"));
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// The shared English set, built on first use and never mutated.
    pub fn english() -> &'static StopWords {
        &ENGLISH
    }

    /// An empty set, for callers that want every token considered.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_set_contains_common_fillers() {
        let stop_words = StopWords::english();
        for word in ["the", "and", "with", "about", "which"] {
            assert!(stop_words.contains(word), "{word} should be a stop word");
        }
    }

    #[test]
    fn english_set_keeps_content_words() {
        let stop_words = StopWords::english();
        for word in ["rust", "memory", "safety", "graph", "concurrency"] {
            assert!(!stop_words.contains(word), "{word} should not be a stop word");
        }
    }

    #[test]
    fn english_set_is_shared() {
        assert!(std::ptr::eq(StopWords::english(), StopWords::english()));
    }

    #[test]
    fn from_words_normalizes_and_skips_blanks() {
        let stop_words = StopWords::from_words(["  Foo ", "BAR", "", "   "]);
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.contains("foo"));
        assert!(stop_words.contains("bar"));
    }

    #[test]
    fn none_is_empty() {
        assert!(StopWords::none().is_empty());
    }
}
