//! Keyword extraction with structural weighting.
//!
//! # Algorithm
//!
//! 1. Markup bodies are split into heading text and remaining text; plain
//!    bodies are all remaining text
//! 2. Tokens are normalized and filtered (see [`crate::text::is_candidate`])
//! 3. Heading tokens add 3 per occurrence, body tokens add 1
//! 4. Title tokens add 2 per occurrence to the same table
//! 5. The table is ranked by weight (ties keep first-seen order) and the top
//!    [`MAX_KEYWORDS`] tokens are returned
//!
//! Accumulation order is headings, then body text, then title.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frequency::FrequencyTable;
use crate::models::{Content, Note};
use crate::text::{StopWords, candidate_tokens, segments_or_fallback, strip_tags};

/// Upper bound on keywords per note.
pub const MAX_KEYWORDS: usize = 10;
/// Weight of each token occurrence inside a markup heading.
pub const HEADING_WEIGHT: usize = 3;
/// Weight of each token occurrence in body text.
pub const BODY_WEIGHT: usize = 1;
/// Weight of each token occurrence in the title.
pub const TITLE_WEIGHT: usize = 2;

/// A word and its corpus-wide occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Scores note text against a stop-word set.
///
/// # Examples
///
/// ```
/// use notegraph::{KeywordExtractor, NoteBuilder, NoteId};
/// use notegraph::text::StopWords;
///
/// let stop_words = StopWords::from_words(["draft"]);
/// let extractor = KeywordExtractor::new(&stop_words);
///
/// let note = NoteBuilder::new()
///     .id(NoteId::new(1))
///     .title("Draft plan")
///     .body("plan the migration")
///     .build();
///
/// // "the" survives because the custom set replaces the English one.
/// assert_eq!(extractor.extract(&note), vec!["plan", "the", "migration"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor<'s> {
    stop_words: &'s StopWords,
}

impl Default for KeywordExtractor<'static> {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl<'s> KeywordExtractor<'s> {
    pub fn new(stop_words: &'s StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &'s StopWords {
        self.stop_words
    }

    /// Builds the weighted token table for one note.
    pub fn scores(&self, note: &Note) -> FrequencyTable {
        let mut table = FrequencyTable::new();

        match note.body() {
            Content::Markup(markup) => {
                let segments = segments_or_fallback(markup);
                for heading in &segments.headings {
                    table.add_all(candidate_tokens(heading, self.stop_words), HEADING_WEIGHT);
                }
                table.add_all(candidate_tokens(&segments.text, self.stop_words), BODY_WEIGHT);
            }
            Content::PlainText(text) => {
                table.add_all(candidate_tokens(text, self.stop_words), BODY_WEIGHT);
            }
        }

        table.add_all(candidate_tokens(note.title(), self.stop_words), TITLE_WEIGHT);
        table
    }

    /// Returns up to [`MAX_KEYWORDS`] tokens, heaviest first.
    pub fn extract(&self, note: &Note) -> Vec<String> {
        let keywords: Vec<String> = self
            .scores(note)
            .top(MAX_KEYWORDS)
            .into_iter()
            .map(|(token, _)| token)
            .collect();

        debug!(note_id = %note.id(), count = keywords.len(), "extracted keywords");
        keywords
    }

    /// Counts surviving tokens across the whole corpus, without any
    /// heading or title weighting, and returns the `limit` most frequent.
    pub fn word_frequency(&self, notes: &[Note], limit: usize) -> Vec<WordCount> {
        let mut table = FrequencyTable::new();
        for note in notes {
            let text = format!("{} {}", note.title(), body_text(note.body()));
            table.add_all(candidate_tokens(&text, self.stop_words), 1);
        }

        table
            .top(limit)
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect()
    }
}

/// Extracts keywords with the shared English stop-word set.
pub fn extract_note_keywords(note: &Note) -> Vec<String> {
    KeywordExtractor::default().extract(note)
}

fn body_text(body: &Content) -> String {
    match body {
        Content::PlainText(text) => text.clone(),
        Content::Markup(markup) => strip_tags(markup),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::{NoteBuilder, NoteId};
    use crate::text::is_candidate;
    use proptest::prelude::*;

    /// Strategy for short documents mixing words, numbers, fillers and punctuation.
    fn arb_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                "[a-z]{1,8}",
                "[0-9]{1,5}",
                Just("the".to_string()),
                Just("and".to_string()),
                "[,.;!?]",
            ],
            0..60,
        )
        .prop_map(|words| words.join(" "))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn keywords_respect_bounds_and_filters(title in arb_text(), body in arb_text(), heading in arb_text()) {
            let note = NoteBuilder::new()
                .id(NoteId::new(1))
                .title(title)
                .content(Content::Markup(format!("<h2>{heading}</h2><p>{body}</p>")))
                .build();

            let keywords = extract_note_keywords(&note);

            prop_assert!(keywords.len() <= MAX_KEYWORDS);
            for keyword in &keywords {
                prop_assert!(is_candidate(keyword, StopWords::english()));
            }
        }

        #[test]
        fn keywords_are_unique(body in arb_text()) {
            let note = NoteBuilder::new().id(NoteId::new(1)).body(body).build();
            let keywords = extract_note_keywords(&note);

            let mut deduped = keywords.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), keywords.len());
        }
    }
}
