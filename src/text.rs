//! Text normalization shared by keyword extraction and corpus statistics.
//!
//! - [`StopWords`]: immutable filler-word set
//! - [`normalize_text`] / [`candidate_tokens`]: lower-case, strip punctuation, filter
//! - [`parse_markup`]: split editor markup into heading text and body text

mod markup;
mod normalizer;
mod stop_words;

pub use markup::{
    MarkupError, MarkupSegments, parse_markup, segments_or_fallback, strip_tags,
};
pub use normalizer::{
    MIN_TOKEN_CHARS, candidate_tokens, is_candidate, normalize_tag, normalize_tags,
    normalize_text, tokenize,
};
pub use stop_words::StopWords;
