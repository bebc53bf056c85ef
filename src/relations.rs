//! Pairwise relatedness by shared keywords.
//!
//! Every note is compared with every other note, so resolution over a
//! corpus is O(n² · k) with k ≤ 10 keywords per note. Output order is a
//! stable sort on shared-keyword count, which relies on this full scan; an
//! inverted keyword index would change candidate order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Note, NoteId};

/// Minimum number of shared keywords for two notes to count as related.
///
/// Always at least 1; construct through [`MinShared::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MinShared(usize);

impl MinShared {
    /// The threshold used by graph building and analytics.
    pub const DEFAULT: Self = Self(2);

    /// Validates a threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMinShared`] for zero or negative values.
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::MinShared;
    ///
    /// assert_eq!(MinShared::new(3).unwrap().get(), 3);
    /// assert!(MinShared::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, EngineError> {
        usize::try_from(value)
            .ok()
            .filter(|&v| v > 0)
            .map(Self)
            .ok_or(EngineError::InvalidMinShared(value))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MinShared {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for MinShared {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinShared> for i64 {
    fn from(value: MinShared) -> Self {
        value.0 as i64
    }
}

/// Two notes related through their shared keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMatch {
    pub note_a: NoteId,
    pub note_b: NoteId,
    /// Shared keywords, in `note_a`'s keyword order.
    pub shared_keywords: Vec<String>,
}

impl RelationshipMatch {
    pub fn weight(&self) -> usize {
        self.shared_keywords.len()
    }

    /// Direction-independent key for the pair.
    pub fn pair_key(&self) -> String {
        pair_key(self.note_a, self.note_b)
    }
}

/// Canonical key for an unordered note pair: the smaller id, `-`, the larger.
///
/// # Examples
///
/// ```
/// use notegraph::{NoteId, relations::pair_key};
///
/// assert_eq!(pair_key(NoteId::new(9), NoteId::new(3)), "3-9");
/// assert_eq!(pair_key(NoteId::new(3), NoteId::new(9)), "3-9");
/// ```
pub fn pair_key(a: NoteId, b: NoteId) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{low}-{high}")
}

/// Keywords present in both notes, in `a`'s order, without duplicates.
pub fn shared_keywords(a: &Note, b: &Note) -> Vec<String> {
    let theirs: HashSet<&str> = b.keywords().iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    a.keywords()
        .iter()
        .filter(|keyword| theirs.contains(keyword.as_str()) && seen.insert(keyword.as_str()))
        .cloned()
        .collect()
}

/// Resolves every note related to `note`, as match records.
///
/// Notes without keywords never match, either as source or candidate.
/// The note itself (by id) is skipped. Results are ordered by descending
/// shared count; equal counts keep input order.
pub fn find_matches(note: &Note, all_notes: &[Note], min_shared: MinShared) -> Vec<RelationshipMatch> {
    if !note.has_keywords() {
        return Vec::new();
    }

    let mut matches: Vec<RelationshipMatch> = all_notes
        .iter()
        .filter(|other| other.id() != note.id() && other.has_keywords())
        .filter_map(|other| {
            let shared = shared_keywords(note, other);
            (shared.len() >= min_shared.get()).then(|| RelationshipMatch {
                note_a: note.id(),
                note_b: other.id(),
                shared_keywords: shared,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.weight().cmp(&a.weight()));
    matches
}

/// Returns the notes related to `note`, most shared keywords first.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMinShared`] when `min_shared` is zero or
/// negative.
///
/// # Examples
///
/// ```
/// use notegraph::{NoteBuilder, NoteId, find_related};
///
/// # fn main() -> Result<(), notegraph::EngineError> {
/// let notes = vec![
///     NoteBuilder::new().id(NoteId::new(1)).keywords(["rust", "memory", "safety"]).build(),
///     NoteBuilder::new().id(NoteId::new(2)).keywords(["rust", "safety"]).build(),
///     NoteBuilder::new().id(NoteId::new(3)).keywords(["go"]).build(),
/// ];
///
/// let related = find_related(&notes[0], &notes, 2)?;
/// assert_eq!(related.len(), 1);
/// assert_eq!(related[0].id(), NoteId::new(2));
///
/// assert!(find_related(&notes[0], &notes, 0).is_err());
/// # Ok(())
/// # }
/// ```
pub fn find_related<'n>(
    note: &Note,
    all_notes: &'n [Note],
    min_shared: i64,
) -> Result<Vec<&'n Note>, EngineError> {
    let min_shared = MinShared::new(min_shared)?;
    Ok(find_related_with(note, all_notes, min_shared))
}

/// [`find_related`] with an already validated threshold.
pub fn find_related_with<'n>(note: &Note, all_notes: &'n [Note], min_shared: MinShared) -> Vec<&'n Note> {
    if !note.has_keywords() {
        return Vec::new();
    }

    let mut related: Vec<(&Note, usize)> = all_notes
        .iter()
        .filter(|other| other.id() != note.id() && other.has_keywords())
        .map(|other| (other, shared_keywords(note, other).len()))
        .filter(|&(_, shared)| shared >= min_shared.get())
        .collect();

    related.sort_by(|a, b| b.1.cmp(&a.1));
    related.into_iter().map(|(other, _)| other).collect()
}

/// Number of other notes related to `note`.
pub fn connection_count(note: &Note, all_notes: &[Note], min_shared: MinShared) -> usize {
    if !note.has_keywords() {
        return 0;
    }

    all_notes
        .iter()
        .filter(|other| other.id() != note.id() && other.has_keywords())
        .filter(|other| shared_keywords(note, other).len() >= min_shared.get())
        .count()
}
