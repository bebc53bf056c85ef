use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Content, NoteId};
use crate::keywords::MAX_KEYWORDS;

/// A note as seen by the knowledge graph engine.
///
/// Notes are owned by the store. The engine reads `title`, `body` and
/// `keywords`; `keywords` is derived data that the caller writes back after
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NoteRecord")]
pub struct Note {
    id: NoteId,
    title: String,
    body: Content,
    tags: Vec<String>,
    keywords: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

/// Wire shape of a [`Note`]; converting it applies the keyword cap.
#[derive(Deserialize)]
struct NoteRecord {
    id: NoteId,
    title: String,
    body: Content,
    tags: Vec<String>,
    keywords: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        let mut keywords = record.keywords;
        keywords.truncate(MAX_KEYWORDS);

        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            tags: record.tags,
            keywords,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Note {
    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &Content {
        &self.body
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Derived keywords, most important first.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Replaces the keyword list, keeping at most [`MAX_KEYWORDS`] entries.
    pub fn set_keywords(&mut self, mut keywords: Vec<String>) {
        keywords.truncate(MAX_KEYWORDS);
        self.keywords = keywords;
    }
}

/// Builder for constructing `Note` instances with optional fields.
///
/// # Examples
///
/// ```
/// use notegraph::{NoteBuilder, NoteId};
///
/// let note = NoteBuilder::new()
///     .id(NoteId::new(1))
///     .title("Rust Ownership")
///     .body("rust memory safety ownership")
///     .build();
///
/// assert_eq!(note.id(), NoteId::new(1));
/// assert_eq!(note.title(), "Rust Ownership");
/// assert!(note.keywords().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct NoteBuilder {
    id: Option<NoteId>,
    title: Option<String>,
    body: Option<Content>,
    tags: Option<Vec<String>>,
    keywords: Option<Vec<String>>,
    created_at: Option<OffsetDateTime>,
    updated_at: Option<OffsetDateTime>,
}

impl NoteBuilder {
    /// Creates a new `NoteBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note ID.
    pub fn id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body from raw editor text, classifying it with [`Content::detect`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Content::detect(body));
        self
    }

    /// Sets the body with an explicit format.
    pub fn content(mut self, content: Content) -> Self {
        self.body = Some(content);
        self
    }

    /// Sets the tag labels.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets previously extracted keywords.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the created timestamp.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the updated timestamp.
    pub fn updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the `Note`, using defaults for optional fields.
    ///
    /// Keywords beyond [`MAX_KEYWORDS`] are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `id` has not been set.
    pub fn build(self) -> Note {
        let now = OffsetDateTime::now_utc();
        let mut keywords = self.keywords.unwrap_or_default();
        keywords.truncate(MAX_KEYWORDS);

        Note {
            id: self.id.expect("id is required"),
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            keywords,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}
