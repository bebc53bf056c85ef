use crate::keywords::MAX_KEYWORDS;
use crate::store::NoteStore;
use crate::text::normalize_tags;
use crate::{Content, ContentFormat, Database, KnowledgeEngine, Note, NoteBuilder, NoteId, TagId};
use anyhow::{Context, Result, anyhow, bail};
use rusqlite::OptionalExtension;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Service layer providing note management operations.
///
/// NoteService owns a Database instance and implements [`NoteStore`], the
/// collaborator interface the relationship engine is driven through. It
/// also writes extracted keywords back, which the engine never does itself.
///
/// # Examples
///
/// ```
/// use notegraph::{Database, NoteService};
///
/// # fn main() -> anyhow::Result<()> {
/// let db = Database::in_memory()?;
/// let service = NoteService::new(db);
/// # Ok(())
/// # }
/// ```
pub struct NoteService {
    db: Database,
}

impl NoteService {
    /// Creates a new NoteService with the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns a reference to the underlying database.
    ///
    /// Useful for testing or advanced operations that need direct database access.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates a new note with the given title, body and optional tags.
    ///
    /// Tags are normalized and deduplicated, keeping their order. The note
    /// starts without keywords; see [`NoteService::refresh_keywords`].
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::{Content, Database, NoteService};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let service = NoteService::new(Database::in_memory()?);
    ///
    /// let note = service.create_note("Ideas", Content::detect("<h1>Graph</h1>"), Some(&["Research"]))?;
    /// assert!(note.id().get() > 0);
    /// assert_eq!(note.tags(), &["research"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_note(&self, title: &str, body: Content, tags: Option<&[&str]>) -> Result<Note> {
        let conn = self.db.connection();
        let now = OffsetDateTime::now_utc().unix_timestamp();

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: Result<Note> = (|| {
            conn.execute(
                "INSERT INTO notes (title, body, body_format, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (
                    title,
                    body.as_str(),
                    body.format().to_string(),
                    now,
                    now,
                ),
            )?;
            let note_id = conn.last_insert_rowid();

            let tag_names = normalize_tags(tags.unwrap_or_default());
            for (position, tag_name) in tag_names.iter().enumerate() {
                let tag_id = self.get_or_create_tag(tag_name)?;
                conn.execute(
                    "INSERT INTO note_tags (note_id, tag_id, position) VALUES (?1, ?2, ?3)",
                    (note_id, tag_id.get(), position as i64),
                )?;
            }

            let timestamp = OffsetDateTime::from_unix_timestamp(now)?;
            Ok(NoteBuilder::new()
                .id(NoteId::new(note_id))
                .title(title)
                .content(body.clone())
                .tags(tag_names)
                .created_at(timestamp)
                .updated_at(timestamp)
                .build())
        })();

        match result {
            Ok(note) => {
                conn.execute("COMMIT", [])?;
                debug!(note_id = %note.id(), "created note");
                Ok(note)
            }
            Err(e) => {
                conn.execute("ROLLBACK", []).ok();
                Err(e)
            }
        }
    }

    /// Retrieves a note by its ID, with tags and keywords in stored order.
    ///
    /// Returns `None` if no note exists with the given ID.
    pub fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT title, body, body_format, created_at, updated_at FROM notes WHERE id = ?1",
                [id.get()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((title, body, format, created_at, updated_at)) = row else {
            return Ok(None);
        };

        let format: ContentFormat = format
            .parse()
            .map_err(|e: String| anyhow!(e))
            .with_context(|| format!("note {id} has an invalid body format"))?;

        let note = NoteBuilder::new()
            .id(id)
            .title(title)
            .content(Content::from_parts(format, body))
            .tags(self.load_column(
                "SELECT t.name FROM note_tags nt JOIN tags t ON nt.tag_id = t.id
                 WHERE nt.note_id = ?1 ORDER BY nt.position",
                id,
            )?)
            .keywords(self.load_column(
                "SELECT keyword FROM note_keywords WHERE note_id = ?1 ORDER BY position",
                id,
            )?)
            .created_at(OffsetDateTime::from_unix_timestamp(created_at)?)
            .updated_at(OffsetDateTime::from_unix_timestamp(updated_at)?)
            .build();

        Ok(Some(note))
    }

    fn load_column(&self, query: &str, id: NoteId) -> Result<Vec<String>> {
        let mut stmt = self.db.connection().prepare(query)?;
        let rows = stmt.query_map([id.get()], |row| row.get::<_, String>(0))?;

        let mut values = Vec::new();
        for row_result in rows {
            values.push(row_result?);
        }
        Ok(values)
    }

    /// Deletes a note by its ID. Tags links and keywords cascade.
    ///
    /// Deleting a note that does not exist is not an error.
    pub fn delete_note(&self, id: NoteId) -> Result<()> {
        self.db
            .connection()
            .execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;
        Ok(())
    }

    /// Gets or creates a tag by name.
    ///
    /// Names are compared case-insensitively.
    pub fn get_or_create_tag(&self, name: &str) -> Result<TagId> {
        let conn = self.db.connection();

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM tags WHERE name = ?1 COLLATE NOCASE",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(TagId::new(id));
        }

        conn.execute("INSERT INTO tags (name) VALUES (?1)", [name])?;
        Ok(TagId::new(conn.last_insert_rowid()))
    }

    /// Lists notes, ordered by creation time.
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::{Content, Database, ListNotesOptions, NoteService, SortOrder};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let service = NoteService::new(Database::in_memory()?);
    /// service.create_note("first", Content::detect(""), None)?;
    /// service.create_note("second", Content::detect(""), None)?;
    ///
    /// let notes = service.list_notes(ListNotesOptions {
    ///     limit: Some(1),
    ///     order: SortOrder::Ascending,
    /// })?;
    /// assert_eq!(notes[0].title(), "first");
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_notes(&self, options: ListNotesOptions) -> Result<Vec<Note>> {
        let conn = self.db.connection();

        let order_clause = match options.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let query = match options.limit {
            Some(limit) => format!(
                "SELECT id FROM notes ORDER BY created_at {order_clause}, id {order_clause} LIMIT {limit}"
            ),
            None => format!("SELECT id FROM notes ORDER BY created_at {order_clause}, id {order_clause}"),
        };

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut ids = Vec::new();
        for row_result in rows {
            ids.push(row_result?);
        }

        let mut notes = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(note) = self.get_note(NoteId::new(id))? {
                notes.push(note);
            }
        }

        Ok(notes)
    }

    /// Replaces a note's keywords, keeping at most [`MAX_KEYWORDS`] in order.
    ///
    /// # Errors
    ///
    /// Fails if the note does not exist.
    pub fn update_keywords(&self, id: NoteId, keywords: &[String]) -> Result<()> {
        let conn = self.db.connection();

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?1)",
            [id.get()],
            |row| row.get(0),
        )?;
        if !exists {
            bail!("Note {id} not found");
        }

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: Result<()> = (|| {
            conn.execute("DELETE FROM note_keywords WHERE note_id = ?1", [id.get()])?;
            for (position, keyword) in keywords.iter().take(MAX_KEYWORDS).enumerate() {
                conn.execute(
                    "INSERT INTO note_keywords (note_id, position, keyword) VALUES (?1, ?2, ?3)",
                    (id.get(), position as i64, keyword),
                )?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                conn.execute("ROLLBACK", []).ok();
                Err(e)
            }
        }
    }

    /// Re-extracts keywords for every note and stores those that changed.
    ///
    /// Returns the number of notes whose keywords were rewritten.
    pub fn refresh_keywords(&self, engine: &KnowledgeEngine<'_>) -> Result<usize> {
        let notes = self.snapshot()?;

        let mut updated = 0;
        for note in &notes {
            let keywords = engine.extract_keywords(note);
            if keywords != note.keywords() {
                self.update_keywords(note.id(), &keywords)
                    .with_context(|| format!("Failed to store keywords for note {}", note.id()))?;
                updated += 1;
            }
        }

        info!(notes = notes.len(), updated, "refreshed keywords");
        Ok(updated)
    }
}

impl NoteStore for NoteService {
    fn snapshot(&self) -> Result<Vec<Note>> {
        self.list_notes(ListNotesOptions {
            limit: None,
            order: SortOrder::Ascending,
        })
    }

    fn update_keywords(&self, id: NoteId, keywords: &[String]) -> Result<()> {
        NoteService::update_keywords(self, id, keywords)
    }
}

/// Sort order for listing notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest notes first (ascending by creation time)
    Ascending,
    /// Newest notes first (descending by creation time)
    #[default]
    Descending,
}

/// Options for listing notes.
///
/// # Examples
///
/// ```
/// use notegraph::ListNotesOptions;
///
/// // No limit, newest first
/// let options = ListNotesOptions::default();
///
/// // Limit to 10 most recent notes
/// let options = ListNotesOptions {
///     limit: Some(10),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListNotesOptions {
    /// Maximum number of notes to return. None means no limit.
    pub limit: Option<usize>,

    /// Sort order for notes. Defaults to Descending (newest first).
    pub order: SortOrder,
}

#[cfg(test)]
#[path = "service/tests.rs"]
mod tests;
