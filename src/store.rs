use anyhow::Result;

use crate::models::{Note, NoteId};

/// What the relationship engine needs from note persistence.
///
/// The engine itself never calls this; callers read a snapshot, run the
/// pipeline, and decide whether to write keywords back.
pub trait NoteStore {
    /// All notes, in a stable order.
    fn snapshot(&self) -> Result<Vec<Note>>;

    /// Replaces the stored keywords of one note.
    fn update_keywords(&self, id: NoteId, keywords: &[String]) -> Result<()>;
}
