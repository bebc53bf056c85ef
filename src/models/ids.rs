use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a note.
///
/// Opaque to the graph engine: it is only compared, ordered (to build
/// canonical edge keys) and displayed. The store assigns it from its row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Creates a new note ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying ID value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row identifier for a tag in the note store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    /// Creates a new tag ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying ID value.
    pub fn get(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_serializes_as_raw_integer() {
        let id = NoteId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn note_ids_order_numerically() {
        let mut ids = vec![NoteId::new(10), NoteId::new(2), NoteId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![NoteId::new(2), NoteId::new(7), NoteId::new(10)]);
    }

    #[test]
    fn note_id_displays_inner_value() {
        assert_eq!(NoteId::new(-3).to_string(), "-3");
    }
}
