use thiserror::Error;

use crate::models::NoteId;

/// Errors raised by the knowledge graph engine.
///
/// The engine degrades gracefully on bad note content; these variants cover
/// caller mistakes that would otherwise yield meaningless results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A relationship threshold of zero or less would relate every pair of notes.
    #[error("minimum shared keywords must be at least 1, got {0}")]
    InvalidMinShared(i64),

    /// A configuration value parsed but is out of range.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    /// The requested note is not part of the snapshot.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
}
