//! Keyword extraction, relationship resolution, graph building and network
//! analytics over a collection of notes.
//!
//! The engine itself ([`KnowledgeEngine`]) works on in-memory note
//! snapshots. Persistence lives behind [`NoteStore`], implemented by
//! [`NoteService`] over SQLite.

pub mod analytics;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod graph;
pub mod keywords;
pub mod models;
pub mod relations;
pub mod service;
pub mod store;
pub mod text;
pub mod utils;

pub use analytics::{ConnectedNote, NetworkAnalytics, TagCount, compute_analytics};
pub use config::{EngineConfig, HubThreshold};
pub use db::Database;
pub use engine::{KnowledgeEngine, PipelineOutput};
pub use error::EngineError;
pub use graph::{Graph, GraphEdge, GraphNode, build_graph};
pub use keywords::{KeywordExtractor, MAX_KEYWORDS, WordCount, extract_note_keywords};
pub use models::{Content, ContentFormat, Note, NoteBuilder, NoteId, TagId};
pub use relations::{MinShared, RelationshipMatch, find_related};
pub use service::{ListNotesOptions, NoteService, SortOrder};
pub use store::NoteStore;
pub use text::StopWords;
