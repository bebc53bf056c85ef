//! Full keyword → relationship → graph → analytics pipeline.
//!
//! The engine holds no state besides its configuration and a borrowed
//! stop-word set. Each call recomputes from the snapshot it is given; there
//! is no incremental path.

use serde::Serialize;
use tracing::info;

use crate::analytics::{NetworkAnalytics, compute_analytics_with};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::graph::{Graph, build_graph_with};
use crate::keywords::KeywordExtractor;
use crate::models::{Note, NoteId};
use crate::relations::find_related_with;
use crate::text::StopWords;

/// Everything derived from one note snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Fresh keywords per note, in snapshot order.
    pub keywords: Vec<(NoteId, Vec<String>)>,
    pub graph: Graph,
    pub analytics: NetworkAnalytics,
}

/// Runs the relationship pipeline against note snapshots.
///
/// # Examples
///
/// ```
/// use notegraph::{KnowledgeEngine, NoteBuilder, NoteId};
///
/// let engine = KnowledgeEngine::default();
/// let mut notes = vec![
///     NoteBuilder::new().id(NoteId::new(1)).title("Rust Ownership").body("rust memory safety ownership").build(),
///     NoteBuilder::new().id(NoteId::new(2)).title("Go Concurrency").body("goroutines channels concurrency").build(),
///     NoteBuilder::new().id(NoteId::new(3)).title("Memory Safety Rust").body("rust borrow checker safety").build(),
/// ];
///
/// engine.assign_keywords(&mut notes);
/// let graph = engine.graph(&notes);
///
/// assert_eq!(graph.nodes.len(), 3);
/// assert_eq!(graph.edges.len(), 1);
/// assert_eq!(graph.degree(NoteId::new(2)), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeEngine<'s> {
    stop_words: &'s StopWords,
    config: EngineConfig,
}

impl Default for KnowledgeEngine<'static> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl KnowledgeEngine<'static> {
    /// Creates an engine using the shared English stop words.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            stop_words: StopWords::english(),
            config,
        }
    }
}

impl<'s> KnowledgeEngine<'s> {
    /// Creates an engine with a caller-supplied stop-word set.
    pub fn with_stop_words(stop_words: &'s StopWords, config: EngineConfig) -> Self {
        Self { stop_words, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &'s StopWords {
        self.stop_words
    }

    pub fn extractor(&self) -> KeywordExtractor<'s> {
        KeywordExtractor::new(self.stop_words)
    }

    /// Extracts keywords for one note without modifying it.
    pub fn extract_keywords(&self, note: &Note) -> Vec<String> {
        self.extractor().extract(note)
    }

    /// Replaces the keywords of every note in an in-memory snapshot.
    ///
    /// Persisting them is up to the caller.
    pub fn assign_keywords(&self, notes: &mut [Note]) {
        let extractor = self.extractor();
        for note in notes.iter_mut() {
            let keywords = extractor.extract(note);
            note.set_keywords(keywords);
        }
    }

    /// Notes related to the note with `id`, using the configured threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoteNotFound`] when `id` is not in `notes`.
    pub fn related<'n>(&self, id: NoteId, notes: &'n [Note]) -> Result<Vec<&'n Note>, EngineError> {
        let note = notes
            .iter()
            .find(|note| note.id() == id)
            .ok_or(EngineError::NoteNotFound(id))?;
        Ok(find_related_with(note, notes, self.config.min_shared))
    }

    pub fn graph(&self, notes: &[Note]) -> Graph {
        build_graph_with(notes, self.config.min_shared)
    }

    pub fn analytics(&self, notes: &[Note]) -> NetworkAnalytics {
        compute_analytics_with(notes, &self.config, self.stop_words)
    }

    /// Extracts keywords for a copy of the snapshot, then builds the graph
    /// and analytics from it.
    pub fn run(&self, notes: &[Note]) -> PipelineOutput {
        let mut snapshot = notes.to_vec();
        self.assign_keywords(&mut snapshot);

        let output = PipelineOutput {
            keywords: snapshot
                .iter()
                .map(|note| (note.id(), note.keywords().to_vec()))
                .collect(),
            graph: self.graph(&snapshot),
            analytics: self.analytics(&snapshot),
        };

        info!(
            notes = snapshot.len(),
            edges = output.graph.edges.len(),
            hubs = output.analytics.hub_notes.len(),
            isolated = output.analytics.isolated_notes.len(),
            "recomputed knowledge graph"
        );
        output
    }
}
