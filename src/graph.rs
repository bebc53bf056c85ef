//! Keyword similarity graph over a note snapshot.
//!
//! Every note becomes a node, even without keywords, so isolated notes stay
//! visible. Each related pair becomes one undirected edge stored as a single
//! `source -> target` record, where the source is the note processed first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Note, NoteId};
use crate::relations::{MinShared, find_matches};

/// Label given to nodes whose note has no title.
pub const UNTITLED_LABEL: &str = "Untitled";

/// A note in the graph. Carries only identity and label-sized data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub label: String,
    pub tags: Vec<String>,
    pub keyword_count: usize,
}

impl GraphNode {
    fn from_note(note: &Note) -> Self {
        let title = note.title().trim();
        Self {
            id: note.id(),
            label: if title.is_empty() {
                UNTITLED_LABEL.to_string()
            } else {
                title.to_string()
            },
            tags: note.tags().to_vec(),
            keyword_count: note.keywords().len(),
        }
    }
}

/// Relationship between two notes, weighted by shared keyword count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Canonical pair key, see [`crate::relations::pair_key`].
    pub id: String,
    pub source: NoteId,
    pub target: NoteId,
    pub weight: usize,
    pub shared_keywords: Vec<String>,
}

impl GraphEdge {
    pub fn touches(&self, id: NoteId) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite `id`, if the edge touches it.
    pub fn other(&self, id: NoteId) -> Option<NoteId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}

/// Simple undirected graph: one node per note, at most one edge per pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: NoteId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges incident to `id`.
    pub fn edges_of(&self, id: NoteId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.touches(id))
    }

    /// Notes adjacent to `id`, in edge order.
    pub fn neighbors(&self, id: NoteId) -> Vec<NoteId> {
        self.edges_of(id).filter_map(|edge| edge.other(id)).collect()
    }

    pub fn degree(&self, id: NoteId) -> usize {
        self.edges_of(id).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the graph with the default threshold of two shared keywords.
pub fn build_graph(notes: &[Note]) -> Graph {
    build_graph_with(notes, MinShared::DEFAULT)
}

/// Builds the graph, relating notes that share at least `min_shared` keywords.
///
/// # Algorithm
///
/// 1. One node per note, in input order
/// 2. For each note with keywords, resolve its matches against all notes
/// 3. Skip a match whose canonical pair key was already recorded
/// 4. Emit one edge per new key, weighted by the shared keyword count
///
/// Deterministic: the same input always yields the same nodes and edges in
/// the same order.
pub fn build_graph_with(notes: &[Note], min_shared: MinShared) -> Graph {
    let nodes: Vec<GraphNode> = notes.iter().map(GraphNode::from_note).collect();

    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for note in notes.iter().filter(|note| note.has_keywords()) {
        for found in find_matches(note, notes, min_shared) {
            let key = found.pair_key();
            if !seen.insert(key.clone()) {
                continue;
            }
            edges.push(GraphEdge {
                id: key,
                source: found.note_a,
                target: found.note_b,
                weight: found.weight(),
                shared_keywords: found.shared_keywords,
            });
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        min_shared = min_shared.get(),
        "built note graph"
    );
    Graph { nodes, edges }
}
