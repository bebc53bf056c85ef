//! Corpus-level analytics over the keyword relationship network.
//!
//! Connection counts are computed in their own O(n² · k) pass instead of
//! being read off a [`crate::graph::Graph`]: degree must count a relation
//! from both sides, while the graph records each pair once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::frequency::FrequencyTable;
use crate::keywords::{KeywordExtractor, WordCount};
use crate::models::{Note, NoteId};
use crate::relations::connection_count;
use crate::text::StopWords;

/// A note and how many other notes it is related to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedNote {
    pub id: NoteId,
    pub title: String,
    pub connections: usize,
}

/// A tag and how many notes carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Summary metrics for analytics panels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAnalytics {
    /// Most used tags, descending.
    pub tag_distribution: Vec<TagCount>,
    /// Every note with its connection count, in input order.
    pub connection_counts: Vec<ConnectedNote>,
    /// Best connected notes, connection count above zero only.
    pub most_connected: Vec<ConnectedNote>,
    /// Notes at or above the hub threshold, descending.
    pub hub_notes: Vec<ConnectedNote>,
    /// Notes with no qualifying relation, including notes without keywords.
    pub isolated_notes: Vec<ConnectedNote>,
    /// Most frequent words across titles and bodies.
    pub word_frequency: Vec<WordCount>,
}

impl NetworkAnalytics {
    /// Connection count of a note, if it was part of the snapshot.
    pub fn connections_of(&self, id: NoteId) -> Option<usize> {
        self.connection_counts
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.connections)
    }
}

/// Computes analytics with default thresholds and the English stop words.
pub fn compute_analytics(notes: &[Note]) -> NetworkAnalytics {
    compute_analytics_with(notes, &EngineConfig::default(), StopWords::english())
}

/// Computes analytics with explicit thresholds and stop words.
///
/// Sorted lists are stable: notes with equal counts keep input order.
pub fn compute_analytics_with(
    notes: &[Note],
    config: &EngineConfig,
    stop_words: &StopWords,
) -> NetworkAnalytics {
    let connection_counts: Vec<ConnectedNote> = notes
        .iter()
        .map(|note| ConnectedNote {
            id: note.id(),
            title: note.title().to_string(),
            connections: connection_count(note, notes, config.min_shared),
        })
        .collect();

    let mut ranked = connection_counts.clone();
    ranked.sort_by(|a, b| b.connections.cmp(&a.connections));

    let most_connected: Vec<ConnectedNote> = ranked
        .iter()
        .filter(|entry| entry.connections > 0)
        .take(config.most_connected_limit)
        .cloned()
        .collect();

    let hub_notes: Vec<ConnectedNote> = ranked
        .iter()
        .filter(|entry| entry.connections >= config.hub_threshold.get())
        .cloned()
        .collect();

    let isolated_notes: Vec<ConnectedNote> = connection_counts
        .iter()
        .filter(|entry| entry.connections == 0)
        .cloned()
        .collect();

    let analytics = NetworkAnalytics {
        tag_distribution: tag_distribution(notes, config.top_tags),
        word_frequency: KeywordExtractor::new(stop_words).word_frequency(notes, config.top_words),
        connection_counts,
        most_connected,
        hub_notes,
        isolated_notes,
    };

    debug!(
        notes = notes.len(),
        hubs = analytics.hub_notes.len(),
        isolated = analytics.isolated_notes.len(),
        "computed network analytics"
    );
    analytics
}

/// Counts tag usage across notes and returns the `limit` most used.
pub fn tag_distribution(notes: &[Note], limit: usize) -> Vec<TagCount> {
    let mut table = FrequencyTable::new();
    for note in notes {
        table.add_all(note.tags(), 1);
    }

    table
        .top(limit)
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect()
}
