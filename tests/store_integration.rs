//! File-backed store tests: notes written through `NoteService`, keywords
//! refreshed, and the graph rebuilt from a fresh snapshot after reopening.

use anyhow::Result;
use notegraph::{Content, Database, KnowledgeEngine, NoteId, NoteService, NoteStore};
use tempfile::tempdir;

fn seed(service: &NoteService) -> Result<Vec<NoteId>> {
    let notes = [
        ("Rust Ownership", "rust memory safety ownership", vec!["rust"]),
        ("Go Concurrency", "goroutines channels concurrency", vec!["go"]),
        (
            "Memory Safety Rust",
            "<h1>Borrow Checker</h1><p>rust safety</p>",
            vec!["rust", "safety"],
        ),
    ];

    let mut ids = Vec::new();
    for (title, body, tags) in notes {
        let note = service.create_note(title, Content::detect(body), Some(&tags))?;
        ids.push(note.id());
    }
    Ok(ids)
}

#[test]
fn test_keywords_survive_reopen() -> Result<()> {
    // Arrange
    let dir = tempdir()?;
    let db_path = dir.path().join("notes.db");
    let engine = KnowledgeEngine::default();

    let ids = {
        let service = NoteService::new(Database::open(&db_path)?);
        let ids = seed(&service)?;
        assert_eq!(service.refresh_keywords(&engine)?, 3);
        ids
    };

    // Act
    let service = NoteService::new(Database::open(&db_path)?);
    let notes = service.snapshot()?;

    // Assert
    assert_eq!(notes.len(), 3);
    assert!(notes.iter().all(|note| note.has_keywords()));
    let markup_note = service.get_note(ids[2])?.expect("note should exist");
    assert_eq!(markup_note.keywords()[0], "borrow");
    Ok(())
}

#[test]
fn test_graph_from_stored_snapshot() -> Result<()> {
    // Arrange
    let dir = tempdir()?;
    let service = NoteService::new(Database::open(dir.path().join("notes.db"))?);
    let engine = KnowledgeEngine::default();
    let ids = seed(&service)?;
    service.refresh_keywords(&engine)?;

    // Act
    let notes = service.snapshot()?;
    let graph = engine.graph(&notes);
    let analytics = engine.analytics(&notes);

    // Assert
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.neighbors(ids[0]), vec![ids[2]]);
    assert_eq!(graph.degree(ids[1]), 0);
    assert_eq!(analytics.tag_distribution[0].tag, "rust");
    assert_eq!(analytics.tag_distribution[0].count, 2);
    Ok(())
}

#[test]
fn test_snapshot_without_refresh_has_no_edges() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);
    seed(&service)?;

    let notes = service.snapshot()?;
    let graph = KnowledgeEngine::default().graph(&notes);

    // Keywords are derived data; nothing relates until they are stored
    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.edges.is_empty());
    Ok(())
}

#[test]
fn test_run_does_not_write_back() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);
    seed(&service)?;

    let output = KnowledgeEngine::default().run(&service.snapshot()?);

    assert_eq!(output.graph.edges.len(), 1);
    assert!(service.snapshot()?.iter().all(|note| !note.has_keywords()));
    Ok(())
}

#[test]
fn test_deleted_note_leaves_graph() -> Result<()> {
    let service = NoteService::new(Database::in_memory()?);
    let engine = KnowledgeEngine::default();
    let ids = seed(&service)?;
    service.refresh_keywords(&engine)?;

    service.delete_note(ids[2])?;
    let graph = engine.graph(&service.snapshot()?);

    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.edges.is_empty());
    Ok(())
}
