use super::*;
use crate::EngineConfig;

fn service() -> NoteService {
    let db = Database::in_memory().expect("failed to create in-memory database");
    NoteService::new(db)
}

#[test]
fn note_service_construction_with_in_memory_database() {
    let service = service();

    // Verify we can access the underlying database
    let count: i64 = service
        .database()
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
            [],
            |row| row.get(0),
        )
        .expect("failed to query schema");

    assert!(
        count >= 4,
        "expected at least 4 tables (notes, tags, note_tags, note_keywords)"
    );
}

#[test]
fn list_notes_options_default_implementation() {
    let options = ListNotesOptions::default();

    assert_eq!(options.limit, None, "default limit should be None");
    assert_eq!(options.order, SortOrder::Descending);

    let with_limit = ListNotesOptions {
        limit: Some(10),
        ..Default::default()
    };
    assert_eq!(with_limit.limit, Some(10));
}

// --- CRUD ---

#[test]
fn create_note_returns_note_with_valid_id() {
    let service = service();

    let note = service
        .create_note("Title", Content::detect("plain body"), None)
        .expect("failed to create note");

    assert!(note.id().get() > 0, "note ID should be positive");
    assert_eq!(note.title(), "Title");
    assert_eq!(note.body().format(), ContentFormat::Plain);
    assert!(note.tags().is_empty());
    assert!(note.keywords().is_empty());
}

#[test]
fn create_note_normalizes_and_orders_tags() {
    let service = service();

    let note = service
        .create_note(
            "Tagged",
            Content::detect("body"),
            Some(&["Rust", "Machine Learning", "rust", "!!!"]),
        )
        .expect("failed to create note");

    assert_eq!(note.tags(), &["rust", "machine-learning"]);

    let loaded = service.get_note(note.id()).unwrap().unwrap();
    assert_eq!(loaded.tags(), &["rust", "machine-learning"]);
}

#[test]
fn create_note_reuses_existing_tags() {
    let service = service();

    service
        .create_note("one", Content::detect(""), Some(&["shared"]))
        .unwrap();
    service
        .create_note("two", Content::detect(""), Some(&["Shared"]))
        .unwrap();

    let tag_count: i64 = service
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tag_count, 1);
}

#[test]
fn get_note_round_trips_markup_body() {
    let service = service();

    let created = service
        .create_note("Markup", Content::detect("<h1>Heading</h1><p>text</p>"), None)
        .unwrap();

    let loaded = service
        .get_note(created.id())
        .expect("failed to get note")
        .expect("note should exist");

    assert_eq!(loaded, created);
    assert_eq!(loaded.body().format(), ContentFormat::Markup);
}

#[test]
fn get_note_returns_none_for_missing_id() {
    let service = service();

    let result = service.get_note(NoteId::new(999)).unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_note_removes_note_and_keywords() {
    let service = service();
    let note = service
        .create_note("gone", Content::detect(""), Some(&["tag"]))
        .unwrap();
    service
        .update_keywords(note.id(), &["alpha".to_string()])
        .unwrap();

    service.delete_note(note.id()).unwrap();

    assert!(service.get_note(note.id()).unwrap().is_none());
    let keyword_rows: i64 = service
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM note_keywords", [], |row| row.get(0))
        .unwrap();
    assert_eq!(keyword_rows, 0);
}

#[test]
fn delete_missing_note_is_not_an_error() {
    let service = service();
    assert!(service.delete_note(NoteId::new(42)).is_ok());
}

#[test]
fn list_notes_respects_order_and_limit() {
    let service = service();
    let first = service.create_note("first", Content::detect(""), None).unwrap();
    let second = service.create_note("second", Content::detect(""), None).unwrap();
    let third = service.create_note("third", Content::detect(""), None).unwrap();

    let ascending = service
        .list_notes(ListNotesOptions {
            limit: None,
            order: SortOrder::Ascending,
        })
        .unwrap();
    let ids: Vec<NoteId> = ascending.iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);

    let newest = service
        .list_notes(ListNotesOptions {
            limit: Some(2),
            order: SortOrder::Descending,
        })
        .unwrap();
    let ids: Vec<NoteId> = newest.iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec![third.id(), second.id()]);
}

// --- Keywords ---

#[test]
fn update_keywords_replaces_in_order() {
    let service = service();
    let note = service.create_note("n", Content::detect(""), None).unwrap();

    service
        .update_keywords(note.id(), &["beta".to_string(), "alpha".to_string()])
        .unwrap();
    service
        .update_keywords(note.id(), &["gamma".to_string(), "beta".to_string()])
        .unwrap();

    let loaded = service.get_note(note.id()).unwrap().unwrap();
    assert_eq!(loaded.keywords(), &["gamma", "beta"]);
}

#[test]
fn update_keywords_keeps_at_most_ten() {
    let service = service();
    let note = service.create_note("n", Content::detect(""), None).unwrap();
    let keywords: Vec<String> = (0..15).map(|i| format!("word{i:02}")).collect();

    service.update_keywords(note.id(), &keywords).unwrap();

    let loaded = service.get_note(note.id()).unwrap().unwrap();
    assert_eq!(loaded.keywords().len(), MAX_KEYWORDS);
    assert_eq!(loaded.keywords()[0], "word00");
}

#[test]
fn update_keywords_fails_for_missing_note() {
    let service = service();

    let err = service
        .update_keywords(NoteId::new(7), &["alpha".to_string()])
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn refresh_keywords_only_rewrites_changed_notes() {
    let service = service();
    let engine = KnowledgeEngine::default();
    let rust = service
        .create_note("Rust Ownership", Content::detect("rust memory safety ownership"), None)
        .unwrap();
    service
        .create_note("Go Concurrency", Content::detect("goroutines channels concurrency"), None)
        .unwrap();

    let first_pass = service.refresh_keywords(&engine).unwrap();
    let second_pass = service.refresh_keywords(&engine).unwrap();

    assert_eq!(first_pass, 2);
    assert_eq!(second_pass, 0);

    let loaded = service.get_note(rust.id()).unwrap().unwrap();
    assert_eq!(loaded.keywords()[0], "rust");
    assert!(loaded.keywords().contains(&"ownership".to_string()));
}

#[test]
fn refresh_keywords_leaves_empty_notes_without_keywords() {
    let service = service();
    let engine = KnowledgeEngine::default();
    let empty = service.create_note("", Content::detect(""), None).unwrap();

    let updated = service.refresh_keywords(&engine).unwrap();

    assert_eq!(updated, 0);
    assert!(service.get_note(empty.id()).unwrap().unwrap().keywords().is_empty());
}

// --- NoteStore ---

#[test]
fn snapshot_feeds_the_engine() {
    // Arrange
    let service = service();
    let engine = KnowledgeEngine::new(EngineConfig::default());
    service
        .create_note("Rust Ownership", Content::detect("rust memory safety ownership"), None)
        .unwrap();
    service
        .create_note("Go Concurrency", Content::detect("goroutines channels concurrency"), None)
        .unwrap();
    service
        .create_note("Memory Safety Rust", Content::detect("rust borrow checker safety"), None)
        .unwrap();
    service.refresh_keywords(&engine).unwrap();

    // Act
    let notes = NoteStore::snapshot(&service).unwrap();
    let graph = engine.graph(&notes);

    // Assert
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].title(), "Rust Ownership");
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.degree(notes[1].id()), 0);
}

#[test]
fn store_trait_is_object_safe() {
    let service = service();
    let note = service.create_note("n", Content::detect(""), None).unwrap();
    let store: &dyn NoteStore = &service;

    store
        .update_keywords(note.id(), &["alpha".to_string()])
        .unwrap();

    assert_eq!(store.snapshot().unwrap()[0].keywords(), &["alpha"]);
}
