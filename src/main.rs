use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notegraph::relations::shared_keywords;
use notegraph::utils::{ensure_database_directory, get_database_path};
use notegraph::{
    Content, Database, EngineConfig, EngineError, KnowledgeEngine, ListNotesOptions, MinShared,
    NoteId, NoteService, NoteStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Errors caused by the command line input rather than by the system.
#[derive(Debug, thiserror::Error)]
enum UserError {
    #[error("Note title and body cannot be empty")]
    EmptyNote,

    #[error("Note {0} not found")]
    NoteNotFound(NoteId),
}

/// notegraph - keyword relationships and a knowledge graph over your notes
#[derive(Parser)]
#[command(name = "notegraph")]
#[command(about = "Relate notes by shared keywords and analyze the resulting graph")]
#[command(version)]
struct Cli {
    /// Path to the note database
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Add a new note and extract its keywords
    Add(AddCommand),
    /// List notes with their tags and keywords
    List(ListCommand),
    /// Delete a note
    Delete(DeleteCommand),
    /// Recompute keywords for every note
    Extract,
    /// Show notes related to a note
    Related(RelatedCommand),
    /// Print the knowledge graph as JSON
    Graph,
    /// Print network analytics as JSON
    Stats,
}

/// Add a new note
#[derive(Parser)]
struct AddCommand {
    /// The title of the note
    #[arg(value_name = "TITLE")]
    title: String,

    /// The body of the note, plain text or markup
    #[arg(short, long, value_name = "BODY", default_value = "")]
    body: String,

    /// Comma-separated tags to apply to the note
    #[arg(short, long, value_name = "TAGS")]
    tags: Option<String>,
}

/// List notes
#[derive(Parser)]
struct ListCommand {
    /// Maximum number of notes to show, newest first
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,
}

/// Delete a note
#[derive(Parser)]
struct DeleteCommand {
    /// ID of the note to delete
    #[arg(value_name = "ID")]
    id: i64,
}

/// Show related notes
#[derive(Parser)]
struct RelatedCommand {
    /// ID of the note to relate
    #[arg(value_name = "ID")]
    id: i64,

    /// Shared keywords required for a relation (overrides NOTEGRAPH_MIN_SHARED)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    min_shared: Option<i64>,
}

fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("NOTEGRAPH_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    let engine = KnowledgeEngine::new(config);

    // Validate before touching the database
    if let Commands::Add(cmd) = &cli.command {
        validate_add(cmd)?;
    }

    let db = open_database(cli.db.as_deref())?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Add(cmd) => execute_add(cmd, &engine, db, &mut out),
        Commands::List(cmd) => execute_list(cmd, db, &mut out),
        Commands::Delete(cmd) => execute_delete(NoteId::new(cmd.id), db, &mut out),
        Commands::Extract => execute_extract(&engine, db, &mut out),
        Commands::Related(cmd) => execute_related(cmd, &engine, db, &mut out),
        Commands::Graph => execute_graph(&engine, db, &mut out),
        Commands::Stats => execute_stats(&engine, db, &mut out),
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures like empty notes, unknown note
/// IDs and out-of-range thresholds. Internal errors include database
/// failures and I/O errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.downcast_ref::<UserError>().is_some() || cause.downcast_ref::<EngineError>().is_some()
    })
}

/// Opens the database at `path`, or at the default location.
fn open_database(path: Option<&std::path::Path>) -> Result<Database> {
    let db_path = match path {
        Some(path) => path.to_path_buf(),
        None => get_database_path()?,
    };
    ensure_database_directory(&db_path)?;

    Database::open(&db_path).context("Failed to open database")
}

fn validate_add(cmd: &AddCommand) -> Result<()> {
    if cmd.title.trim().is_empty() && cmd.body.trim().is_empty() {
        return Err(UserError::EmptyNote.into());
    }
    Ok(())
}

/// Creates the note, then extracts and stores its keywords.
///
/// Separated from argument handling to allow testing with in-memory databases.
fn execute_add(
    cmd: &AddCommand,
    engine: &KnowledgeEngine<'_>,
    db: Database,
    out: &mut impl Write,
) -> Result<()> {
    let service = NoteService::new(db);

    let parsed_tags = cmd.tags.as_deref().map(parse_tags).unwrap_or_default();
    let tag_refs: Vec<&str> = parsed_tags.iter().map(String::as_str).collect();

    let note = service
        .create_note(&cmd.title, Content::detect(cmd.body.as_str()), Some(&tag_refs))
        .context("Failed to create note")?;

    let keywords = engine.extract_keywords(&note);
    service
        .update_keywords(note.id(), &keywords)
        .context("Failed to store keywords")?;

    write!(out, "Note created (id: {})", note.id())?;
    if !note.tags().is_empty() {
        write!(out, " with tags: {}", note.tags().join(", "))?;
    }
    writeln!(out)?;
    if !keywords.is_empty() {
        writeln!(out, "Keywords: {}", keywords.join(", "))?;
    }

    Ok(())
}

fn execute_list(cmd: &ListCommand, db: Database, out: &mut impl Write) -> Result<()> {
    let service = NoteService::new(db);
    let notes = service
        .list_notes(ListNotesOptions {
            limit: cmd.limit,
            ..Default::default()
        })
        .context("Failed to list notes")?;

    if notes.is_empty() {
        writeln!(out, "No notes found")?;
        return Ok(());
    }

    for note in &notes {
        writeln!(out, "[{}] {}", note.id(), note.title())?;
        if !note.tags().is_empty() {
            writeln!(out, "    tags: {}", note.tags().join(", "))?;
        }
        if !note.keywords().is_empty() {
            writeln!(out, "    keywords: {}", note.keywords().join(", "))?;
        }
    }

    Ok(())
}

fn execute_delete(id: NoteId, db: Database, out: &mut impl Write) -> Result<()> {
    let service = NoteService::new(db);

    if service.get_note(id)?.is_none() {
        return Err(UserError::NoteNotFound(id).into());
    }
    service.delete_note(id).context("Failed to delete note")?;

    writeln!(out, "Note deleted (id: {id})")?;
    Ok(())
}

fn execute_extract(engine: &KnowledgeEngine<'_>, db: Database, out: &mut impl Write) -> Result<()> {
    let service = NoteService::new(db);
    let updated = service
        .refresh_keywords(engine)
        .context("Failed to refresh keywords")?;

    writeln!(out, "Keywords updated for {updated} note(s)")?;
    Ok(())
}

fn execute_related(
    cmd: &RelatedCommand,
    engine: &KnowledgeEngine<'_>,
    db: Database,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = *engine.config();
    if let Some(min_shared) = cmd.min_shared {
        config.min_shared = MinShared::new(min_shared)?;
    }
    let engine = KnowledgeEngine::with_stop_words(engine.stop_words(), config);

    let service = NoteService::new(db);
    let notes = service.snapshot().context("Failed to load notes")?;
    let id = NoteId::new(cmd.id);
    let related = engine.related(id, &notes)?;

    if related.is_empty() {
        writeln!(out, "No related notes")?;
        return Ok(());
    }

    // `related` succeeded, so the note is in the snapshot
    let Some(note) = notes.iter().find(|note| note.id() == id) else {
        return Ok(());
    };
    for other in related {
        writeln!(
            out,
            "[{}] {} (shared: {})",
            other.id(),
            other.title(),
            shared_keywords(note, other).join(", ")
        )?;
    }

    Ok(())
}

fn execute_graph(engine: &KnowledgeEngine<'_>, db: Database, out: &mut impl Write) -> Result<()> {
    let notes = NoteService::new(db)
        .snapshot()
        .context("Failed to load notes")?;
    let graph = engine.graph(&notes);

    serde_json::to_writer_pretty(&mut *out, &graph).context("Failed to serialize graph")?;
    writeln!(out)?;
    Ok(())
}

fn execute_stats(engine: &KnowledgeEngine<'_>, db: Database, out: &mut impl Write) -> Result<()> {
    let notes = NoteService::new(db)
        .snapshot()
        .context("Failed to load notes")?;
    let analytics = engine.analytics(&notes);

    serde_json::to_writer_pretty(&mut *out, &analytics).context("Failed to serialize analytics")?;
    writeln!(out)?;
    Ok(())
}

/// Parses comma-separated tags from a string.
///
/// Splits on commas, trims whitespace from each tag, and filters out empty strings.
fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
