//! Catalog command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the catalog store.
//! - Seed an empty catalog, then run exactly one catalog command.
//! - Print results as JSON on stdout and errors on stderr.
//!
//! # Exit codes
//! - `0` success, `2` requested book or recommendation not found,
//!   `1` any other failure.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use recomemento_core::{
    core_version, init_logging, init_stderr_logging, open_store, ping, seed_if_empty, BookId,
    BookPatch, BookService, CatalogConfig, NewBook, RecommendRequest, RepoError,
    SqliteBookRepository,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "recomemento", version, about = "Book catalog with genre/purpose recommendations")]
struct Cli {
    /// Database file path; overrides DATABASE_URL.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Skip seeding an empty catalog with the baseline books.
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Health check; does not touch the database.
    Ping,
    /// List every book.
    List,
    /// Show one book.
    Get { id: BookId },
    /// Add a book.
    Create(CreateArgs),
    /// Change some fields of a book.
    Update {
        id: BookId,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Remove a book and print it.
    Delete { id: BookId },
    /// Recommend one book for a genre and purpose.
    Recommend {
        #[arg(long)]
        genre: String,
        #[arg(long)]
        purpose: String,
        /// Book type hint, accepted but not used for matching.
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Seed the baseline books if the catalog is empty.
    Seed,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    author: String,
    #[arg(long)]
    genre: String,
    #[arg(long)]
    purpose: String,
    #[arg(long)]
    description: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    purpose: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<CreateArgs> for NewBook {
    fn from(args: CreateArgs) -> Self {
        NewBook::new(
            args.title,
            args.author,
            args.genre,
            args.purpose,
            args.description,
        )
    }
}

impl From<UpdateArgs> for BookPatch {
    fn from(args: UpdateArgs) -> Self {
        BookPatch {
            title: args.title,
            author: args.author,
            genre: args.genre,
            purpose: args.purpose,
            description: args.description,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let not_found = err
                .downcast_ref::<RepoError>()
                .is_some_and(RepoError::is_not_found);
            if not_found {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CatalogConfig::from_env().context("invalid configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if cli.no_seed {
        config.seed_on_start = false;
    }

    start_logging(&config)?;

    let command = cli.command;
    if matches!(command, Command::Ping) {
        return print_ping();
    }

    ensure_parent_dir(&config.database_path)?;
    let store = open_store(&config.database_path).with_context(|| {
        format!(
            "failed to open catalog database `{}`",
            config.database_path.display()
        )
    })?;

    if config.seed_on_start && !matches!(command, Command::Seed) {
        // Startup seeding is best-effort; the catalog stays usable without it.
        if let Err(err) = seed_if_empty(&store) {
            warn!("event=db_seed module=cli status=error error={err}");
        }
    }

    let service = BookService::new(SqliteBookRepository::new(&store));
    match command {
        Command::Ping => print_ping(),
        Command::List => print_json(&service.list_books()?),
        Command::Get { id } => print_json(&service.get_book(id)?),
        Command::Create(args) => print_json(&service.create_book(&args.into())?),
        Command::Update { id, fields } => print_json(&service.update_book(id, &fields.into())?),
        Command::Delete { id } => print_json(&service.delete_book(id)?),
        Command::Recommend {
            genre,
            purpose,
            kind,
        } => {
            let request = RecommendRequest {
                genre,
                purpose,
                kind,
            };
            print_json(&service.recommend(&request)?)
        }
        Command::Seed => {
            let inserted = seed_if_empty(&store).context("failed to seed catalog")?;
            print_json(&json!({ "inserted": inserted }))
        }
    }
}

fn print_ping() -> Result<()> {
    print_json(&json!({ "status": ping(), "version": core_version() }))
}

fn start_logging(config: &CatalogConfig) -> Result<()> {
    let started = match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level, &dir.to_string_lossy()),
        None => init_stderr_logging(config.log_level),
    };
    started.map_err(anyhow::Error::msg)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory `{}`", parent.display())
            })
        }
        _ => Ok(()),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
