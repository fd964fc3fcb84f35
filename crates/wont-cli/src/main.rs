//! `wont` — command-line habit tracker.
//!
//! # Usage
//!
//! ```text
//! wont add "Morning Jog" -d "Go for a 30-minute run" -p daily
//! wont done "Morning Jog"
//! wont list
//! wont longest
//! ```
//!
//! The store location is resolved from `--db`, the `WONT_DB` environment
//! variable, the optional TOML config file, or the default
//! `~/.local/share/wont/wont.db`, in that order.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wont_store_sqlite::SqliteStore;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "wont", version, about = "Track habits and their streaks")]
struct Cli {
  /// Path to the SQLite database file.
  #[arg(long, env = "WONT_DB", value_name = "FILE", global = true)]
  db: Option<PathBuf>,

  /// Path to a TOML config file (`db_path` key).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create a new habit.
  Add {
    /// Habit name; the unique identifier.
    name: String,

    /// What the habit is about.
    #[arg(short, long)]
    description: String,

    /// Completion cadence: daily or weekly (case-insensitive).
    #[arg(short, long)]
    periodicity: String,
  },

  /// Record a completion and print the new streak.
  Done {
    /// Habit name.
    name: String,

    /// Completion timestamp for replay or backfill: RFC 3339, a local
    /// "YYYY-MM-DD HH:MM:SS", or a bare "YYYY-MM-DD". Defaults to now.
    #[arg(long, value_name = "TIMESTAMP")]
    at: Option<String>,
  },

  /// Delete a habit and its full completion history.
  Delete {
    /// Habit name.
    name: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
  },

  /// List habits, optionally filtered by periodicity.
  List {
    /// Only habit names with this cadence: daily or weekly.
    #[arg(short, long)]
    periodicity: Option<String>,

    /// Emit JSON instead of the table.
    #[arg(long)]
    json: bool,
  },

  /// Show a habit's completion history.
  Log {
    /// Habit name.
    name: String,

    /// Emit JSON instead of the table.
    #[arg(long)]
    json: bool,
  },

  /// Show the longest streak for one habit, or the record holders overall.
  Longest {
    /// Habit name; omit to search across all habits.
    name: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db_path: Option<PathBuf>,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &cli.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // `--db` (and WONT_DB) override the config file, which overrides the
  // default location.
  let db_path = expand_tilde(
    &cli
      .db
      .or(file_cfg.db_path)
      .unwrap_or_else(|| PathBuf::from("~/.local/share/wont/wont.db")),
  );

  if let Some(parent) = db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("opening store at {}", db_path.display()))?;
  tracing::debug!("opened store at {}", db_path.display());

  match cli.command {
    Command::Add {
      name,
      description,
      periodicity,
    } => commands::add(&store, name, description, periodicity).await,
    Command::Done { name, at } => commands::done(&store, name, at).await,
    Command::Delete { name, yes } => commands::delete(&store, name, yes).await,
    Command::List { periodicity, json } => {
      commands::list(&store, periodicity, json).await
    }
    Command::Log { name, json } => commands::log(&store, name, json).await,
    Command::Longest { name, json } => {
      commands::longest(&store, name, json).await
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
