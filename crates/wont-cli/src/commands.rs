//! Subcommand implementations for the `wont` binary.
//!
//! Each function renders the outcome of one core operation. Errors from
//! the core bubble up to `main` and are printed by anyhow; nothing is
//! swallowed here.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use wont_core::{
  habit::{NewHabit, Periodicity},
  store::HabitStore,
  track::complete_habit,
};
use wont_store_sqlite::SqliteStore;

// ─── add ─────────────────────────────────────────────────────────────────────

pub async fn add(
  store: &SqliteStore,
  name: String,
  description: String,
  periodicity: String,
) -> Result<()> {
  let periodicity: Periodicity = periodicity.parse()?;

  let habit = store
    .create_habit(NewHabit::new(name, description, periodicity))
    .await?;
  println!(
    "Created {} habit '{}'.",
    habit.periodicity.as_str(),
    habit.name
  );
  Ok(())
}

// ─── done ────────────────────────────────────────────────────────────────────

pub async fn done(
  store: &SqliteStore,
  name: String,
  at: Option<String>,
) -> Result<()> {
  let at = at.as_deref().map(parse_timestamp).transpose()?;

  let streak = complete_habit(store, &name, at).await?;
  println!("Completed '{name}'; current streak is {streak}.");
  Ok(())
}

// ─── delete ──────────────────────────────────────────────────────────────────

pub async fn delete(store: &SqliteStore, name: String, yes: bool) -> Result<()> {
  // Load first so a missing habit fails before the prompt.
  let habit = store.load_habit(&name).await?;

  if !yes {
    let prompt = format!(
      "Delete habit '{}' and its full completion history? [y/N] ",
      habit.name
    );
    if !confirm(&prompt)? {
      println!("Deletion cancelled.");
      return Ok(());
    }
  }

  store.delete_habit(&name).await?;
  println!("Deleted '{name}' and all its completions.");
  Ok(())
}

/// Prompt on stdout and read one line from stdin; `y`/`yes` confirms.
fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt}");
  io::stdout().flush().ok();

  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("reading confirmation")?;
  let answer = line.trim().to_ascii_lowercase();
  Ok(answer == "y" || answer == "yes")
}

// ─── list ────────────────────────────────────────────────────────────────────

pub async fn list(
  store: &SqliteStore,
  periodicity: Option<String>,
  json: bool,
) -> Result<()> {
  // With a filter only the names come back; without it, the full records.
  if let Some(p) = periodicity {
    let p: Periodicity = p.parse()?;
    let names = store.habits_by_periodicity(p).await?;

    if json {
      println!("{}", serde_json::to_string_pretty(&names)?);
    } else if names.is_empty() {
      println!("No {} habits tracked yet.", p.as_str());
    } else {
      for name in names {
        println!("{name}");
      }
    }
    return Ok(());
  }

  let habits = store.list_habits().await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&habits)?);
  } else if habits.is_empty() {
    println!("No habits tracked yet.");
  } else {
    for habit in habits {
      let last = habit
        .last_completed_at
        .map(format_local)
        .unwrap_or_else(|| "never".to_string());
      println!(
        "{:<24} {:<7} streak {:<4} last completed {}",
        habit.name,
        habit.periodicity.as_str(),
        habit.current_streak,
        last
      );
    }
  }
  Ok(())
}

// ─── log ─────────────────────────────────────────────────────────────────────

pub async fn log(store: &SqliteStore, name: String, json: bool) -> Result<()> {
  let events = store.events_for(&name).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&events)?);
  } else if events.is_empty() {
    println!("No completions recorded for '{name}' yet.");
  } else {
    for event in events {
      println!("{}  streak {}", format_local(event.occurred_at), event.streak);
    }
  }
  Ok(())
}

// ─── longest ─────────────────────────────────────────────────────────────────

pub async fn longest(
  store: &SqliteStore,
  name: Option<String>,
  json: bool,
) -> Result<()> {
  if let Some(name) = name {
    let longest = store.longest_streak_for(&name).await?;

    if json {
      let payload = serde_json::json!({
        "habit_name": name,
        "longest_streak": longest,
      });
      println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
      match longest {
        Some(streak) => println!("Longest streak for '{name}': {streak}."),
        None => println!("'{name}' has no completions yet."),
      }
    }
    return Ok(());
  }

  let records = store.longest_streak_overall().await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&records)?);
  } else if records.is_empty() {
    println!("No completions recorded yet.");
  } else {
    for record in records {
      println!("'{}' with a streak of {}.", record.habit_name, record.streak);
    }
  }
  Ok(())
}

// ─── Timestamp helpers ───────────────────────────────────────────────────────

/// Parse a caller-supplied completion timestamp.
///
/// Accepts RFC 3339 (any offset), a naive local `YYYY-MM-DD HH:MM:SS`, or
/// a bare `YYYY-MM-DD` taken as local midnight.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }

  let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").or_else(|_| {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
  });
  let Ok(naive) = naive else {
    bail!(
      "unrecognised timestamp {s:?} (expected RFC 3339, \
       \"YYYY-MM-DD HH:MM:SS\", or \"YYYY-MM-DD\")"
    );
  };

  match Local.from_local_datetime(&naive) {
    chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
    // DST fold: take the earlier reading.
    chrono::LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
    chrono::LocalResult::None => {
      bail!("timestamp {s:?} does not exist in the local timezone")
    }
  }
}

/// Render a stored UTC timestamp in the local clock for display.
fn format_local(dt: DateTime<Utc>) -> String {
  dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
