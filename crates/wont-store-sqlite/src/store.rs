//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use wont_core::{
  event::Event,
  habit::{Habit, NewHabit, Periodicity},
  store::{HabitStore, StreakRecord},
};

use crate::{
  Error, Result,
  encode::{RawEvent, RawHabit, encode_dt, encode_periodicity},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Wont habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements for one operation run inside one closure on the connection's
/// worker thread, which serializes writes and keeps readers from observing
/// a half-applied mutation.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Check that a habit row exists. Runs on the connection's worker thread,
/// inside whatever transaction the caller has open.
fn habit_exists(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<bool> {
  let found: Option<bool> = conn
    .query_row(
      "SELECT 1 FROM habits WHERE name = ?1",
      rusqlite::params![name],
      |_| Ok(true),
    )
    .optional()?;
  Ok(found.unwrap_or(false))
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habit lifecycle ───────────────────────────────────────────────────────

  async fn create_habit(&self, habit: NewHabit) -> Result<Habit> {
    let name        = habit.name.clone();
    let description = habit.description.clone();
    let periodicity = encode_periodicity(habit.periodicity).to_owned();
    let created_at  = encode_dt(habit.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if habit_exists(&tx, &name)? {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO habits (name, description, periodicity, created_at,
                               current_streak, last_completed_at)
           VALUES (?1, ?2, ?3, ?4, 0, NULL)",
          rusqlite::params![name, description, periodicity, created_at],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateHabit(habit.name));
    }

    Ok(Habit {
      name:              habit.name,
      description:       habit.description,
      periodicity:       habit.periodicity,
      created_at:        habit.created_at,
      current_streak:    0,
      last_completed_at: None,
    })
  }

  async fn load_habit(&self, name: &str) -> Result<Habit> {
    let name_owned = name.to_owned();

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name, description, periodicity, created_at,
                      current_streak, last_completed_at
               FROM habits WHERE name = ?1",
              rusqlite::params![name_owned],
              |row| {
                Ok(RawHabit {
                  name:              row.get(0)?,
                  description:       row.get(1)?,
                  periodicity:       row.get(2)?,
                  created_at:        row.get(3)?,
                  current_streak:    row.get(4)?,
                  last_completed_at: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or_else(|| Error::HabitNotFound(name.to_owned()))?
      .into_habit()
  }

  async fn delete_habit(&self, name: &str) -> Result<()> {
    let name_owned = name.to_owned();

    let deleted: bool = self
      .conn
      .call(move |conn| {
        // The habit row and its events go together or not at all.
        let tx = conn.transaction()?;
        if !habit_exists(&tx, &name_owned)? {
          return Ok(false);
        }
        tx.execute(
          "DELETE FROM events WHERE habit_name = ?1",
          rusqlite::params![name_owned],
        )?;
        tx.execute(
          "DELETE FROM habits WHERE name = ?1",
          rusqlite::params![name_owned],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !deleted {
      return Err(Error::HabitNotFound(name.to_owned()));
    }
    Ok(())
  }

  async fn list_habits(&self) -> Result<Vec<Habit>> {
    let raws: Vec<RawHabit> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name, description, periodicity, created_at,
                  current_streak, last_completed_at
           FROM habits ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawHabit {
              name:              row.get(0)?,
              description:       row.get(1)?,
              periodicity:       row.get(2)?,
              created_at:        row.get(3)?,
              current_streak:    row.get(4)?,
              last_completed_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  // ── Events — append-only writes ───────────────────────────────────────────

  async fn record_event(
    &self,
    habit_name: &str,
    occurred_at: DateTime<Utc>,
    streak: u32,
  ) -> Result<Event> {
    let name   = habit_name.to_owned();
    let at_str = encode_dt(occurred_at);

    let appended: bool = self
      .conn
      .call(move |conn| {
        // The event append and the cache refresh must land together; a
        // reader may never observe one without the other.
        let tx = conn.transaction()?;
        if !habit_exists(&tx, &name)? {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO events (habit_name, occurred_at, streak)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![name, at_str, streak],
        )?;
        tx.execute(
          "UPDATE habits SET current_streak = ?1, last_completed_at = ?2
           WHERE name = ?3",
          rusqlite::params![streak, at_str, name],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !appended {
      return Err(Error::HabitNotFound(habit_name.to_owned()));
    }

    Ok(Event {
      habit_name: habit_name.to_owned(),
      occurred_at,
      streak,
    })
  }

  async fn events_for(&self, habit_name: &str) -> Result<Vec<Event>> {
    let name = habit_name.to_owned();

    let raws: Option<Vec<RawEvent>> = self
      .conn
      .call(move |conn| {
        if !habit_exists(conn, &name)? {
          return Ok(None);
        }
        // rowid order is insertion order for an append-only table.
        let mut stmt = conn.prepare(
          "SELECT habit_name, occurred_at, streak FROM events
           WHERE habit_name = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![name], |row| {
            Ok(RawEvent {
              habit_name:  row.get(0)?,
              occurred_at: row.get(1)?,
              streak:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(rows))
      })
      .await?;

    raws
      .ok_or_else(|| Error::HabitNotFound(habit_name.to_owned()))?
      .into_iter()
      .map(RawEvent::into_event)
      .collect()
  }

  // ── Analytics — read-only ─────────────────────────────────────────────────

  async fn habits_by_periodicity(
    &self,
    periodicity: Periodicity,
  ) -> Result<Vec<String>> {
    let p = encode_periodicity(periodicity).to_owned();

    let names: Vec<String> = self
      .conn
      .call(move |conn| {
        // The store always writes lowercase, but the filter tolerates
        // mixed-case rows written by other tools.
        let mut stmt =
          conn.prepare("SELECT name FROM habits WHERE LOWER(periodicity) = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![p], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(names)
  }

  async fn longest_streak_for(&self, habit_name: &str) -> Result<Option<u32>> {
    let name = habit_name.to_owned();

    let (exists, max): (bool, Option<u32>) = self
      .conn
      .call(move |conn| {
        if !habit_exists(conn, &name)? {
          return Ok((false, None));
        }
        // MAX over zero rows is NULL: a habit with no events has no
        // longest streak, which is distinct from a streak of zero.
        let max: Option<u32> = conn.query_row(
          "SELECT MAX(streak) FROM events WHERE habit_name = ?1",
          rusqlite::params![name],
          |row| row.get(0),
        )?;
        Ok((true, max))
      })
      .await?;

    if !exists {
      return Err(Error::HabitNotFound(habit_name.to_owned()));
    }
    Ok(max)
  }

  async fn longest_streak_overall(&self) -> Result<Vec<StreakRecord>> {
    let records: Vec<StreakRecord> = self
      .conn
      .call(|conn| {
        // DISTINCT folds repeat maxima from one habit into a single entry.
        // The comparison against a NULL subquery result is never true, so
        // an empty events table yields no rows.
        let mut stmt = conn.prepare(
          "SELECT DISTINCT habit_name, streak FROM events
           WHERE streak = (SELECT MAX(streak) FROM events)
           ORDER BY habit_name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(StreakRecord {
              habit_name: row.get(0)?,
              streak:     row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }
}
