//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings in UTC. Periodicity is
//! stored as lowercase text.

use chrono::{DateTime, Utc};
use wont_core::{
  event::Event,
  habit::{Habit, Periodicity},
};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Periodicity ─────────────────────────────────────────────────────────────

pub fn encode_periodicity(p: Periodicity) -> &'static str { p.as_str() }

pub fn decode_periodicity(s: &str) -> Result<Periodicity> {
  Ok(s.parse::<Periodicity>()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `habits` row.
pub struct RawHabit {
  pub name:              String,
  pub description:       String,
  pub periodicity:       String,
  pub created_at:        String,
  pub current_streak:    u32,
  pub last_completed_at: Option<String>,
}

impl RawHabit {
  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      name:              self.name,
      description:       self.description,
      periodicity:       decode_periodicity(&self.periodicity)?,
      created_at:        decode_dt(&self.created_at)?,
      current_streak:    self.current_streak,
      last_completed_at: self
        .last_completed_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub habit_name:  String,
  pub occurred_at: String,
  pub streak:      u32,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      habit_name:  self.habit_name,
      occurred_at: decode_dt(&self.occurred_at)?,
      streak:      self.streak,
    })
  }
}
