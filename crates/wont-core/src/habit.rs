//! Habit — the tracked entity and its cadence.
//!
//! A habit row carries the immutable definition (name, description,
//! periodicity, creation time) plus a denormalized cache of the streak
//! state: `current_streak` and `last_completed_at` always mirror the most
//! recently inserted completion event, so the common read path never scans
//! the event log.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// ─── Periodicity ─────────────────────────────────────────────────────────────

/// The cadence at which a habit must be completed to extend its streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
  Daily,
  Weekly,
}

impl Periodicity {
  /// Canonical lowercase form, as stored in the database.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Daily => "daily",
      Self::Weekly => "weekly",
    }
  }
}

impl FromStr for Periodicity {
  type Err = Error;

  /// Case-insensitive: `"Daily"`, `"DAILY"`, and `"daily"` all parse to
  /// [`Periodicity::Daily`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "daily" => Ok(Self::Daily),
      "weekly" => Ok(Self::Weekly),
      _ => Err(Error::UnknownPeriodicity(s.to_owned())),
    }
  }
}

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A tracked habit. The name is the primary identifier and is immutable,
/// as is the periodicity; the streak fields are a cache maintained by the
/// store, never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
  pub name:              String,
  pub description:       String,
  pub periodicity:       Periodicity,
  pub created_at:        DateTime<Utc>,
  /// Streak value of the most recently inserted event; 0 before the first
  /// completion.
  pub current_streak:    u32,
  /// Timestamp of the most recently inserted event; `None` before the
  /// first completion.
  pub last_completed_at: Option<DateTime<Utc>>,
}

// ─── NewHabit ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::HabitStore::create_habit`].
/// The streak cache always starts at zero with no completion recorded.
#[derive(Debug, Clone)]
pub struct NewHabit {
  pub name:        String,
  pub description: String,
  pub periodicity: Periodicity,
  pub created_at:  DateTime<Utc>,
}

impl NewHabit {
  /// Convenience constructor with `created_at` set to now.
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    periodicity: Periodicity,
  ) -> Self {
    Self {
      name: name.into(),
      description: description.into(),
      periodicity,
      created_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn periodicity_parses_case_insensitively() {
    for s in ["daily", "Daily", "DAILY", "dAiLy"] {
      assert_eq!(s.parse::<Periodicity>().unwrap(), Periodicity::Daily);
    }
    for s in ["weekly", "Weekly", "WEEKLY"] {
      assert_eq!(s.parse::<Periodicity>().unwrap(), Periodicity::Weekly);
    }
  }

  #[test]
  fn periodicity_rejects_unknown_cadence() {
    let err = "monthly".parse::<Periodicity>().unwrap_err();
    assert!(matches!(err, Error::UnknownPeriodicity(s) if s == "monthly"));
  }

  #[test]
  fn periodicity_round_trips_through_canonical_form() {
    for p in [Periodicity::Daily, Periodicity::Weekly] {
      assert_eq!(p.as_str().parse::<Periodicity>().unwrap(), p);
    }
  }
}
