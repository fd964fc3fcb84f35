//! The `HabitStore` trait and supporting result types.
//!
//! The trait is implemented by storage backends (e.g.
//! `wont-store-sqlite`). Higher layers (the completion flow, the CLI)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  event::Event,
  habit::{Habit, NewHabit, Periodicity},
};

// ─── Result type ─────────────────────────────────────────────────────────────

/// One habit's appearance in [`HabitStore::longest_streak_overall`] — a
/// habit name paired with the global-maximum streak it reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
  pub habit_name: String,
  pub streak:     u32,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a habit store backend.
///
/// Completion events are append-only; the only mutations are habit
/// creation, event recording (which also refreshes the habit's cached
/// streak state in the same atomic unit), and habit deletion (which
/// purges the habit together with its full event history). Analytics
/// methods are read-only and never observe a half-applied write.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habit lifecycle ───────────────────────────────────────────────────

  /// Create and persist a new habit with a zeroed streak cache.
  /// Fails if a habit with the same name already exists.
  fn create_habit(
    &self,
    habit: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve the full habit record, including the cached streak state.
  /// Fails if no habit with this name exists.
  fn load_habit<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + 'a;

  /// Remove the habit and its entire event history as one atomic unit.
  /// Fails if no habit with this name exists.
  fn delete_habit<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// List all habits. The exposed order is an implementation detail;
  /// callers must not rely on it.
  fn list_habits(
    &self,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  // ── Events — append-only writes ───────────────────────────────────────

  /// Append a completion event and update the habit's cached
  /// `current_streak` / `last_completed_at` to this event's values, as a
  /// single atomic unit — partial application is never observable.
  ///
  /// `streak` is the value the streak engine computed for this
  /// completion; the store records it verbatim. Fails if the habit does
  /// not exist.
  fn record_event<'a>(
    &'a self,
    habit_name: &'a str,
    occurred_at: DateTime<Utc>,
    streak: u32,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;

  /// The habit's full completion history, in insertion order. Fails if
  /// the habit does not exist.
  fn events_for<'a>(
    &'a self,
    habit_name: &'a str,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  // ── Analytics — read-only ─────────────────────────────────────────────

  /// Names of all habits with the given periodicity, in no guaranteed
  /// order.
  fn habits_by_periodicity(
    &self,
    periodicity: Periodicity,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// The maximum streak value ever recorded for the habit across its
  /// full event history, or `None` if the habit has no events yet. The
  /// absence of history is distinct from a recorded streak: values are
  /// ≥ 1 once any event exists, so this never returns `Some(0)`. Fails
  /// if the habit does not exist.
  fn longest_streak_for<'a>(
    &'a self,
    habit_name: &'a str,
  ) -> impl Future<Output = Result<Option<u32>, Self::Error>> + Send + 'a;

  /// Every habit whose history reached the global maximum streak across
  /// all events, one entry per habit (deduplicated even if a habit hit
  /// the maximum more than once). Ties are all included. Empty if no
  /// events exist anywhere.
  fn longest_streak_overall(
    &self,
  ) -> impl Future<Output = Result<Vec<StreakRecord>, Self::Error>> + Send + '_;
}
