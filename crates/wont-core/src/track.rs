//! The completion flow — the single entry point that ties the streak
//! engine to the store.
//!
//! Higher layers never talk to the engine or the event log separately;
//! they call [`complete_habit`] with a store handle. The handle is always
//! passed in explicitly — there is no ambient connection state.

use chrono::{DateTime, Utc};

use crate::{store::HabitStore, streak};

/// Record a completion of `name` at `at` (defaulting to now) and return
/// the new streak value.
///
/// Loads the habit's cached streak state, lets the engine decide
/// extend-vs-reset, then appends the event and refreshes the cache in one
/// atomic store operation. Unknown-habit failures from the store surface
/// unchanged.
pub async fn complete_habit<S: HabitStore>(
  store: &S,
  name: &str,
  at: Option<DateTime<Utc>>,
) -> Result<u32, S::Error> {
  let occurred_at = at.unwrap_or_else(Utc::now);

  let habit = store.load_habit(name).await?;
  let streak = streak::next_streak(
    habit.last_completed_at,
    habit.current_streak,
    habit.periodicity,
    occurred_at,
  );

  store.record_event(name, occurred_at, streak).await?;
  Ok(streak)
}
