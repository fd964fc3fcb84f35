//! The streak engine — pure decision logic, no state, no I/O.
//!
//! Given the previous completion timestamp (if any), the habit's
//! periodicity, and the new completion timestamp, the engine decides
//! whether the streak starts, extends, or resets. Only the calendar dates
//! are compared; time of day never matters. The window is exact: a daily
//! habit extends only on a gap of exactly one day, a weekly habit only on
//! exactly seven. Everything else — same day, too early, too late, or a
//! timestamp before the previous one — resets the streak to 1.

use chrono::{DateTime, Duration, Utc};

use crate::habit::Periodicity;

// ─── Decision ────────────────────────────────────────────────────────────────

/// Outcome of comparing a new completion against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakDecision {
  /// First-ever completion for this habit.
  Start,
  /// Completed exactly one period after the previous completion.
  Extend,
  /// The expected window was missed (or hit more than once); the streak
  /// restarts at 1.
  Reset,
}

/// Classify a new completion at `occurred_at` against the previous one.
///
/// The gap is `occurred_at.date() − previous.date()` in whole calendar
/// days; a daily habit extends on a gap of exactly 1, a weekly habit on
/// exactly 7. Two completions on the same calendar date produce a gap of
/// zero and therefore [`StreakDecision::Reset`].
pub fn decide(
  previous_completion: Option<DateTime<Utc>>,
  periodicity: Periodicity,
  occurred_at: DateTime<Utc>,
) -> StreakDecision {
  let previous = match previous_completion {
    Some(prev) => prev,
    None => return StreakDecision::Start,
  };

  let gap = occurred_at.date_naive() - previous.date_naive();
  let expected = match periodicity {
    Periodicity::Daily => Duration::days(1),
    Periodicity::Weekly => Duration::days(7),
  };

  if gap == expected {
    StreakDecision::Extend
  } else {
    StreakDecision::Reset
  }
}

/// Compute the streak value for a new completion.
///
/// The engine only decides increment-vs-reset; the caller supplies the
/// previous streak value (normally the habit's cached `current_streak`)
/// and this function applies the arithmetic: `Extend` yields
/// `previous_streak + 1`, everything else yields 1.
pub fn next_streak(
  previous_completion: Option<DateTime<Utc>>,
  previous_streak: u32,
  periodicity: Periodicity,
  occurred_at: DateTime<Utc>,
) -> u32 {
  match decide(previous_completion, periodicity, occurred_at) {
    StreakDecision::Extend => previous_streak + 1,
    StreakDecision::Start | StreakDecision::Reset => 1,
  }
}
