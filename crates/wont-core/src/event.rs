//! Completion events — the append-only history behind every streak.
//!
//! An event is an immutable record of one completion. Events are never
//! updated or reordered; the streak value is a point-in-time snapshot of
//! what the engine computed when the event was recorded, so the full
//! history stays independently queryable (longest streak ever, etc.) even
//! as the habit's cached state moves on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded completion of a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub habit_name:  String,
  /// Caller-supplied completion time. Defaults to now at the completion
  /// entry point; replay and test callers may pass any timestamp,
  /// including out-of-order ones.
  pub occurred_at: DateTime<Utc>,
  /// The streak value computed at the moment this event was recorded.
  /// Never recomputed, even if earlier history is later deleted.
  pub streak:      u32,
}
