//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, TimeZone, Utc};
use wont_core::{
  habit::{NewHabit, Periodicity},
  store::{HabitStore, StreakRecord},
  track::complete_habit,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn habit(name: &str, periodicity: Periodicity) -> NewHabit {
  NewHabit {
    name:        name.into(),
    description: format!("{name} description"),
    periodicity,
    created_at:  at(2024, 1, 1, 9, 0),
  }
}

/// Store seeded with five habits and seven completions: two daily habits
/// ("Morning Jog", "Read a Book") and three weekly ones ("Water the
/// Plants", "Review Finances", "Call Parents"). "Water the Plants" has no
/// completions at all.
async fn seeded_store() -> SqliteStore {
  let s = store().await;

  for (name, description, periodicity) in [
    (
      "Morning Jog",
      "Go for a 30-minute run every morning",
      Periodicity::Daily,
    ),
    ("Read a Book", "Read 10 pages of a book daily", Periodicity::Daily),
    ("Water the Plants", "Water indoor plants weekly", Periodicity::Weekly),
    ("Review Finances", "Check bank accounts weekly", Periodicity::Weekly),
    (
      "Call Parents",
      "Have a weekly call with parents",
      Periodicity::Weekly,
    ),
  ] {
    s.create_habit(NewHabit {
      name: name.into(),
      description: description.into(),
      periodicity,
      created_at: at(2024, 1, 1, 9, 0),
    })
    .await
    .unwrap();
  }

  s.record_event("Morning Jog", at(2024, 1, 1, 9, 0), 1).await.unwrap();
  s.record_event("Read a Book", at(2024, 1, 1, 7, 0), 1).await.unwrap();
  s.record_event("Read a Book", at(2024, 1, 2, 7, 0), 2).await.unwrap();
  s.record_event("Review Finances", at(2024, 1, 1, 10, 0), 1).await.unwrap();
  s.record_event("Review Finances", at(2024, 1, 8, 10, 0), 2).await.unwrap();
  s.record_event("Review Finances", at(2024, 1, 15, 10, 0), 3).await.unwrap();
  s.record_event("Call Parents", at(2024, 1, 4, 21, 0), 1).await.unwrap();

  s
}

// ─── Habit lifecycle ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_load_habit() {
  let s = store().await;

  let created = s
    .create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();
  assert_eq!(created.current_streak, 0);
  assert!(created.last_completed_at.is_none());

  let loaded = s.load_habit("Morning Jog").await.unwrap();
  assert_eq!(loaded.name, "Morning Jog");
  assert_eq!(loaded.description, created.description);
  assert_eq!(loaded.periodicity, Periodicity::Daily);
  assert_eq!(loaded.created_at, created.created_at);
  assert_eq!(loaded.current_streak, 0);
  assert!(loaded.last_completed_at.is_none());
}

#[tokio::test]
async fn create_duplicate_habit_errors() {
  let s = store().await;
  s.create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();

  let err = s
    .create_habit(habit("Morning Jog", Periodicity::Weekly))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateHabit(name) if name == "Morning Jog"));
}

#[tokio::test]
async fn load_missing_habit_errors() {
  let s = store().await;
  let err = s.load_habit("Nonexistent").await.unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}

#[tokio::test]
async fn list_habits_returns_all() {
  let s = seeded_store().await;

  let habits = s.list_habits().await.unwrap();
  assert_eq!(habits.len(), 5);

  let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
  for expected in [
    "Morning Jog",
    "Read a Book",
    "Water the Plants",
    "Review Finances",
    "Call Parents",
  ] {
    assert!(names.contains(&expected), "missing {expected:?}");
  }
}

#[tokio::test]
async fn delete_habit_purges_event_history() {
  let s = seeded_store().await;
  s.delete_habit("Review Finances").await.unwrap();

  assert!(matches!(
    s.load_habit("Review Finances").await.unwrap_err(),
    Error::HabitNotFound(_)
  ));
  assert!(matches!(
    s.longest_streak_for("Review Finances").await.unwrap_err(),
    Error::HabitNotFound(_)
  ));
  assert!(matches!(
    s.events_for("Review Finances").await.unwrap_err(),
    Error::HabitNotFound(_)
  ));

  // Re-creating the name yields a fresh habit with no surviving history.
  s.create_habit(habit("Review Finances", Periodicity::Weekly))
    .await
    .unwrap();
  assert_eq!(s.longest_streak_for("Review Finances").await.unwrap(), None);
  assert!(s.events_for("Review Finances").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_habit_errors() {
  let s = store().await;
  let err = s.delete_habit("Nonexistent").await.unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}

// ─── Event recording ─────────────────────────────────────────────────────────

#[tokio::test]
async fn record_event_appends_and_updates_cache() {
  let s = store().await;
  s.create_habit(habit("Read a Book", Periodicity::Daily))
    .await
    .unwrap();

  let event = s
    .record_event("Read a Book", at(2024, 1, 1, 7, 0), 1)
    .await
    .unwrap();
  assert_eq!(event.habit_name, "Read a Book");
  assert_eq!(event.streak, 1);

  let loaded = s.load_habit("Read a Book").await.unwrap();
  assert_eq!(loaded.current_streak, 1);
  assert_eq!(loaded.last_completed_at, Some(at(2024, 1, 1, 7, 0)));

  let events = s.events_for("Read a Book").await.unwrap();
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].occurred_at, at(2024, 1, 1, 7, 0));
}

#[tokio::test]
async fn record_event_unknown_habit_errors() {
  let s = store().await;
  let err = s
    .record_event("Nonexistent", at(2024, 1, 1, 7, 0), 1)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));

  // The failed append must leave nothing behind.
  assert!(s.longest_streak_overall().await.unwrap().is_empty());
}

#[tokio::test]
async fn cache_follows_insertion_order_not_timestamps() {
  let s = store().await;
  s.create_habit(habit("Read a Book", Periodicity::Daily))
    .await
    .unwrap();

  s.record_event("Read a Book", at(2024, 1, 5, 7, 0), 1).await.unwrap();
  // An out-of-order replay: inserted later, occurred earlier.
  s.record_event("Read a Book", at(2024, 1, 2, 7, 0), 1).await.unwrap();

  let loaded = s.load_habit("Read a Book").await.unwrap();
  assert_eq!(loaded.last_completed_at, Some(at(2024, 1, 2, 7, 0)));

  let events = s.events_for("Read a Book").await.unwrap();
  assert_eq!(events.len(), 2);
  assert_eq!(events[0].occurred_at, at(2024, 1, 5, 7, 0));
  assert_eq!(events[1].occurred_at, at(2024, 1, 2, 7, 0));
}

#[tokio::test]
async fn events_for_unknown_habit_errors() {
  let s = store().await;
  let err = s.events_for("Nonexistent").await.unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn longest_streak_is_none_without_events() {
  let s = seeded_store().await;
  // "Water the Plants" was never completed; the absence of history is
  // None, not zero.
  assert_eq!(s.longest_streak_for("Water the Plants").await.unwrap(), None);
}

#[tokio::test]
async fn longest_streak_per_habit() {
  let s = seeded_store().await;
  assert_eq!(s.longest_streak_for("Morning Jog").await.unwrap(), Some(1));
  assert_eq!(s.longest_streak_for("Read a Book").await.unwrap(), Some(2));
  assert_eq!(s.longest_streak_for("Review Finances").await.unwrap(), Some(3));
  assert_eq!(s.longest_streak_for("Call Parents").await.unwrap(), Some(1));
}

#[tokio::test]
async fn longest_streak_survives_a_later_reset() {
  let s = seeded_store().await;
  // A missed window resets the cached streak, but the historical maximum
  // stays queryable from the event log.
  s.record_event("Review Finances", at(2024, 2, 10, 10, 0), 1)
    .await
    .unwrap();

  let loaded = s.load_habit("Review Finances").await.unwrap();
  assert_eq!(loaded.current_streak, 1);
  assert_eq!(s.longest_streak_for("Review Finances").await.unwrap(), Some(3));
}

#[tokio::test]
async fn longest_streak_overall_single_winner() {
  let s = seeded_store().await;
  let records = s.longest_streak_overall().await.unwrap();
  assert_eq!(
    records,
    vec![StreakRecord {
      habit_name: "Review Finances".into(),
      streak:     3,
    }]
  );
}

#[tokio::test]
async fn longest_streak_overall_includes_ties() {
  let s = store().await;
  s.create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();
  s.create_habit(habit("Read a Book", Periodicity::Daily))
    .await
    .unwrap();

  for day in 1..=5 {
    s.record_event("Morning Jog", at(2024, 1, day, 9, 0), day).await.unwrap();
    s.record_event("Read a Book", at(2024, 1, day, 7, 0), day).await.unwrap();
  }

  let records = s.longest_streak_overall().await.unwrap();
  assert_eq!(records.len(), 2);
  assert!(records.iter().all(|r| r.streak == 5));
  assert!(records.iter().any(|r| r.habit_name == "Morning Jog"));
  assert!(records.iter().any(|r| r.habit_name == "Read a Book"));
}

#[tokio::test]
async fn longest_streak_overall_dedups_repeat_maxima() {
  let s = store().await;
  s.create_habit(habit("Read a Book", Periodicity::Daily))
    .await
    .unwrap();

  // Two separate runs both peak at 2; still a single entry.
  for (day, streak) in [(1, 1), (2, 2), (4, 1), (5, 2)] {
    s.record_event("Read a Book", at(2024, 1, day, 7, 0), streak)
      .await
      .unwrap();
  }

  let records = s.longest_streak_overall().await.unwrap();
  assert_eq!(
    records,
    vec![StreakRecord {
      habit_name: "Read a Book".into(),
      streak:     2,
    }]
  );
}

#[tokio::test]
async fn longest_streak_overall_empty_without_events() {
  let s = store().await;
  s.create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();

  assert!(s.longest_streak_overall().await.unwrap().is_empty());
}

#[tokio::test]
async fn habits_by_periodicity_filters() {
  let s = seeded_store().await;

  let daily = s.habits_by_periodicity(Periodicity::Daily).await.unwrap();
  assert_eq!(daily.len(), 2);
  assert!(daily.contains(&"Morning Jog".to_string()));
  assert!(daily.contains(&"Read a Book".to_string()));

  let weekly = s.habits_by_periodicity(Periodicity::Weekly).await.unwrap();
  assert_eq!(weekly.len(), 3);
}

#[tokio::test]
async fn periodicity_filter_is_case_insensitive_at_the_parse_boundary() {
  let s = seeded_store().await;

  let lower: Periodicity = "daily".parse().unwrap();
  let upper: Periodicity = "DAILY".parse().unwrap();
  assert_eq!(lower, upper);

  let a = s.habits_by_periodicity(lower).await.unwrap();
  let b = s.habits_by_periodicity(upper).await.unwrap();
  assert_eq!(a, b);
}

// ─── Completion flow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn complete_habit_starts_extends_and_resets() {
  let s = store().await;
  s.create_habit(habit("Read a Book", Periodicity::Daily))
    .await
    .unwrap();

  let first = complete_habit(&s, "Read a Book", Some(at(2024, 1, 1, 7, 0)))
    .await
    .unwrap();
  assert_eq!(first, 1);

  let extended = complete_habit(&s, "Read a Book", Some(at(2024, 1, 2, 22, 30)))
    .await
    .unwrap();
  assert_eq!(extended, 2);

  // A missed day resets to 1.
  let reset = complete_habit(&s, "Read a Book", Some(at(2024, 1, 5, 7, 0)))
    .await
    .unwrap();
  assert_eq!(reset, 1);

  let history: Vec<u32> = s
    .events_for("Read a Book")
    .await
    .unwrap()
    .iter()
    .map(|e| e.streak)
    .collect();
  assert_eq!(history, vec![1, 2, 1]);
}

#[tokio::test]
async fn complete_habit_extends_from_seeded_history() {
  let s = seeded_store().await;

  // "Read a Book" is at streak 2, last completed 2024-01-02.
  let streak = complete_habit(&s, "Read a Book", Some(at(2024, 1, 3, 11, 0)))
    .await
    .unwrap();
  assert_eq!(streak, 3);
}

#[tokio::test]
async fn complete_habit_weekly_cadence() {
  let s = seeded_store().await;

  // One week after the last completion on 2024-01-15.
  let streak = complete_habit(&s, "Review Finances", Some(at(2024, 1, 22, 18, 0)))
    .await
    .unwrap();
  assert_eq!(streak, 4);

  // Two days later is off-cadence for a weekly habit.
  let streak = complete_habit(&s, "Review Finances", Some(at(2024, 1, 24, 18, 0)))
    .await
    .unwrap();
  assert_eq!(streak, 1);
}

#[tokio::test]
async fn complete_habit_same_day_resets() {
  let s = store().await;
  s.create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();

  assert_eq!(
    complete_habit(&s, "Morning Jog", Some(at(2024, 1, 1, 9, 0))).await.unwrap(),
    1
  );
  assert_eq!(
    complete_habit(&s, "Morning Jog", Some(at(2024, 1, 2, 9, 0))).await.unwrap(),
    2
  );
  // A second completion on the same calendar date resets rather than
  // extending or no-opping.
  assert_eq!(
    complete_habit(&s, "Morning Jog", Some(at(2024, 1, 2, 21, 0))).await.unwrap(),
    1
  );
}

#[tokio::test]
async fn complete_habit_defaults_to_now() {
  let s = store().await;
  s.create_habit(habit("Morning Jog", Periodicity::Daily))
    .await
    .unwrap();

  let streak = complete_habit(&s, "Morning Jog", None).await.unwrap();
  assert_eq!(streak, 1);

  let loaded = s.load_habit("Morning Jog").await.unwrap();
  assert!(loaded.last_completed_at.is_some());
}

#[tokio::test]
async fn complete_habit_unknown_habit_errors() {
  let s = store().await;
  let err = complete_habit(&s, "Nonexistent", None).await.unwrap_err();
  assert!(matches!(err, Error::HabitNotFound(_)));
}
