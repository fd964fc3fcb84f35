//! Error type for `wont-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] wont_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to create a habit under a name that is already taken.
  #[error("habit already exists: {0:?}")]
  DuplicateHabit(String),

  #[error("habit not found: {0:?}")]
  HabitNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
