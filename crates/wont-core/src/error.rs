//! Error types for `wont-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown periodicity: {0:?} (expected \"daily\" or \"weekly\")")]
  UnknownPeriodicity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
