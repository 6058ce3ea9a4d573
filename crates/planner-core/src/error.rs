//! Error types for `planner-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot parse {0:?} as a calendar date")]
  InvalidDate(String),

  #[error("cannot parse {0:?} as an offset-aware instant")]
  InvalidInstant(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
