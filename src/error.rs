//! Error types for the pivot and render stages.
//!
//! Data-source and IO failures are not wrapped here; they travel through
//! `anyhow` untouched so callers see the original error.

use thiserror::Error;

/// A source row that breaks the (author, hour, count) contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed row for author {author:?} (hour={hour}, count={count}): {reason}")]
pub struct MalformedRowError {
  pub author: String,
  pub hour: i64,
  pub count: i64,
  pub reason: &'static str,
}

#[derive(Error, Debug)]
pub enum RenderError {
  /// A field contains a character CSV cannot carry.
  #[error("cannot encode field {field:?} in row {row}: contains NUL")]
  Unencodable { row: usize, field: String },

  #[error("JSON serialization failed: {0}")]
  Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReportError {
  #[error(transparent)]
  MalformedRow(#[from] MalformedRowError),

  #[error(transparent)]
  Render(#[from] RenderError),
}
