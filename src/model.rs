use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column name for the author identifier; always the first header.
pub const AUTHOR_COLUMN: &str = "author";

/// Number of hour-of-day columns following the author column.
pub const HOURS_PER_DAY: u8 = 24;

/// One grouped row as returned by a note-count source.
///
/// Fields are signed so a misbehaving source can be detected rather than
/// silently wrapped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCount {
  pub author: String,
  pub hour: i64,
  pub count: i64,
}

impl RawCount {
  pub fn new(author: impl Into<String>, hour: i64, count: i64) -> Self {
    Self { author: author.into(), hour, count }
  }
}

/// One author's sparse hourly counts. A missing hour means "no data", not zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
  pub author: String,
  pub hours: BTreeMap<u8, u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
  pub headers: Vec<String>,
  pub rows: Vec<PivotRow>,
}

impl Table {
  pub fn new(rows: Vec<PivotRow>) -> Self {
    Self { headers: table_headers(), rows }
  }
}

/// Label used for an hour column, e.g. `11` -> `"11:00"`.
pub fn hour_label(hour: u8) -> String {
  format!("{hour}:00")
}

/// Inverse of [`hour_label`]; `None` for the author column or anything else.
pub fn parse_hour_label(label: &str) -> Option<u8> {
  let hour: u8 = label.strip_suffix(":00")?.parse().ok()?;
  (hour < HOURS_PER_DAY).then_some(hour)
}

/// The fixed 25-column header: `author, 0:00, 1:00, ..., 23:00`.
pub fn table_headers() -> Vec<String> {
  std::iter::once(AUTHOR_COLUMN.to_string())
    .chain((0..HOURS_PER_DAY).map(hour_label))
    .collect()
}
