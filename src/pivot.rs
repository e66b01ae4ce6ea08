// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fold grouped (author, hour, count) rows into one sparse hourly row per author
// role: core/aggregation
// inputs: Iterator of RawCount, already filtered to the window and to approved notes
// outputs: Vec<PivotRow> in first-seen author order
// side_effects: none
// invariants:
// - every distinct input author yields exactly one PivotRow
// - duplicate (author, hour) pairs resolve last-write-wins
// - hour outside 0..=23 or a negative count is rejected, never stored
// errors: MalformedRowError naming the offending record
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::error::MalformedRowError;
use crate::model::{HOURS_PER_DAY, PivotRow, RawCount};

/// Ordered author -> (hour, count) accumulator.
///
/// Authors keep their first-seen position; each one gets an empty entry
/// list the first time it is seen.
#[derive(Debug, Default)]
pub struct HourlyPivot {
  authors: IndexMap<String, Vec<(u8, u64)>>,
}

impl HourlyPivot {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append one source row to its author's entry list.
  pub fn push(&mut self, raw: RawCount) -> Result<(), MalformedRowError> {
    let (hour, count) = validate(&raw)?;
    self.authors.entry(raw.author).or_insert_with(Vec::new).push((hour, count));
    Ok(())
  }

  pub fn author_count(&self) -> usize {
    self.authors.len()
  }

  /// Collapse each author's entries into a row; later entries overwrite earlier ones.
  pub fn into_rows(self) -> Vec<PivotRow> {
    self
      .authors
      .into_iter()
      .map(|(author, entries)| {
        let mut hours = BTreeMap::new();
        for (hour, count) in entries {
          hours.insert(hour, count);
        }
        PivotRow { author, hours }
      })
      .collect()
  }
}

fn validate(raw: &RawCount) -> Result<(u8, u64), MalformedRowError> {
  let malformed = |reason| MalformedRowError {
    author: raw.author.clone(),
    hour: raw.hour,
    count: raw.count,
    reason,
  };
  let hour = u8::try_from(raw.hour)
    .ok()
    .filter(|h| *h < HOURS_PER_DAY)
    .ok_or_else(|| malformed("hour outside 0..=23"))?;
  let count = u64::try_from(raw.count).map_err(|_| malformed("negative count"))?;
  Ok((hour, count))
}

/// Pivot a whole input sequence. Empty input gives an empty result.
pub fn pivot_counts<I>(rows: I) -> Result<Vec<PivotRow>, MalformedRowError>
where
  I: IntoIterator<Item = RawCount>,
{
  let mut pivot = HourlyPivot::new();
  for raw in rows {
    pivot.push(raw)?;
  }
  tracing::debug!(authors = pivot.author_count(), "pivoted note counts");
  Ok(pivot.into_rows())
}
