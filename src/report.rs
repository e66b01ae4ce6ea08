// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Compose window -> source query -> pivot -> table for one report run
// role: processing/orchestrator
// inputs: optional since Duration, now, any NoteCountSource
// outputs: Table, or its rendered CSV/JSON text
// side_effects: reads from the source only
// invariants:
// - a source error returns before any aggregation starts
// - every run builds a fresh pivot; nothing is shared between runs
// errors: source errors pass through unchanged; MalformedRowError/RenderError surfaced via ReportError
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::Table;
use crate::pivot::pivot_counts;
use crate::store::NoteCountSource;
use crate::window::TimeWindow;

pub const REPORT_TITLE: &str = "Note Log Tracking";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Format {
  #[default]
  Csv,
  Json,
}

#[derive(Clone, Debug)]
pub struct NoteTrackingReport {
  pub title: &'static str,
  pub window: TimeWindow,
}

impl NoteTrackingReport {
  /// `since = None` reports over all history up to the start of today.
  pub fn new(since: Option<Duration>, now: DateTime<Local>) -> Self {
    Self {
      title: REPORT_TITLE,
      window: TimeWindow::trailing(since, now),
    }
  }

  pub fn build<S: NoteCountSource + ?Sized>(&self, source: &S) -> Result<Table> {
    let counts = source.hourly_counts(&self.window)?;
    tracing::info!(
      window = %self.window,
      unbounded = self.window.is_unbounded(),
      rows = counts.len(),
      "building {}",
      self.title
    );
    let rows = pivot_counts(counts).map_err(ReportError::from)?;
    Ok(Table::new(rows))
  }

  pub fn to_csv<S: NoteCountSource + ?Sized>(&self, source: &S) -> Result<String> {
    self.render(source, Format::Csv)
  }

  pub fn render<S: NoteCountSource + ?Sized>(&self, source: &S, format: Format) -> Result<String> {
    let table = self.build(source)?;
    let text = match format {
      Format::Csv => table.render(),
      Format::Json => table.to_json(),
    }
    .map_err(ReportError::from)?;
    Ok(text)
  }
}
