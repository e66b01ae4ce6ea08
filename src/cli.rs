use anyhow::{Result, bail};
use chrono::{DateTime, Duration, Local};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::Format;
use crate::util;
use crate::window;

#[derive(Parser, Debug)]
#[command(
    name = "note-activity-report",
    version,
    about = "Pivot approved notes into a per-author, per-hour activity table",
    long_about = None
)]
pub struct Cli {
  /// Path to the SQLite notes database
  #[arg(long, required_unless_present = "gen_man")]
  pub db: Option<PathBuf>,

  /// Trailing window, e.g. "1 day", "3 days", "2 weeks" (default: 1 day)
  #[arg(long)]
  pub since: Option<String>,

  /// Report over all history up to the start of today
  #[arg(long, conflicts_with = "since")]
  pub all_time: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = Format::Csv)]
  pub format: Format,

  /// Output file path (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Only log warnings and errors
  #[arg(long, short)]
  pub quiet: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

/// Since selection after defaults are applied.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum SinceSpec {
  AllTime,
  Phrase { phrase: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub db: String, // absolute path for stability
  pub since: SinceSpec,
  pub format: Format,
  pub out: String,
  pub quiet: bool,
  pub now_override: Option<String>,
}

impl EffectiveConfig {
  /// Resolve the since selection into a duration; `None` means unbounded.
  pub fn since_duration(&self, now: DateTime<Local>) -> Result<Option<Duration>> {
    match &self.since {
      SinceSpec::AllTime => Ok(None),
      SinceSpec::Phrase { phrase } => window::parse_since(phrase, now).map(Some),
    }
  }
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let Some(db) = cli.db.as_deref() else {
    bail!("--db is required");
  };

  let since = match (cli.all_time, cli.since) {
    (true, Some(_)) => bail!("Ambiguous window: choose only one of --since | --all-time"),
    (true, None) => SinceSpec::AllTime,
    (false, Some(p)) if p.trim().is_empty() => bail!("--since must not be empty"),
    (false, Some(p)) => SinceSpec::Phrase { phrase: p },
    (false, None) => SinceSpec::Phrase {
      phrase: format!("{} day", window::DEFAULT_SINCE_DAYS),
    },
  };

  if let Some(raw) = cli.now_override.as_deref() {
    if window::parse_now_override(Some(raw)).is_none() {
      bail!("invalid --now-override {raw:?}; expected RFC3339 or %Y-%m-%dT%H:%M:%S");
    }
  }

  Ok(EffectiveConfig {
    db: util::canonicalize_lossy(db),
    since,
    format: cli.format,
    out: cli.out,
    quiet: cli.quiet,
    now_override: cli.now_override,
  })
}
