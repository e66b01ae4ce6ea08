use anyhow::{Result, bail};
use chrono::{DateTime, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone};
use chrono_english::{Interval, parse_duration};

/// Trailing window length when the caller does not pick one.
pub const DEFAULT_SINCE_DAYS: i64 = 1;

/// Half-open report window `[from, to)`. `from == None` is the unbounded past.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeWindow {
  pub from: Option<DateTime<Local>>,
  pub to: DateTime<Local>,
}

impl TimeWindow {
  /// `from = start_of_day(now - since)`, `to = start_of_day(now)`.
  ///
  /// A `since` reaching past the earliest representable date leaves `from`
  /// unbounded; [`parse_since`] rejects such phrases before they get here.
  pub fn trailing(since: Option<Duration>, now: DateTime<Local>) -> Self {
    Self {
      from: since.and_then(|d| now.checked_sub_signed(d)).map(start_of_day),
      to: start_of_day(now),
    }
  }

  pub fn default_since() -> Duration {
    Duration::days(DEFAULT_SINCE_DAYS)
  }

  pub fn is_unbounded(&self) -> bool {
    self.from.is_none()
  }

  #[cfg(test)]
  fn contains(&self, t: DateTime<Local>) -> bool {
    self.from.map_or(true, |f| t >= f) && t < self.to
  }
}

impl std::fmt::Display for TimeWindow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.from {
      Some(from) => write!(f, "[{}, {})", iso_naive(from), iso_naive(self.to)),
      None => write!(f, "[-inf, {})", iso_naive(self.to)),
    }
  }
}

/// Midnight of `dt`'s local date.
///
/// When midnight falls in a DST gap, the first valid instant of that day is used.
pub fn start_of_day(dt: DateTime<Local>) -> DateTime<Local> {
  let date = dt.date_naive();
  match date.and_hms_opt(0, 0, 0).map(|m| Local.from_local_datetime(&m)) {
    Some(LocalResult::Single(t)) => t,
    Some(LocalResult::Ambiguous(earliest, _)) => earliest,
    _ => first_valid_instant(date).unwrap_or(dt),
  }
}

fn first_valid_instant(date: NaiveDate) -> Option<DateTime<Local>> {
  (0..24 * 60).find_map(|minute| {
    let naive = date.and_hms_opt(minute / 60, minute % 60, 0)?;
    Local.from_local_datetime(&naive).earliest()
  })
}

pub fn iso_naive(dt: DateTime<Local>) -> String {
  dt.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse a human duration ("3 days", "2 weeks", "1 month", "3 days ago").
///
/// The sign is ignored: the window always reaches back from `now`. Months are
/// counted as calendar months back from `now`.
pub fn parse_since(phrase: &str, now: DateTime<Local>) -> Result<Duration> {
  let phrase = phrase.trim().to_lowercase();
  let interval = match parse_duration(&phrase) {
    Ok(i) => i,
    Err(e) => bail!("invalid --since {phrase:?}: {e}"),
  };
  let out_of_range = || anyhow::anyhow!("--since {phrase:?} reaches before the supported calendar");
  let since = match interval {
    Interval::Seconds(secs) => Duration::try_seconds(i64::from(secs).abs()).ok_or_else(out_of_range)?,
    Interval::Days(days) => Duration::try_days(i64::from(days).abs()).ok_or_else(out_of_range)?,
    Interval::Months(months) => {
      let back = Months::new(months.unsigned_abs());
      let start = now.checked_sub_months(back).ok_or_else(out_of_range)?;
      now - start
    }
  };
  if now.checked_sub_signed(since).is_none() {
    return Err(out_of_range());
  }
  Ok(since)
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}
