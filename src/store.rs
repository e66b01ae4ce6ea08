//! SQLite-backed note store and the grouped hourly query.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OpenFlags, params};

use crate::model::RawCount;
use crate::window::TimeWindow;

/// Anything that can produce grouped per-author, per-hour note counts.
///
/// Implementations return only approved notes inside the window, one row per
/// (author, hour) pair that has data.
pub trait NoteCountSource {
  fn hourly_counts(&self, window: &TimeWindow) -> Result<Vec<RawCount>>;
}

/// Timestamp layout in the `notes.created_at` column (local wall time).
pub const DB_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA: &str = r#"
  CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    approved TEXT NOT NULL DEFAULT 'false',
    created_at TEXT NOT NULL
  );

  CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes(created_at);
  CREATE INDEX IF NOT EXISTS idx_notes_author ON notes(author);
"#;

const COUNTS_BOUNDED: &str = "SELECT author, CAST(strftime('%H', created_at) AS INTEGER) AS hour, COUNT(id)
   FROM notes
   WHERE approved = 'true' AND created_at >= ?1 AND created_at < ?2
   GROUP BY author, hour
   ORDER BY MIN(id), hour";

const COUNTS_UNBOUNDED: &str = "SELECT author, CAST(strftime('%H', created_at) AS INTEGER) AS hour, COUNT(id)
   FROM notes
   WHERE approved = 'true' AND created_at < ?1
   GROUP BY author, hour
   ORDER BY MIN(id), hour";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNote {
  pub author: String,
  pub body: String,
  pub approved: bool,
  pub created_at: DateTime<Local>,
}

pub struct NoteStore {
  conn: Connection,
}

impl NoteStore {
  pub fn open(path: &Path) -> Result<Self> {
    let conn = Connection::open(path).with_context(|| format!("opening note database {}", path.display()))?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  /// Open an existing database read-only for reporting. A missing file is an
  /// error; nothing is created and no schema is written.
  pub fn open_existing(path: &Path) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)
      .with_context(|| format!("opening note database {}", path.display()))?;
    Ok(Self { conn })
  }

  pub fn open_in_memory() -> Result<Self> {
    let store = Self { conn: Connection::open_in_memory()? };
    store.init_schema()?;
    Ok(store)
  }

  pub fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA).context("creating notes schema")?;
    Ok(())
  }

  pub fn insert_note(&self, note: &NewNote) -> Result<i64> {
    self.conn.execute(
      "INSERT INTO notes (author, body, approved, created_at) VALUES (?1, ?2, ?3, ?4)",
      params![
        note.author,
        note.body,
        if note.approved { "true" } else { "false" },
        db_time(note.created_at),
      ],
    )?;
    Ok(self.conn.last_insert_rowid())
  }

  fn query_counts<P: rusqlite::Params>(&self, sql: &str, params: P) -> rusqlite::Result<Vec<RawCount>> {
    let mut stmt = self.conn.prepare(sql)?;
    let rows = stmt.query_map(params, raw_count)?;
    let counts = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
  }
}

impl NoteCountSource for NoteStore {
  fn hourly_counts(&self, window: &TimeWindow) -> Result<Vec<RawCount>> {
    let to = db_time(window.to);
    let counts = match window.from {
      Some(from) => self.query_counts(COUNTS_BOUNDED, params![db_time(from), to]),
      None => self.query_counts(COUNTS_UNBOUNDED, params![to]),
    }
    .context("querying hourly note counts")?;
    tracing::debug!(rows = counts.len(), %window, "fetched hourly note counts");
    Ok(counts)
  }
}

fn raw_count(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCount> {
  Ok(RawCount {
    author: row.get(0)?,
    hour: row.get(1)?,
    count: row.get(2)?,
  })
}

fn db_time(dt: DateTime<Local>) -> String {
  dt.naive_local().format(DB_TIME_FORMAT).to_string()
}
