use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};
use note_activity_report::{NewNote, NoteStore};

/// Pinned "now" for CLI runs; the default window is then 2025-08-14.
#[allow(dead_code)]
pub const NOW: &str = "2025-08-15T12:00:00";

pub fn local(s: &str) -> DateTime<Local> {
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
    .unwrap()
    .and_local_timezone(Local)
    .single()
    .unwrap()
}

fn note(author: &str, approved: bool, at: &str) -> NewNote {
  NewNote {
    author: author.into(),
    body: format!("note by {author}"),
    approved,
    created_at: local(at),
  }
}

/// Seed a notes database inside a fresh temp dir.
///
/// Inside the 2025-08-14 window: tina 2x at 11h and 1x at 12h, sam 1x at 11h,
/// plus one unapproved tina note. Outside it: "old" on 2025-08-01 and
/// "today" on 2025-08-15.
#[allow(dead_code)]
pub fn fixture_db() -> (tempfile::TempDir, PathBuf) {
  let dir = test_support::tempdir();
  let path = dir.path().join("notes.db");
  let store = NoteStore::open(&path).unwrap();

  for n in [
    note("tina", true, "2025-08-14T11:05:00"),
    note("tina", true, "2025-08-14T11:45:00"),
    note("sam", true, "2025-08-14T11:10:00"),
    note("tina", true, "2025-08-14T12:00:00"),
    note("tina", false, "2025-08-14T12:30:00"),
    note("old", true, "2025-08-01T09:00:00"),
    note("today", true, "2025-08-15T00:00:00"),
  ] {
    store.insert_note(&n).unwrap();
  }

  (dir, path)
}

#[allow(dead_code)]
pub fn empty_db() -> (tempfile::TempDir, PathBuf) {
  let dir = test_support::tempdir();
  let path = dir.path().join("notes.db");
  NoteStore::open(&path).unwrap();
  (dir, path)
}
