// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Serialize a pivot Table as CSV (header first) or JSON
// role: rendering/output
// inputs: Table (fixed header + PivotRow sequence)
// outputs: Complete CSV/JSON text as a String
// side_effects: none; callers decide where the text goes
// invariants:
// - line 0 is the header; every line has exactly headers.len() cells
// - cell order follows header order; absent hours render as ""
// - fields containing comma, quote, CR or LF are quoted with doubled quotes
// errors: RenderError before any text is returned (never partial output)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::error::RenderError;
use crate::model::{AUTHOR_COLUMN, PivotRow, Table, parse_hour_label};

impl Table {
  /// Cells for one data row, aligned to `self.headers`.
  pub fn cells(&self, row: &PivotRow) -> Vec<String> {
    self
      .headers
      .iter()
      .map(|header| {
        if header == AUTHOR_COLUMN {
          return row.author.clone();
        }
        parse_hour_label(header)
          .and_then(|hour| row.hours.get(&hour))
          .map(|count| count.to_string())
          .unwrap_or_default()
      })
      .collect()
  }

  /// Render as CSV. The full text is built before returning.
  pub fn render(&self) -> Result<String, RenderError> {
    let mut out = String::new();
    push_line(&mut out, 0, &self.headers)?;
    for (i, row) in self.rows.iter().enumerate() {
      push_line(&mut out, i + 1, &self.cells(row))?;
    }
    Ok(out)
  }

  pub fn to_json(&self) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

fn push_line(out: &mut String, row: usize, fields: &[String]) -> Result<(), RenderError> {
  for (i, field) in fields.iter().enumerate() {
    if field.contains('\0') {
      return Err(RenderError::Unencodable { row, field: field.clone() });
    }
    if i > 0 {
      out.push(',');
    }
    out.push_str(&escape_csv(field));
  }
  out.push('\n');
  Ok(())
}

pub fn escape_csv(value: &str) -> String {
  let needs_quotes = value.contains([',', '"', '\n', '\r']);
  if needs_quotes {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}
