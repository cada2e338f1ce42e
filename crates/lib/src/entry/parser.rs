//! Line-oriented parser for the entry data dialect.

use tracing::{debug, warn};

use crate::consts::CONFIG_SECTION;
use crate::entry::{EntryData, FieldWarning, Section};
use crate::error::{Error, Result};
use crate::value::{Key, Table, Value, classify_scalar};

/// Parse entry data text into its config table and ordered widget sections.
///
/// Declaration order of sections and of fields within a section is preserved.
/// Lines starting with `--` and blank lines are skipped. Any other line that
/// matches neither the section-header nor the field grammar fails with
/// [`Error::MalformedConfig`] carrying the 1-based line number.
pub fn parse(text: &str) -> Result<EntryData> {
  let mut data = EntryData::default();
  let mut current: Option<(String, Table)> = None;
  let mut collecting: Option<Collecting> = None;

  for (idx, line) in text.lines().enumerate() {
    let lineno = idx + 1;
    let stripped = line.trim();

    // A multi-line table value swallows every line until its braces balance.
    if let Some(c) = collecting.as_mut() {
      c.buffer.push(line.to_string());
      c.depth += brace_delta(stripped);
      if c.depth <= 0 {
        let c = collecting.take().expect("collecting state present");
        let (section, fields) = current.as_mut().expect("collecting implies open section");
        let table = parse_table_text(
          &c.buffer.join("\n"),
          section,
          &c.key,
          &mut data.warnings,
        );
        fields.push(Key::Name(c.key), Value::Table(table));
      }
      continue;
    }

    if stripped.is_empty() || stripped.starts_with("--") {
      continue;
    }

    if stripped.starts_with('[') {
      let name = parse_section_header(stripped, lineno)?;
      if let Some((prev_name, prev_fields)) = current.take() {
        finish_section(&mut data, prev_name, prev_fields);
      }
      if name != CONFIG_SECTION && data.section(&name).is_some() {
        return Err(Error::malformed(lineno, format!("duplicate section '{}'", name)));
      }
      current = Some((name, Table::new()));
      continue;
    }

    let (section, fields) = match current.as_mut() {
      Some(open) => (&open.0, &mut open.1),
      None => {
        return Err(Error::malformed(lineno, "field before any section header"));
      }
    };

    let (key, value_part) = parse_field_line(stripped, lineno)?;
    let trimmed = value_part.trim();

    if trimmed.starts_with('{') {
      let depth = brace_delta(trimmed);
      if depth == 0 {
        let table = parse_table_text(trimmed, section, &key, &mut data.warnings);
        fields.push(Key::Name(key), Value::Table(table));
      } else {
        collecting = Some(Collecting {
          key,
          buffer: vec![value_part.to_string()],
          depth,
          start_line: lineno,
        });
      }
      continue;
    }

    let classified = classify_scalar(trimmed);
    if classified.ambiguous {
      warn!(section = %section, field = %key, raw = %trimmed, "ambiguous field value kept as string");
      data.warnings.push(FieldWarning {
        section: section.clone(),
        field: key.clone(),
        raw: trimmed.to_string(),
      });
    }
    fields.push(Key::Name(key), classified.value);
  }

  if let Some(c) = collecting {
    return Err(Error::malformed(
      c.start_line,
      format!("unterminated table value for field '{}'", c.key),
    ));
  }

  if let Some((name, fields)) = current {
    finish_section(&mut data, name, fields);
  }

  Ok(data)
}

struct Collecting {
  key: String,
  buffer: Vec<String>,
  depth: i32,
  start_line: usize,
}

fn brace_delta(s: &str) -> i32 {
  let opens = s.matches('{').count() as i32;
  let closes = s.matches('}').count() as i32;
  opens - closes
}

fn finish_section(data: &mut EntryData, name: String, fields: Table) {
  if name == CONFIG_SECTION {
    data.config = fields;
  } else {
    data.sections.push(Section { name, fields });
  }
}

/// Parse a `[name]` or `['name']` header, stripping the quotes.
fn parse_section_header(line: &str, lineno: usize) -> Result<String> {
  let inner = line
    .strip_prefix('[')
    .and_then(|rest| rest.strip_suffix(']'))
    .ok_or_else(|| Error::malformed(lineno, "unterminated section header"))?;
  if inner.is_empty() {
    return Err(Error::malformed(lineno, "empty section header"));
  }
  let name = if inner.len() >= 2 && inner.starts_with('\'') && inner.ends_with('\'') {
    &inner[1..inner.len() - 1]
  } else {
    inner
  };
  Ok(name.to_string())
}

/// Parse the `'key' = value` shape of a field line, returning the key and the
/// raw value text after the `=`.
fn parse_field_line(line: &str, lineno: usize) -> Result<(String, &str)> {
  let rest = line
    .strip_prefix('\'')
    .ok_or_else(|| Error::malformed(lineno, "expected 'key' = value"))?;
  let quote = rest
    .find('\'')
    .ok_or_else(|| Error::malformed(lineno, "unterminated field key"))?;
  let key = &rest[..quote];
  let after = rest[quote + 1..].trim_start();
  let value = after
    .strip_prefix('=')
    .ok_or_else(|| Error::malformed(lineno, format!("missing '=' after field key '{}'", key)))?;
  Ok((key.to_string(), value))
}

/// Parse a balanced `{ ... }` body into a [`Table`].
///
/// Entries are comma-separated at the top brace level; each is either
/// `'key' = value` or `index = value`, with values recursing through the same
/// classifier. Entries matching neither shape are dropped, as the editor never
/// writes them.
fn parse_table_text(text: &str, section: &str, path: &str, warnings: &mut Vec<FieldWarning>) -> Table {
  let mut table = Table::new();
  let trimmed = text.trim();

  let Some(inner) = trimmed
    .strip_prefix('{')
    .and_then(|rest| rest.strip_suffix('}'))
  else {
    return table;
  };
  if inner.trim().is_empty() {
    return table;
  }

  for pair in split_table_pairs(inner) {
    let pair = pair.trim();
    if pair.is_empty() {
      continue;
    }

    let Some((key, value_text)) = parse_table_pair(pair) else {
      debug!(section = %section, path = %path, pair = %pair, "skipping unrecognized table entry");
      continue;
    };

    let value_text = value_text.trim();
    let entry_path = match &key {
      Key::Name(n) => format!("{}.{}", path, n),
      Key::Index(i) => format!("{}[{}]", path, i),
    };

    if value_text.starts_with('{') {
      let nested = parse_table_text(value_text, section, &entry_path, warnings);
      table.push(key, Value::Table(nested));
      continue;
    }

    let classified = classify_scalar(value_text);
    if classified.ambiguous {
      warn!(section = %section, field = %entry_path, raw = %value_text, "ambiguous field value kept as string");
      warnings.push(FieldWarning {
        section: section.to_string(),
        field: entry_path,
        raw: value_text.to_string(),
      });
    }
    table.push(key, classified.value);
  }

  table
}

/// Split a table body into its top-level comma-separated entries, leaving
/// nested braces intact.
fn split_table_pairs(inner: &str) -> Vec<String> {
  let mut pairs = Vec::new();
  let mut current = String::new();
  let mut depth = 0i32;

  for ch in inner.chars() {
    match ch {
      '{' => {
        depth += 1;
        current.push(ch);
      }
      '}' => {
        depth -= 1;
        current.push(ch);
      }
      ',' if depth == 0 => {
        pairs.push(std::mem::take(&mut current));
      }
      _ => current.push(ch),
    }
  }

  if !current.is_empty() {
    pairs.push(current);
  }

  pairs
}

/// Parse one table entry into its key and raw value text.
fn parse_table_pair(pair: &str) -> Option<(Key, &str)> {
  if let Some(rest) = pair.strip_prefix('\'') {
    let quote = rest.find('\'')?;
    let key = &rest[..quote];
    let value = rest[quote + 1..].trim_start().strip_prefix('=')?;
    return Some((Key::Name(key.to_string()), value));
  }

  let digits: usize = pair.chars().take_while(|c| c.is_ascii_digit()).count();
  if digits > 0 {
    let index: i64 = pair[..digits].parse().ok()?;
    let value = pair[digits..].trim_start().strip_prefix('=')?;
    return Some((Key::Index(index), value));
  }

  None
}
