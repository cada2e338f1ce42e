//! Reader for previously generated `template.lua` files.
//!
//! This is not a Lua parser: it accepts exactly the literal-table shape the
//! generator emits (header comment, require block, `flatten_template` control
//! list) and reconstructs the flattened control list for comparison. Text
//! edited beyond that shape fails with [`Error::MalformedLua`].

use crate::error::{Error, Result};
use crate::flatten::Control;
use crate::value::{Key, Table, Value};

/// One `local NAME = require 'MODULE'` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Require {
  pub var: String,
  pub module: String,
}

/// A parsed generated template: its require block and control list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateDoc {
  pub requires: Vec<Require>,
  pub controls: Vec<Control>,
}

/// Parse generated template text back into its control list.
pub fn parse(text: &str) -> Result<TemplateDoc> {
  let lines: Vec<&str> = text.lines().collect();
  let mut doc = TemplateDoc::default();
  let mut pos = 0usize;

  // Preamble: header comment and require block, up to the page_template open.
  let mut in_template = false;
  while pos < lines.len() {
    let lineno = pos + 1;
    let line = lines[pos].trim();
    pos += 1;

    if line.is_empty() || line.starts_with("--") {
      continue;
    }
    if line == "return gui_pkg.page_template {" {
      in_template = true;
      break;
    }
    if let Some(rest) = line.strip_prefix("local ") {
      if let Some(require) = parse_require(rest) {
        doc.requires.push(require);
      }
      // Non-require locals (bind, call, get_text) carry no structure.
      continue;
    }
    return Err(malformed(lineno, format!("unexpected line '{}'", line)));
  }

  if !in_template {
    return Err(Error::MalformedLua("no page_template found".to_string()));
  }

  match next_content(&lines, &mut pos) {
    Some((_, "flatten_template = {")) => {}
    Some((lineno, other)) => {
      return Err(malformed(lineno, format!("expected flatten_template, found '{}'", other)));
    }
    None => return Err(Error::MalformedLua("no flatten_template found".to_string())),
  }

  // Control blocks until the flatten_template table closes.
  loop {
    let Some((lineno, line)) = next_content(&lines, &mut pos) else {
      return Err(Error::MalformedLua("unterminated flatten_template".to_string()));
    };
    if line == "}" {
      break;
    }
    doc.controls.push(parse_control(&lines, &mut pos, lineno, line)?);
  }

  match next_content(&lines, &mut pos) {
    Some((_, "}")) => Ok(doc),
    Some((lineno, other)) => Err(malformed(lineno, format!("expected closing brace, found '{}'", other))),
    None => Err(Error::MalformedLua("unterminated page_template".to_string())),
  }
}

fn malformed(lineno: usize, message: String) -> Error {
  Error::MalformedLua(format!("line {}: {}", lineno, message))
}

/// Advance past blank and comment lines, returning the next trimmed line.
fn next_content<'a>(lines: &[&'a str], pos: &mut usize) -> Option<(usize, &'a str)> {
  while *pos < lines.len() {
    let lineno = *pos + 1;
    let line = lines[*pos].trim();
    *pos += 1;
    if !line.is_empty() && !line.starts_with("--") {
      return Some((lineno, line));
    }
  }
  None
}

/// Parse the tail of a `local ...` line, returning a [`Require`] when it is
/// a require binding.
fn parse_require(rest: &str) -> Option<Require> {
  let (var, rhs) = rest.split_once('=')?;
  let rhs = rhs.trim();
  let module = rhs.strip_prefix("require")?.trim();
  let module = module.strip_prefix('\'')?.strip_suffix('\'')?;
  Some(Require {
    var: var.trim().to_string(),
    module: module.to_string(),
  })
}

/// Parse one `wrapper.ctrl_type { ... },depth,` block starting at its header.
fn parse_control(lines: &[&str], pos: &mut usize, header_lineno: usize, header: &str) -> Result<Control> {
  let call = header
    .strip_suffix('{')
    .map(str::trim_end)
    .ok_or_else(|| malformed(header_lineno, format!("expected a control block, found '{}'", header)))?;
  let (wrapper, ctrl_type) = call
    .split_once('.')
    .filter(|(w, t)| is_ident(w) && is_ident(t))
    .ok_or_else(|| malformed(header_lineno, format!("unrecognized control call '{}'", call)))?;

  let mut props = Table::new();

  loop {
    let Some((lineno, line)) = next_content(lines, pos) else {
      return Err(malformed(header_lineno, "unterminated control block".to_string()));
    };

    if let Some(depth_text) = line.strip_prefix("},") {
      let depth_text = depth_text.strip_suffix(',').unwrap_or(depth_text);
      let depth = depth_text
        .trim()
        .parse::<i64>()
        .map_err(|_| malformed(lineno, format!("bad depth annotation '{}'", line)))?;
      return Ok(Control {
        wrapper: wrapper.to_string(),
        ctrl_type: ctrl_type.to_string(),
        props,
        depth,
      });
    }

    let (key, value) = parse_entry_line(line, lineno)?;
    let Key::Name(_) = &key else {
      return Err(malformed(lineno, format!("unexpected indexed property '{}'", line)));
    };
    let value = match value {
      EntryValue::Scalar(v) => v,
      EntryValue::TableOpen => Value::Table(parse_table_block(lines, pos, lineno)?),
    };
    props.push(key, value);
  }
}

/// Parse a nested `{ ... },` table block after its opening line.
fn parse_table_block(lines: &[&str], pos: &mut usize, open_lineno: usize) -> Result<Table> {
  let mut table = Table::new();

  loop {
    let Some((lineno, line)) = next_content(lines, pos) else {
      return Err(malformed(open_lineno, "unterminated table".to_string()));
    };

    if line == "}," {
      return Ok(table);
    }

    let (key, value) = parse_entry_line(line, lineno)?;
    let value = match value {
      EntryValue::Scalar(v) => v,
      EntryValue::TableOpen => Value::Table(parse_table_block(lines, pos, lineno)?),
    };
    table.push(key, value);
  }
}

enum EntryValue {
  Scalar(Value),
  TableOpen,
}

/// Parse one `key = value,` line into its key and value.
fn parse_entry_line(line: &str, lineno: usize) -> Result<(Key, EntryValue)> {
  let (key_text, value_text) = line
    .split_once('=')
    .ok_or_else(|| malformed(lineno, format!("expected 'key = value', found '{}'", line)))?;

  let key_text = key_text.trim();
  let key = if let Some(index) = key_text.strip_prefix('[').and_then(|k| k.strip_suffix(']')) {
    let index = index
      .parse::<i64>()
      .map_err(|_| malformed(lineno, format!("bad table index '{}'", key_text)))?;
    Key::Index(index)
  } else if is_ident(key_text) {
    Key::Name(key_text.to_string())
  } else {
    return Err(malformed(lineno, format!("bad property key '{}'", key_text)));
  };

  let value_text = value_text.trim();
  if value_text == "{" {
    return Ok((key, EntryValue::TableOpen));
  }

  let value_text = value_text
    .strip_suffix(',')
    .ok_or_else(|| malformed(lineno, format!("missing trailing comma in '{}'", line)))?
    .trim();

  if value_text == "{}" {
    return Ok((key, EntryValue::Scalar(Value::Table(Table::new()))));
  }

  Ok((key, EntryValue::Scalar(parse_scalar(value_text))))
}

/// Classify a generated scalar literal. Unrecognized tokens fall back to raw
/// strings rather than failing the whole parse.
fn parse_scalar(token: &str) -> Value {
  if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
    return Value::Str(token[1..token.len() - 1].to_string());
  }
  match token {
    "true" => return Value::Bool(true),
    "false" => return Value::Bool(false),
    "nil" => return Value::Nil,
    _ => {}
  }
  if token.contains('.') {
    if let Ok(f) = token.parse::<f64>() {
      return Value::Float(f);
    }
  } else if let Ok(i) = token.parse::<i64>() {
    return Value::Int(i);
  }
  Value::Str(token.to_string())
}

fn is_ident(s: &str) -> bool {
  !s.is_empty()
    && s
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
