//! Structural comparison of two flattened control lists.
//!
//! Controls pair up by their `name` property (positional index for unnamed
//! controls); paired controls diff over the union of their properties. Values
//! are normalized before comparison, so formatting differences that survive
//! parsing — `1` vs `1.0`, padded strings, table entry order — never show up
//! as findings. An empty report means semantic match.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::flatten::Control;
use crate::value::{Key, Table, Value};

/// The side of a comparison a control or field is absent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
  Generated,
  Existing,
}

/// One reported discrepancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
  /// A control present on only one side.
  MissingControl { path: String, missing_on: Side },
  /// A property present on only one side of a paired control.
  MissingField {
    path: String,
    field: String,
    missing_on: Side,
  },
  /// A property present on both sides with different normalized values.
  Mismatch {
    path: String,
    field: String,
    generated: String,
    existing: String,
  },
}

/// An ordered list of discrepancies; empty means the trees match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
  pub findings: Vec<Finding>,
}

impl Report {
  pub fn is_match(&self) -> bool {
    self.findings.is_empty()
  }

  pub fn len(&self) -> usize {
    self.findings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.findings.is_empty()
  }
}

/// Diff two flattened control lists.
pub fn compare(generated: &[Control], existing: &[Control]) -> Report {
  let mut report = Report::default();

  let existing_index: HashMap<String, usize> = existing
    .iter()
    .enumerate()
    .map(|(i, c)| (control_path(c, i), i))
    .collect();
  let mut matched = vec![false; existing.len()];

  for (i, r#gen) in generated.iter().enumerate() {
    let path = control_path(r#gen, i);
    match existing_index.get(&path) {
      Some(&j) if !matched[j] => {
        matched[j] = true;
        diff_controls(&path, r#gen, &existing[j], &mut report);
      }
      _ => report.findings.push(Finding::MissingControl {
        path,
        missing_on: Side::Existing,
      }),
    }
  }

  for (j, exist) in existing.iter().enumerate() {
    if !matched[j] {
      report.findings.push(Finding::MissingControl {
        path: control_path(exist, j),
        missing_on: Side::Generated,
      });
    }
  }

  report
}

/// A control's report path: its `name` property, or `#index` when unnamed.
fn control_path(control: &Control, index: usize) -> String {
  match control.name() {
    Some(name) => name.to_string(),
    None => format!("#{}", index),
  }
}

fn diff_controls(path: &str, r#gen: &Control, exist: &Control, report: &mut Report) {
  if r#gen.wrapper != exist.wrapper {
    report.findings.push(Finding::Mismatch {
      path: path.to_string(),
      field: "wrapper".to_string(),
      generated: r#gen.wrapper.clone(),
      existing: exist.wrapper.clone(),
    });
  }
  if r#gen.ctrl_type != exist.ctrl_type {
    report.findings.push(Finding::Mismatch {
      path: path.to_string(),
      field: "type".to_string(),
      generated: r#gen.ctrl_type.clone(),
      existing: exist.ctrl_type.clone(),
    });
  }
  if r#gen.depth != exist.depth {
    report.findings.push(Finding::Mismatch {
      path: path.to_string(),
      field: "depth".to_string(),
      generated: r#gen.depth.to_string(),
      existing: exist.depth.to_string(),
    });
  }

  for (key, gen_value) in r#gen.props.iter() {
    let field = key_label(key);
    match exist.props.get_key(key) {
      None => report.findings.push(Finding::MissingField {
        path: path.to_string(),
        field,
        missing_on: Side::Existing,
      }),
      Some(exist_value) => {
        if !values_equal(gen_value, exist_value) {
          report.findings.push(Finding::Mismatch {
            path: path.to_string(),
            field,
            generated: gen_value.to_string(),
            existing: exist_value.to_string(),
          });
        }
      }
    }
  }

  for (key, _) in exist.props.iter() {
    if r#gen.props.get_key(key).is_none() {
      report.findings.push(Finding::MissingField {
        path: path.to_string(),
        field: key_label(key),
        missing_on: Side::Generated,
      });
    }
  }
}

fn key_label(key: &Key) -> String {
  match key {
    Key::Name(n) => n.clone(),
    Key::Index(i) => format!("[{}]", i),
  }
}

/// Normalized value equality: numbers compare numerically across the
/// integer/float split, strings compare post-trim, tables compare
/// structurally ignoring entry order.
fn values_equal(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Nil, Value::Nil) => true,
    (Value::Bool(x), Value::Bool(y)) => x == y,
    (Value::Int(x), Value::Int(y)) => x == y,
    (Value::Float(x), Value::Float(y)) => x == y,
    (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
    (Value::Str(x), Value::Str(y)) => x.trim() == y.trim(),
    (Value::Table(x), Value::Table(y)) => tables_equal(x, y),
    _ => false,
  }
}

fn tables_equal(a: &Table, b: &Table) -> bool {
  if a.len() != b.len() {
    return false;
  }
  a.iter().all(|(key, value)| {
    b.get_key(key)
      .is_some_and(|other| values_equal(value, other))
  })
}

impl fmt::Display for Side {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Side::Generated => write!(f, "generated"),
      Side::Existing => write!(f, "existing"),
    }
  }
}

impl fmt::Display for Finding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Finding::MissingControl { path, missing_on } => {
        write!(f, "{}: missing on {} side", path, missing_on)
      }
      Finding::MissingField {
        path,
        field,
        missing_on,
      } => write!(f, "{}.{}: missing on {} side", path, field, missing_on),
      Finding::Mismatch {
        path,
        field,
        generated,
        existing,
      } => write!(
        f,
        "{}.{}: generated {} != existing {}",
        path, field, generated, existing
      ),
    }
  }
}
