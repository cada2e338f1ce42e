//! Conversion and validation drivers.
//!
//! These tie the readers, generator, and comparator to the project layout.
//! Batch runs isolate per-component failures: one malformed component is
//! recorded and processing continues with the rest.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::compare::{self, Report};
use crate::consts::BACKUP_EXTENSION;
use crate::entry::FieldWarning;
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::r#gen;
use crate::project::{Component, Project};
use crate::template;
use crate::widget::build_tree;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
  /// Render everything but write nothing.
  pub dry_run: bool,
}

/// Result of converting one component.
#[derive(Debug)]
pub struct ConvertOutcome {
  pub component: String,
  /// Section names the component declares, in declaration order.
  pub sections: Vec<String>,
  pub template_path: PathBuf,
  /// The generated template text (written unless dry-run).
  pub lua: String,
  /// Backup of the previous template, when one existed.
  pub backup_path: Option<PathBuf>,
  /// The logic file, when it was created from boilerplate.
  pub logic_created: Option<PathBuf>,
  /// Ambiguous-classification warnings from the config reader.
  pub warnings: Vec<FieldWarning>,
}

/// Result of a batch conversion.
#[derive(Debug, Default)]
pub struct BatchOutcome {
  pub converted: Vec<ConvertOutcome>,
  /// Internal components excluded from conversion.
  pub skipped: Vec<String>,
  pub failed: Vec<(String, Error)>,
}

/// Convert one component by display or directory name.
pub fn convert_component(
  project: &Project,
  name: &str,
  options: &ConvertOptions,
) -> Result<ConvertOutcome> {
  let component = project.find_component(name)?;
  convert_discovered(project, &component, options)
}

/// Convert every non-internal component, isolating per-component failures.
pub fn convert_all(project: &Project, options: &ConvertOptions) -> Result<BatchOutcome> {
  let mut outcome = BatchOutcome::default();

  for component in project.list_components()? {
    if component.is_internal() {
      info!(component = %component.dir_name, "skipping internal component");
      outcome.skipped.push(component.dir_name.clone());
      continue;
    }
    let name = component.effective_name().to_string();
    match convert_discovered(project, &component, options) {
      Ok(converted) => outcome.converted.push(converted),
      Err(err) => {
        warn!(component = %name, error = %err, "conversion failed");
        outcome.failed.push((name, err));
      }
    }
  }

  Ok(outcome)
}

fn convert_discovered(
  project: &Project,
  component: &Component,
  options: &ConvertOptions,
) -> Result<ConvertOutcome> {
  let entry = project.read_entry_data(component)?;
  let tree = build_tree(&entry)?;
  let lua = r#gen::generate(&tree);

  let name = component.effective_name().to_string();
  let template_path = project.template_path(&name);
  let mut outcome = ConvertOutcome {
    component: name.clone(),
    sections: entry.section_names().map(str::to_string).collect(),
    template_path: template_path.clone(),
    lua,
    backup_path: None,
    logic_created: None,
    warnings: entry.warnings,
  };

  if options.dry_run {
    return Ok(outcome);
  }

  fs::create_dir_all(project.page_dir(&name))?;

  if template_path.exists() {
    let backup_path = template_path.with_extension(BACKUP_EXTENSION);
    fs::copy(&template_path, &backup_path)?;
    outcome.backup_path = Some(backup_path);
  }
  fs::write(&template_path, &outcome.lua)?;
  info!(component = %name, path = %template_path.display(), "wrote template");

  let logic_path = project.logic_path(&name);
  if !logic_path.exists() {
    fs::write(&logic_path, r#gen::logic_boilerplate(&name))?;
    outcome.logic_created = Some(logic_path);
  }

  Ok(outcome)
}

/// Per-component validation verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationStatus {
  /// Generated output structurally matches the existing file.
  Passed,
  /// Semantic differences between generated and existing output.
  Mismatch { report: Report },
  /// The existing output could not be parsed back for comparison.
  CannotVerify { reason: String },
  /// No existing output to compare against.
  NoReference,
  /// The component's own config failed to parse or convert.
  Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
  pub component: String,
  #[serde(flatten)]
  pub status: ValidationStatus,
}

impl ValidationOutcome {
  pub fn passed(&self) -> bool {
    matches!(
      self.status,
      ValidationStatus::Passed | ValidationStatus::NoReference
    )
  }
}

/// Validate one component by display or directory name.
pub fn validate_component(project: &Project, name: &str) -> Result<ValidationOutcome> {
  let component = project.find_component(name)?;
  Ok(validate_discovered(project, &component))
}

/// Validate every non-internal component.
pub fn validate_all(project: &Project) -> Result<Vec<ValidationOutcome>> {
  let mut outcomes = Vec::new();
  for component in project.list_components()? {
    if component.is_internal() {
      continue;
    }
    outcomes.push(validate_discovered(project, &component));
  }
  Ok(outcomes)
}

fn validate_discovered(project: &Project, component: &Component) -> ValidationOutcome {
  let name = component.effective_name().to_string();
  let template_path = project.template_path(&name);

  if !template_path.is_file() {
    return ValidationOutcome {
      component: name,
      status: ValidationStatus::NoReference,
    };
  }

  let generated = match project
    .read_entry_data(component)
    .and_then(|entry| build_tree(&entry))
  {
    Ok(tree) => flatten(&tree),
    Err(err) => {
      warn!(component = %name, error = %err, "validation failed before comparison");
      return ValidationOutcome {
        component: name,
        status: ValidationStatus::Failed {
          reason: err.to_string(),
        },
      };
    }
  };

  let existing = match fs::read_to_string(&template_path)
    .map_err(Error::from)
    .and_then(|text| template::parse(&text))
  {
    Ok(doc) => doc.controls,
    Err(err) => {
      return ValidationOutcome {
        component: name,
        status: ValidationStatus::CannotVerify {
          reason: err.to_string(),
        },
      };
    }
  };

  let report = compare::compare(&generated, &existing);
  let status = if report.is_match() {
    ValidationStatus::Passed
  } else {
    ValidationStatus::Mismatch { report }
  };
  ValidationOutcome {
    component: name,
    status,
  }
}
