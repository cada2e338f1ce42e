//! Implementation of the `view2lua validate` command.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use view2lua_lib::convert::{ValidationOutcome, ValidationStatus, validate_all, validate_component};
use view2lua_lib::project::Project;

/// Discrepancy lines printed per mismatching component.
const FINDING_LIMIT: usize = 20;

/// Execute the validate command.
///
/// Regenerates each component in memory and structurally diffs the result
/// against the existing `template.lua`. With `--json` the outcomes are
/// emitted as a JSON document instead of text. Exits non-zero when any
/// component mismatches, fails, or cannot be verified.
pub fn cmd_validate(project: &Project, component: Option<&str>, json: bool) -> Result<()> {
  let outcomes = match component {
    Some(name) => vec![
      validate_component(project, name)
        .with_context(|| format!("Failed to validate component '{}'", name))?,
    ],
    None => validate_all(project).context("Failed to enumerate components")?,
  };

  if json {
    let report = serde_json::to_string_pretty(&outcomes).context("Failed to serialize report")?;
    println!("{}", report);
  } else {
    print_outcomes(&outcomes);
  }

  if outcomes.iter().any(|outcome| !outcome.passed()) {
    std::process::exit(1);
  }
  Ok(())
}

fn print_outcomes(outcomes: &[ValidationOutcome]) {
  for outcome in outcomes {
    match &outcome.status {
      ValidationStatus::Passed => {
        println!("{} {}", "✓".green().bold(), outcome.component);
      }
      ValidationStatus::NoReference => {
        println!(
          "{} {} (no existing template, skipped)",
          "-".dimmed(),
          outcome.component
        );
      }
      ValidationStatus::CannotVerify { reason } => {
        println!(
          "{} {} (cannot verify: {})",
          "?".yellow().bold(),
          outcome.component,
          reason
        );
      }
      ValidationStatus::Failed { reason } => {
        println!("{} {} ({})", "✗".red().bold(), outcome.component, reason);
      }
      ValidationStatus::Mismatch { report } => {
        println!(
          "{} {} ({} discrepancies)",
          "✗".red().bold(),
          outcome.component,
          report.len()
        );
        for finding in report.findings.iter().take(FINDING_LIMIT) {
          println!("    {}", finding);
        }
        if report.len() > FINDING_LIMIT {
          println!("    ... and {} more", report.len() - FINDING_LIMIT);
        }
      }
    }
  }

  let passed = outcomes.iter().filter(|o| o.passed()).count();
  println!();
  println!("Passed: {}, Failed: {}", passed, outcomes.len() - passed);
}
