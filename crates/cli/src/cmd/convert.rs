//! Implementation of the `view2lua convert` and `convert-all` commands.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use view2lua_lib::convert::{ConvertOptions, ConvertOutcome, convert_all, convert_component};
use view2lua_lib::project::Project;

/// Dry-run output is capped so large components stay readable.
const PREVIEW_LIMIT: usize = 2000;

/// Execute the convert command for one component.
///
/// Writes the generated `template.lua` (backing up any previous version) and
/// creates the boilerplate `component.lua` when absent. With `--dry-run`,
/// prints a preview instead of writing.
pub fn cmd_convert(project: &Project, name: &str, dry_run: bool) -> Result<()> {
  let options = ConvertOptions { dry_run };
  let outcome = convert_component(project, name, &options)
    .with_context(|| format!("Failed to convert component '{}'", name))?;

  print_warnings(&outcome);

  if dry_run {
    println!(
      "{} {} (dry run, nothing written)",
      "::".cyan().bold(),
      outcome.component
    );
    println!("Would write: {}", outcome.template_path.display());
    println!();
    let preview: String = outcome.lua.chars().take(PREVIEW_LIMIT).collect();
    println!("{}", preview);
    if outcome.lua.len() > PREVIEW_LIMIT {
      println!("... ({} characters total)", outcome.lua.len());
    }
    return Ok(());
  }

  println!(
    "{} {} -> {}",
    "✓".green().bold(),
    outcome.component,
    outcome.template_path.display()
  );
  println!("  sections: {}", outcome.sections.join(", "));
  if let Some(backup) = &outcome.backup_path {
    println!("  backed up previous template to {}", backup.display());
  }
  if let Some(logic) = &outcome.logic_created {
    println!("  created logic file {}", logic.display());
  }

  Ok(())
}

/// Execute the convert-all command.
///
/// Converts every non-internal component; one component's failure never
/// aborts the batch. Exits non-zero when any component failed.
pub fn cmd_convert_all(project: &Project, dry_run: bool) -> Result<()> {
  let started = Instant::now();
  let options = ConvertOptions { dry_run };
  let outcome = convert_all(project, &options).context("Failed to enumerate components")?;

  for skipped in &outcome.skipped {
    println!("{} {} (internal, skipped)", "-".dimmed(), skipped);
  }
  for converted in &outcome.converted {
    print_warnings(converted);
    let verb = if dry_run { "would write" } else { "wrote" };
    println!(
      "{} {} ({} {})",
      "✓".green().bold(),
      converted.component,
      verb,
      converted.template_path.display()
    );
  }
  for (name, err) in &outcome.failed {
    println!("{} {} ({})", "✗".red().bold(), name, err);
  }

  let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
  info!(
    converted = outcome.converted.len(),
    failed = outcome.failed.len(),
    "batch conversion finished"
  );
  println!();
  println!(
    "Converted: {}, Failed: {}, Skipped: {} ({})",
    outcome.converted.len(),
    outcome.failed.len(),
    outcome.skipped.len(),
    humantime::format_duration(elapsed)
  );

  if !outcome.failed.is_empty() {
    std::process::exit(1);
  }
  Ok(())
}

fn print_warnings(outcome: &ConvertOutcome) {
  for warning in &outcome.warnings {
    println!(
      "{} [{}] {}: ambiguous value '{}' kept as string",
      "!".yellow().bold(),
      warning.section,
      warning.field,
      warning.raw
    );
  }
}
