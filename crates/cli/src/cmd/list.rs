//! Implementation of the `view2lua list` command.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use view2lua_lib::project::Project;

/// Execute the list command.
///
/// Prints every discovered component with its directory name, display name,
/// and whether a generated template already exists. Internal components are
/// marked; they are reported but never converted.
pub fn cmd_list(project: &Project) -> Result<()> {
  let components = project
    .list_components()
    .context("Failed to list components")?;

  if components.is_empty() {
    println!("No components found under {}", project.editor_dir().display());
    return Ok(());
  }

  println!("{:<40} {:<24} Lua", "Directory", "Display name");
  for component in &components {
    let display = component.display_name.as_deref().unwrap_or("-");
    let has_lua = if component.has_template { "yes" } else { "no" };
    if component.is_internal() {
      println!(
        "{:<40} {:<24} {:<4} {}",
        component.dir_name,
        display,
        has_lua,
        "(internal)".dimmed()
      );
    } else {
      println!("{:<40} {:<24} {}", component.dir_name, display, has_lua);
    }
  }

  println!();
  println!("Total: {} component(s)", components.len());

  Ok(())
}
