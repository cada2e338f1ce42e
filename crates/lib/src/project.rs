//! Project layout and component discovery.
//!
//! The editor and runtime directory conventions are fixed relative to an
//! explicitly passed project root, never read from ambient environment, so
//! the core stays testable against arbitrary temp directories:
//!
//! - configs: `editor/table/entry_data/template@gui_ctrl/<dir>/entry_data.ini`
//! - output: `ui/script/gui/page/<display_name>/template.lua`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{ENTRY_DATA_FILE, INTERNAL_PREFIX, LOGIC_FILE, TEMPLATE_FILE};
use crate::error::{Error, Result};

/// A project root with the fixed editor/runtime directory conventions.
#[derive(Debug, Clone)]
pub struct Project {
  root: PathBuf,
}

/// One discovered UI component.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
  /// Directory name under the editor tree; the unique identifier.
  pub dir_name: String,
  /// Display name from `i18n/default.json`, when present.
  pub display_name: Option<String>,
  /// Whether a generated `template.lua` already exists for it.
  pub has_template: bool,
}

impl Component {
  /// The name used for the output directory: display name when known,
  /// directory name otherwise.
  pub fn effective_name(&self) -> &str {
    self.display_name.as_deref().unwrap_or(&self.dir_name)
  }

  /// Internal components are reported but never converted.
  pub fn is_internal(&self) -> bool {
    self.dir_name.starts_with(INTERNAL_PREFIX)
  }
}

impl Project {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Project { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Directory holding one editor config directory per component.
  pub fn editor_dir(&self) -> PathBuf {
    self
      .root
      .join("editor")
      .join("table")
      .join("entry_data")
      .join("template@gui_ctrl")
  }

  /// Directory holding one generated page directory per component.
  pub fn ui_script_dir(&self) -> PathBuf {
    self.root.join("ui").join("script").join("gui").join("page")
  }

  pub fn entry_data_path(&self, dir_name: &str) -> PathBuf {
    self.editor_dir().join(dir_name).join(ENTRY_DATA_FILE)
  }

  pub fn page_dir(&self, effective_name: &str) -> PathBuf {
    self.ui_script_dir().join(effective_name)
  }

  pub fn template_path(&self, effective_name: &str) -> PathBuf {
    self.page_dir(effective_name).join(TEMPLATE_FILE)
  }

  pub fn logic_path(&self, effective_name: &str) -> PathBuf {
    self.page_dir(effective_name).join(LOGIC_FILE)
  }

  /// Enumerate components: every editor subdirectory holding an
  /// `entry_data.ini`, sorted by directory name for stable output.
  pub fn list_components(&self) -> Result<Vec<Component>> {
    let editor_dir = self.editor_dir();
    let mut components = Vec::new();

    for dir_entry in fs::read_dir(&editor_dir)? {
      let dir_entry = dir_entry?;
      if !dir_entry.file_type()?.is_dir() {
        continue;
      }
      let path = dir_entry.path();
      if !path.join(ENTRY_DATA_FILE).is_file() {
        debug!(dir = %path.display(), "skipping directory without entry data");
        continue;
      }

      let dir_name = dir_entry.file_name().to_string_lossy().into_owned();
      let display_name = read_display_name(&path);
      let has_template = self
        .template_path(display_name.as_deref().unwrap_or(&dir_name))
        .is_file();

      components.push(Component {
        dir_name,
        display_name,
        has_template,
      });
    }

    components.sort_by(|a, b| a.dir_name.cmp(&b.dir_name));
    Ok(components)
  }

  /// Look up a component by display name or directory name.
  pub fn find_component(&self, name: &str) -> Result<Component> {
    self
      .list_components()?
      .into_iter()
      .find(|c| c.dir_name == name || c.display_name.as_deref() == Some(name))
      .ok_or_else(|| Error::ComponentNotFound(name.to_string()))
  }

  /// Read and parse a component's entry data.
  pub fn read_entry_data(&self, component: &Component) -> Result<crate::entry::EntryData> {
    let text = fs::read_to_string(self.entry_data_path(&component.dir_name))?;
    crate::entry::parse(&text)
  }
}

/// Read the display name from a component's `i18n/default.json`: the value of
/// the first key containing `DisplayName`.
fn read_display_name(component_dir: &Path) -> Option<String> {
  let i18n_path = component_dir.join("i18n").join("default.json");
  let text = fs::read_to_string(i18n_path).ok()?;
  let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text).ok()?;
  map
    .iter()
    .find(|(key, _)| key.contains("DisplayName"))
    .and_then(|(_, value)| value.as_str())
    .map(|s| s.to_string())
}
