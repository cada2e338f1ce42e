//! Shared helpers for CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Entry data used by most tests: a scene holding a panel and a button.
pub const CHAT_ENTRY: &str = r#"
['template']
'NodeType' = '$$.gui_ctrl.UIScene'
'Data' = {
    'Game' = {
        'Name' = 'main',
        'children' = {
            1 = 'panel_bg',
            2 = 'btn_close',
        },
    },
}

['panel_bg']
'NodeType' = '$$.gui_ctrl.panel'
'Data' = {
    'Game' = {
        'Name' = 'panel_bg',
        'z_index' = 1,
    },
}

['btn_close']
'NodeType' = '$$.gui_ctrl.button'
'Data' = {
    'Game' = {
        'Name' = 'btn_close',
        'visible' = 1,
    },
}
"#;

/// A temp project tree the binary runs against via `--project`.
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let env = TestEnv {
      temp: TempDir::new().unwrap(),
    };
    fs::create_dir_all(env.editor_dir()).unwrap();
    env
  }

  pub fn editor_dir(&self) -> PathBuf {
    self
      .temp
      .path()
      .join("editor")
      .join("table")
      .join("entry_data")
      .join("template@gui_ctrl")
  }

  pub fn page_dir(&self, name: &str) -> PathBuf {
    self
      .temp
      .path()
      .join("ui")
      .join("script")
      .join("gui")
      .join("page")
      .join(name)
  }

  pub fn template_path(&self, name: &str) -> PathBuf {
    self.page_dir(name).join("template.lua")
  }

  pub fn logic_path(&self, name: &str) -> PathBuf {
    self.page_dir(name).join("component.lua")
  }

  pub fn add_component(&self, dir_name: &str, entry_data: &str) {
    let dir = self.editor_dir().join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("entry_data.ini"), entry_data).unwrap();
  }

  pub fn add_display_name(&self, dir_name: &str, display: &str) {
    let dir = self.editor_dir().join(dir_name).join("i18n");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
      dir.join("default.json"),
      format!(r#"{{"{}_DisplayName": "{}"}}"#, dir_name, display),
    )
    .unwrap();
  }

  /// Rewrite one occurrence in a generated template, simulating drift.
  pub fn patch_template(&self, name: &str, from: &str, to: &str) {
    let path = self.template_path(name);
    let text = fs::read_to_string(&path).unwrap().replace(from, to);
    fs::write(&path, text).unwrap();
  }

  /// The binary, pointed at this project.
  pub fn view2lua(&self) -> Command {
    let mut cmd = Command::cargo_bin("view2lua").unwrap();
    cmd.arg("--project").arg(self.temp.path());
    cmd
  }
}
