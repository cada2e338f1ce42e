//! Convert command integration tests.

use std::fs;

use predicates::prelude::*;

use super::common::{CHAT_ENTRY, TestEnv};

#[test]
fn convert_writes_template_and_logic() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("convert")
    .arg("chat_view")
    .assert()
    .success()
    .stdout(predicate::str::contains("chat_view ->"));

  let template = fs::read_to_string(env.template_path("chat_view")).unwrap();
  assert!(template.starts_with("-- THIS FILE IS AUTO-GENERATED"));
  assert!(template.contains("ctrl_wrapper.button {"));
  assert!(template.contains("visible = 1,"));

  let logic = fs::read_to_string(env.logic_path("chat_view")).unwrap();
  assert!(logic.contains("return component 'chat_view' {"));
}

#[test]
fn convert_uses_display_name_for_output_dir() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.add_display_name("chat_view", "ChatMainView");

  env
    .view2lua()
    .arg("convert")
    .arg("ChatMainView")
    .assert()
    .success();

  assert!(env.template_path("ChatMainView").is_file());
  assert!(!env.template_path("chat_view").exists());
}

#[test]
fn convert_backs_up_previous_template() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);

  env.view2lua().arg("convert").arg("chat_view").assert().success();
  env
    .view2lua()
    .arg("convert")
    .arg("chat_view")
    .assert()
    .success()
    .stdout(predicate::str::contains("backed up previous template"));

  assert!(env.page_dir("chat_view").join("template.lua.bak").is_file());
}

#[test]
fn convert_dry_run_writes_nothing() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("convert")
    .arg("chat_view")
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("dry run"))
    .stdout(predicate::str::contains("flatten_template"));

  assert!(!env.template_path("chat_view").exists());
}

#[test]
fn convert_unknown_component_fails() {
  let env = TestEnv::new();

  env
    .view2lua()
    .arg("convert")
    .arg("missing")
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing"));
}

#[test]
fn convert_all_skips_internal_components() {
  let env = TestEnv::new();
  env.add_component("$$toolkit", CHAT_ENTRY);
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("convert-all")
    .assert()
    .success()
    .stdout(predicate::str::contains("$$toolkit (internal, skipped)"))
    .stdout(predicate::str::contains("Converted: 1, Failed: 0, Skipped: 1"));

  assert!(env.template_path("chat_view").is_file());
  assert!(!env.template_path("$$toolkit").exists());
}

#[test]
fn convert_all_isolates_failures() {
  let env = TestEnv::new();
  env.add_component("broken", "['template']\nthis is not entry data\n");
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("convert-all")
    .assert()
    .failure()
    .stdout(predicate::str::contains("Converted: 1, Failed: 1"));

  // The valid component converted despite the broken one.
  assert!(env.template_path("chat_view").is_file());
}

#[test]
fn convert_warns_on_ambiguous_values() {
  let env = TestEnv::new();
  env.add_component(
    "chat_view",
    "['template']\n'NodeType' = '$$.gui_ctrl.panel'\n'Data' = {\n    'Game' = {\n        'mode' = centered,\n    },\n}\n",
  );

  env
    .view2lua()
    .arg("convert")
    .arg("chat_view")
    .assert()
    .success()
    .stdout(predicate::str::contains("ambiguous value 'centered'"));
}
