//! Validate command integration tests.

use predicates::prelude::*;

use super::common::{CHAT_ENTRY, TestEnv};

#[test]
fn validate_passes_after_convert() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();

  env
    .view2lua()
    .arg("validate")
    .assert()
    .success()
    .stdout(predicate::str::contains("Passed: 1, Failed: 0"));
}

#[test]
fn validate_detects_semantic_drift() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();
  env.patch_template("chat_view", "visible = 1,", "visible = 2,");

  env
    .view2lua()
    .arg("validate")
    .arg("chat_view")
    .assert()
    .failure()
    .stdout(predicate::str::contains("discrepancies"))
    .stdout(predicate::str::contains("btn_close.visible"));
}

#[test]
fn validate_tolerates_numeric_formatting() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();
  env.patch_template("chat_view", "visible = 1,", "visible = 1.0,");

  env
    .view2lua()
    .arg("validate")
    .arg("chat_view")
    .assert()
    .success();
}

#[test]
fn validate_without_reference_skips() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("validate")
    .assert()
    .success()
    .stdout(predicate::str::contains("no existing template"));
}

#[test]
fn validate_hand_edited_cannot_verify() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();
  std::fs::write(
    env.template_path("chat_view"),
    "function setup() return 1 end\n",
  )
  .unwrap();

  env
    .view2lua()
    .arg("validate")
    .assert()
    .failure()
    .stdout(predicate::str::contains("cannot verify"));
}

#[test]
fn validate_json_report() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();

  env
    .view2lua()
    .arg("validate")
    .arg("--json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"component\": \"chat_view\""))
    .stdout(predicate::str::contains("\"status\": \"passed\""));
}

#[test]
fn validate_json_reports_findings() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.view2lua().arg("convert").arg("chat_view").assert().success();
  env.patch_template("chat_view", "visible = 1,", "visible = 2,");

  env
    .view2lua()
    .arg("validate")
    .arg("--json")
    .assert()
    .failure()
    .stdout(predicate::str::contains("\"status\": \"mismatch\""))
    .stdout(predicate::str::contains("\"kind\": \"mismatch\""));
}
