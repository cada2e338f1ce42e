//! List command integration tests.

use predicates::prelude::*;

use super::common::{CHAT_ENTRY, TestEnv};

#[test]
fn list_shows_components() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);
  env.add_display_name("chat_view", "ChatMainView");

  env
    .view2lua()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("chat_view"))
    .stdout(predicate::str::contains("ChatMainView"))
    .stdout(predicate::str::contains("Total: 1 component(s)"));
}

#[test]
fn list_reports_template_presence() {
  let env = TestEnv::new();
  env.add_component("chat_view", CHAT_ENTRY);

  env
    .view2lua()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("no"));

  env.view2lua().arg("convert").arg("chat_view").assert().success();

  env
    .view2lua()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("yes"));
}

#[test]
fn list_marks_internal_components() {
  let env = TestEnv::new();
  env.add_component("$$toolkit", CHAT_ENTRY);

  env
    .view2lua()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("(internal)"));
}

#[test]
fn list_empty_project() {
  let env = TestEnv::new();

  env
    .view2lua()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("No components found"));
}
