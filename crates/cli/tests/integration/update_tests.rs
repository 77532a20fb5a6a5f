use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::{TestProject, touchpack_cmd};

const DESCRIPTOR: &str = r#"{
  "package_name": "com.example.hello",
  "name": "Hello",
  "version": "1.0.0",
  "author": { "name": "Jane Doe", "email": "jane@example.com" },
  "description": "Sample",
  "icon": "www/icon.png",
  "features": [
    { "name": "ubuntu-package", "policy_group": "audio" },
    { "name": "ubuntu-package", "policy_group": "bluetooth" },
    { "name": "ubuntu-package", "policy_group": "networking" },
    { "name": "ubuntu-package", "policy_group": "bluetooth" }
  ]
}"#;

fn run_update(project: &TestProject) -> assert_cmd::assert::Assert {
  touchpack_cmd()
    .arg("update")
    .arg(project.platform_dir())
    .arg("--descriptor")
    .arg(project.descriptor_path())
    .args(["--arch", "x64"])
    .assert()
}

#[test]
fn update_generates_metadata_and_assets() {
  let project = TestProject::new();
  project.write_descriptor(DESCRIPTOR);
  project.write_file("www/index.html", "A");
  project.write_file("platforms/ubuntu/platform_www/index.html", "B");
  project.write_file("platforms/ubuntu/platform_www/extra.js", "extra");
  project.write_file("merges/ubuntu/index.html", "C");
  project.write_file("platforms/ubuntu/www/icon.png", "png");

  run_update(&project).success();

  assert_eq!(project.read_file("platforms/ubuntu/www/index.html"), "C");
  assert_eq!(project.read_file("platforms/ubuntu/www/extra.js"), "extra");

  let policy: Value = serde_json::from_str(&project.read_file("platforms/ubuntu/apparmor.json")).unwrap();
  assert_eq!(policy["policy_groups"], json!(["networking", "audio", "bluetooth"]));
}

#[test]
fn update_preserves_manifest_extras() {
  let project = TestProject::new();
  project.write_descriptor(DESCRIPTOR);
  project.write_file(
    "platforms/ubuntu/manifest.json",
    r#"{"foo": "bar", "framework": "custom"}"#,
  );

  run_update(&project).success();

  let manifest: Value = serde_json::from_str(&project.read_file("platforms/ubuntu/manifest.json")).unwrap();
  assert_eq!(manifest["foo"], json!("bar"));
  assert_eq!(manifest["framework"], json!("custom"));
  assert_eq!(manifest["architecture"], json!("amd64"));
}

#[test]
fn update_is_idempotent() {
  let project = TestProject::new();
  project.write_descriptor(DESCRIPTOR);
  project.write_file("www/index.html", "A");

  run_update(&project).success();
  let first = (
    project.read_file("platforms/ubuntu/manifest.json"),
    project.read_file("platforms/ubuntu/cordova.desktop"),
    project.read_file("platforms/ubuntu/apparmor.json"),
  );

  run_update(&project).success();
  let second = (
    project.read_file("platforms/ubuntu/manifest.json"),
    project.read_file("platforms/ubuntu/cordova.desktop"),
    project.read_file("platforms/ubuntu/apparmor.json"),
  );

  assert_eq!(first, second);
}

#[test]
fn update_with_missing_icon_warns() {
  let project = TestProject::new();
  project.write_descriptor(DESCRIPTOR);

  run_update(&project)
    .success()
    .stderr(predicate::str::contains("cannot find icon"))
    .stderr(predicate::str::contains("Icon www/icon.png not found, using the default icon"));

  assert!(
    project
      .read_file("platforms/ubuntu/cordova.desktop")
      .ends_with("Icon=qmlscene")
  );
}

#[test]
fn update_without_author_fails_before_writing() {
  let project = TestProject::new();
  project.write_descriptor(r#"{"package_name": "a.b", "name": "B", "version": "1"}"#);
  project.write_file("platforms/ubuntu/www/old.html", "old");

  run_update(&project)
    .failure()
    .stderr(predicate::str::contains("author"));

  assert!(!project.platform_dir().join("manifest.json").exists());
  assert_eq!(project.read_file("platforms/ubuntu/www/old.html"), "old");
}

#[test]
fn update_with_malformed_manifest_fails() {
  let project = TestProject::new();
  project.write_descriptor(DESCRIPTOR);
  project.write_file("platforms/ubuntu/manifest.json", "{ nope");

  run_update(&project)
    .failure()
    .stderr(predicate::str::contains("cannot be merged"));

  assert_eq!(project.read_file("platforms/ubuntu/manifest.json"), "{ nope");
}

#[test]
fn assemble_strips_vcs_dirs() {
  let project = TestProject::new();
  project.write_file("www/index.html", "A");
  project.write_file("www/.svn/entries", "svn");

  touchpack_cmd()
    .arg("assemble")
    .arg(project.platform_dir())
    .assert()
    .success();

  assert!(project.platform_dir().join("www/index.html").exists());
  assert!(!project.platform_dir().join("www/.svn").exists());
}
