//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub fn touchpack_cmd() -> Command {
  cargo_bin_cmd!("touchpack")
}

/// Isolated project tree.
///
/// ```text
/// {temp}/
/// ├── .cordova/
/// ├── app.json
/// ├── www/
/// └── platforms/ubuntu/platform_www/
/// ```
pub struct TestProject {
  pub temp: TempDir,
}

impl TestProject {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join(".cordova")).unwrap();
    std::fs::create_dir_all(temp.path().join("www")).unwrap();
    std::fs::create_dir_all(temp.path().join("platforms/ubuntu/platform_www")).unwrap();
    Self { temp }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  pub fn platform_dir(&self) -> PathBuf {
    self.root().join("platforms").join("ubuntu")
  }

  pub fn descriptor_path(&self) -> PathBuf {
    self.root().join("app.json")
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.root().join(relative_path))
      .unwrap_or_else(|e| panic!("failed to read {}: {}", relative_path, e))
  }

  pub fn write_descriptor(&self, json: &str) {
    self.write_file("app.json", json);
  }
}
