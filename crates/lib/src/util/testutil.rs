//! Test utilities for touchpack-lib.
//!
//! Helpers for building small directory trees and reading them back.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::descriptor::{AppDescriptor, Author, FeatureParam};

/// Write `content` at `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
}

/// Read `root/relative` as a string.
pub fn read_file(root: &Path, relative: &str) -> String {
  fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
}

/// Map of every regular file under `root` (forward-slash relative path) to its content.
pub fn file_tree(root: &Path) -> BTreeMap<String, String> {
  WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .map(|e| e.unwrap())
    .filter(|e| e.file_type().is_file())
    .map(|e| {
      let rel = e.path().strip_prefix(root).unwrap();
      let key = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
      (key, fs::read_to_string(e.path()).unwrap())
    })
    .collect()
}

/// A complete descriptor with no icon and no features.
pub fn sample_descriptor() -> AppDescriptor {
  AppDescriptor {
    package_name: "com.example.hello".into(),
    name: "Hello World".into(),
    version: "0.0.1".into(),
    author: Some(Author {
      name: "Jane Doe".into(),
      email: Some("jane@example.com".into()),
    }),
    description: "A sample application".into(),
    icon: None,
    features: Vec::new(),
  }
}

/// Feature record carrying a policy group.
pub fn feature(name: &str, policy_group: Option<&str>) -> FeatureParam {
  FeatureParam {
    name: name.into(),
    value: None,
    policy_group: policy_group.map(String::from),
  }
}
