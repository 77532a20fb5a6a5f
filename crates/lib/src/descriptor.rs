//! Application descriptor access.
//!
//! Synthesis reads the application through the [`Descriptor`] trait, so any
//! parser (a `config.xml` reader, a test double) can drive it. [`AppDescriptor`]
//! is the bundled implementation, deserialized from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a descriptor from disk.
#[derive(Debug, Error)]
pub enum DescriptorError {
  #[error("failed to read descriptor {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse descriptor {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },
}

/// One `<feature><param/></feature>` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureParam {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub policy_group: Option<String>,
}

/// Read-only view of an application definition.
pub trait Descriptor {
  fn package_name(&self) -> &str;
  fn name(&self) -> &str;
  fn version(&self) -> &str;
  fn author(&self) -> Option<&str>;
  fn author_email(&self) -> Option<&str>;
  fn description(&self) -> &str;
  /// Icon path relative to the project directory.
  fn icon(&self) -> Option<&str>;
  /// Feature parameters in document order.
  fn feature_params(&self) -> &[FeatureParam];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}

/// Descriptor loaded from a JSON document.
///
/// ```json
/// {
///   "package_name": "com.example.hello",
///   "name": "Hello",
///   "version": "0.0.1",
///   "author": { "name": "Jane", "email": "jane@example.com" },
///   "description": "A sample app",
///   "icon": "www/img/logo.png",
///   "features": [{ "name": "ubuntu-package", "policy_group": "camera" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
  pub package_name: String,
  pub name: String,
  pub version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<Author>,
  #[serde(default)]
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(default)]
  pub features: Vec<FeatureParam>,
}

impl AppDescriptor {
  pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  pub fn from_json_file(path: &Path) -> Result<Self, DescriptorError> {
    let content = fs::read_to_string(path).map_err(|e| DescriptorError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::from_json_str(&content).map_err(|e| DescriptorError::Parse {
      path: path.to_path_buf(),
      source: e,
    })
  }
}

impl Descriptor for AppDescriptor {
  fn package_name(&self) -> &str {
    &self.package_name
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn version(&self) -> &str {
    &self.version
  }

  fn author(&self) -> Option<&str> {
    self.author.as_ref().map(|a| a.name.as_str())
  }

  fn author_email(&self) -> Option<&str> {
    self.author.as_ref().and_then(|a| a.email.as_deref())
  }

  fn description(&self) -> &str {
    &self.description
  }

  fn icon(&self) -> Option<&str> {
    self.icon.as_deref()
  }

  fn feature_params(&self) -> &[FeatureParam] {
    &self.features
  }
}
