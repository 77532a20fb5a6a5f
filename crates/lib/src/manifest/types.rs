//! Click manifest document.
//!
//! The manifest is kept as an insertion-ordered JSON object. Synthesis only
//! rewrites the keys listed in [`OWNED_KEYS`]; any other key a developer (or
//! another tool) put in `manifest.json` survives untouched.
//!
//! # Example
//!
//! ```json
//! {
//!     "name": "com.example.hello",
//!     "version": "0.0.1",
//!     "title": "Hello",
//!     "author": "Jane Doe",
//!     "maintainer": "Jane Doe <jane@example.com>",
//!     "description": "A sample app",
//!     "architecture": "amd64",
//!     "framework": "ubuntu-sdk-13.10",
//!     "hooks": {
//!         "cordova": {
//!             "desktop": "cordova.desktop",
//!             "apparmor": "apparmor.json"
//!         }
//!     }
//! }
//! ```

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::consts::{APPARMOR_FILENAME, DEFAULT_FRAMEWORK, DESKTOP_FILENAME, HOOK_NAME};
use crate::platform::DebArch;
use crate::util::json::to_pretty_json;

/// Keys synthesis writes on every run. `framework` is only written when absent.
pub const OWNED_KEYS: [&str; 9] = [
  "name",
  "version",
  "title",
  "author",
  "maintainer",
  "description",
  "architecture",
  "framework",
  "hooks",
];

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("invalid JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("expected a JSON object at the top level, found {0}")]
  NotAnObject(&'static str),
}

/// Values synthesis computes from the descriptor.
///
/// Text fields are expected to be sanitized already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFields {
  pub name: String,
  pub version: String,
  pub title: String,
  pub author: String,
  pub maintainer: String,
  pub description: String,
  pub architecture: DebArch,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Manifest {
  entries: Map<String, Value>,
}

impl Manifest {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse an existing manifest. Anything but a JSON object is rejected.
  pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
    Self::from_json_slice(content.as_bytes())
  }

  /// Parse raw file bytes. Invalid UTF-8 is a parse error like any other.
  pub fn from_json_slice(content: &[u8]) -> Result<Self, ManifestError> {
    match serde_json::from_slice::<Value>(content)? {
      Value::Object(entries) => Ok(Self { entries }),
      other => Err(ManifestError::NotAnObject(json_kind(&other))),
    }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.entries.get(key)
  }

  pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
    self.entries.insert(key.into(), value)
  }

  pub fn entries(&self) -> &Map<String, Value> {
    &self.entries
  }

  /// Overwrite the synthesizer-owned keys.
  ///
  /// Existing keys keep their position; new keys are appended in
  /// [`OWNED_KEYS`] order.
  pub fn apply(&mut self, fields: &ManifestFields) {
    let e = &mut self.entries;
    e.insert("name".into(), Value::String(fields.name.clone()));
    e.insert("version".into(), Value::String(fields.version.clone()));
    e.insert("title".into(), Value::String(fields.title.clone()));
    e.insert("author".into(), Value::String(fields.author.clone()));
    e.insert("maintainer".into(), Value::String(fields.maintainer.clone()));
    e.insert("description".into(), Value::String(fields.description.clone()));
    e.insert(
      "architecture".into(),
      Value::String(fields.architecture.as_str().to_string()),
    );

    if !e.get("framework").is_some_and(is_set) {
      e.insert("framework".into(), Value::String(DEFAULT_FRAMEWORK.to_string()));
    }

    e.insert(
      "hooks".into(),
      json!({
        HOOK_NAME: {
          "desktop": DESKTOP_FILENAME,
          "apparmor": APPARMOR_FILENAME,
        }
      }),
    );
  }

  pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
    to_pretty_json(&self.entries)
  }
}

/// `null`, `false`, `0` and `""` count as unset.
fn is_set(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
