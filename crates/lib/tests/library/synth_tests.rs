use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

use touchpack_lib::descriptor::{Descriptor, FeatureParam};
use touchpack_lib::platform::{ArchDetect, FixedArch};
use touchpack_lib::{MetadataSynthesizer, SynthError};

/// Descriptor backed by plain fields, standing in for an external parser.
struct StubDescriptor {
  author: Option<&'static str>,
  email: Option<&'static str>,
  icon: Option<&'static str>,
  features: Vec<FeatureParam>,
}

impl StubDescriptor {
  fn new() -> Self {
    Self {
      author: Some("Ann Author"),
      email: Some("ann@example.com"),
      icon: None,
      features: Vec::new(),
    }
  }
}

impl Descriptor for StubDescriptor {
  fn package_name(&self) -> &str {
    "org.example.stub"
  }
  fn name(&self) -> &str {
    "Stub"
  }
  fn version(&self) -> &str {
    "2.0"
  }
  fn author(&self) -> Option<&str> {
    self.author
  }
  fn author_email(&self) -> Option<&str> {
    self.email
  }
  fn description(&self) -> &str {
    "Stub\napp"
  }
  fn icon(&self) -> Option<&str> {
    self.icon
  }
  fn feature_params(&self) -> &[FeatureParam] {
    &self.features
  }
}

/// A 32-bit x86 build host.
struct Ia32Host;

impl ArchDetect for Ia32Host {
  fn cpu_family(&self) -> String {
    "ia32".to_string()
  }
}

fn manifest(dir: &Path) -> Value {
  serde_json::from_str(&fs::read_to_string(dir.join("manifest.json")).unwrap()).unwrap()
}

fn group(name: &str) -> FeatureParam {
  FeatureParam {
    name: "ubuntu-package".into(),
    value: None,
    policy_group: Some(name.into()),
  }
}

#[test]
fn custom_descriptor_drives_synthesis() {
  let temp = TempDir::new().unwrap();
  let mut desc = StubDescriptor::new();
  desc.features = vec![group("camera"), group("audio"), group("camera")];

  let out = MetadataSynthesizer::new(FixedArch::new("ia32"))
    .synthesize(&desc, temp.path())
    .unwrap();

  assert_eq!(out.policy_groups, vec!["networking", "audio", "camera"]);
  let m = manifest(temp.path());
  assert_eq!(m["name"], json!("org.example.stub"));
  assert_eq!(m["architecture"], json!("i386"));
  assert_eq!(m["description"], json!("Stub app"));
  assert_eq!(m["maintainer"], json!("Ann Author <ann@example.com>"));
}

#[test]
fn detector_can_be_any_type() {
  let temp = TempDir::new().unwrap();
  let synth = MetadataSynthesizer::new(Ia32Host);
  synth.synthesize(&StubDescriptor::new(), temp.path()).unwrap();
  assert_eq!(manifest(temp.path())["architecture"], json!("i386"));
}

#[test]
fn empty_author_fails_before_writing() {
  let temp = TempDir::new().unwrap();
  let mut desc = StubDescriptor::new();
  desc.author = Some("");

  let err = MetadataSynthesizer::new(FixedArch::new("x64"))
    .synthesize(&desc, temp.path())
    .unwrap_err();

  assert!(matches!(err, SynthError::Config { .. }));
  assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn descriptor_change_updates_owned_fields_only() {
  let temp = TempDir::new().unwrap();
  let synth = MetadataSynthesizer::new(FixedArch::new("x64"));
  synth.synthesize(&StubDescriptor::new(), temp.path()).unwrap();

  // Simulate a developer edit between runs.
  let mut m = manifest(temp.path());
  m["custom"] = json!({"keep": true});
  m["framework"] = json!("ubuntu-sdk-14.04");
  fs::write(temp.path().join("manifest.json"), serde_json::to_string(&m).unwrap()).unwrap();

  let mut desc = StubDescriptor::new();
  desc.author = Some("Bob");
  desc.email = Some("bob@example.com");
  synth.synthesize(&desc, temp.path()).unwrap();

  let m = manifest(temp.path());
  assert_eq!(m["custom"], json!({"keep": true}));
  assert_eq!(m["framework"], json!("ubuntu-sdk-14.04"));
  assert_eq!(m["author"], json!("Bob"));
  assert_eq!(m["maintainer"], json!("Bob <bob@example.com>"));
}
