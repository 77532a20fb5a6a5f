//! Packaging metadata synthesis.
//!
//! Turns a [`Descriptor`] into the three files a click package needs:
//!
//! ```text
//! {project}/
//! ├── manifest.json     # merged with the existing file, if any
//! ├── cordova.desktop   # regenerated
//! └── apparmor.json     # regenerated
//! ```
//!
//! All validation happens before anything touches the disk. The three files
//! are staged first and only moved into place once every one of them has been
//! written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::apparmor::SecurityPolicy;
use crate::consts::{APPARMOR_FILENAME, DESKTOP_FILENAME, MANIFEST_FILENAME};
use crate::descriptor::Descriptor;
use crate::desktop::{DesktopEntry, IconSource};
use crate::manifest::{Manifest, ManifestError, ManifestFields};
use crate::platform::{ArchDetect, DebArch, HostArch, resolve_arch};
use crate::util::staging::{StagedFiles, StagingError, clear_stale};
use crate::util::text::sanitize;

#[derive(Debug, Error)]
pub enum SynthError {
  #[error("descriptor is missing required field `{field}`")]
  Config { field: &'static str },

  #[error("unsupported CPU architecture: {family}")]
  UnsupportedArch { family: String },

  #[error("existing manifest {} cannot be merged: {source}", path.display())]
  Merge { path: PathBuf, source: ManifestError },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to serialize {file}: {source}")]
  Serialize {
    file: &'static str,
    source: serde_json::Error,
  },

  #[error(transparent)]
  Write(#[from] StagingError),
}

impl SynthError {
  /// True for filesystem failures, as opposed to descriptor or merge problems.
  pub fn is_io(&self) -> bool {
    matches!(self, Self::Read { .. } | Self::Write(_))
  }
}

/// Paths of the three artifacts under a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
  pub manifest: PathBuf,
  pub desktop: PathBuf,
  pub apparmor: PathBuf,
}

impl ArtifactPaths {
  pub fn new(project_dir: &Path) -> Self {
    Self {
      manifest: project_dir.join(MANIFEST_FILENAME),
      desktop: project_dir.join(DESKTOP_FILENAME),
      apparmor: project_dir.join(APPARMOR_FILENAME),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    [self.manifest.as_path(), self.desktop.as_path(), self.apparmor.as_path()].into_iter()
  }
}

/// What a successful synthesis wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthOutput {
  pub paths: ArtifactPaths,
  pub architecture: DebArch,
  pub icon: IconSource,
  pub policy_groups: Vec<String>,
  /// Whether `manifest.json` existed before this run.
  pub merged_existing: bool,
}

/// Generates packaging metadata for one project directory at a time.
pub struct MetadataSynthesizer {
  arch: Box<dyn ArchDetect>,
}

impl Default for MetadataSynthesizer {
  fn default() -> Self {
    Self::new(HostArch)
  }
}

impl MetadataSynthesizer {
  pub fn new(arch: impl ArchDetect + 'static) -> Self {
    Self { arch: Box::new(arch) }
  }

  /// Write `manifest.json`, `cordova.desktop` and `apparmor.json` under `project_dir`.
  ///
  /// # Errors
  ///
  /// - [`SynthError::UnsupportedArch`] if the host CPU family is not `arm`, `ia32` or `x64`
  /// - [`SynthError::Config`] if the author or author email is missing
  /// - [`SynthError::Merge`] if an existing `manifest.json` is not a JSON object
  /// - [`SynthError::Read`] / [`SynthError::Write`] on filesystem failures
  ///
  /// None of these leave a partially written file behind except a failed final
  /// rename, which can leave earlier artifacts updated.
  pub fn synthesize(&self, descriptor: &dyn Descriptor, project_dir: &Path) -> Result<SynthOutput, SynthError> {
    let architecture =
      resolve_arch(self.arch.as_ref()).map_err(|family| SynthError::UnsupportedArch { family })?;

    let author = descriptor
      .author()
      .map(sanitize)
      .filter(|a| !a.is_empty())
      .ok_or(SynthError::Config { field: "author" })?;
    let email = descriptor
      .author_email()
      .ok_or(SynthError::Config { field: "author.email" })?;

    let paths = ArtifactPaths::new(project_dir);
    clear_stale(paths.iter())?;

    let existing = load_manifest(&paths.manifest)?;
    let merged_existing = existing.is_some();
    let mut manifest = existing.unwrap_or_default();

    manifest.apply(&ManifestFields {
      name: descriptor.package_name().to_string(),
      version: descriptor.version().to_string(),
      title: descriptor.name().to_string(),
      maintainer: format!("{} <{}>", author, email),
      author,
      description: sanitize(descriptor.description()),
      architecture,
    });

    let icon = IconSource::resolve(project_dir, descriptor.icon());
    let desktop = DesktopEntry::new(sanitize(descriptor.name()), icon.icon());
    let policy = SecurityPolicy::from_features(descriptor.feature_params());

    let manifest_json = manifest.to_json_string().map_err(|e| SynthError::Serialize {
      file: MANIFEST_FILENAME,
      source: e,
    })?;
    let policy_json = policy.to_json_string().map_err(|e| SynthError::Serialize {
      file: APPARMOR_FILENAME,
      source: e,
    })?;

    let mut files = StagedFiles::new();
    files.stage(&paths.manifest, manifest_json)?;
    files.stage(&paths.desktop, desktop.render())?;
    files.stage(&paths.apparmor, policy_json)?;
    files.commit()?;

    info!(
      project = %project_dir.display(),
      architecture = %architecture,
      policy_groups = policy.policy_groups.len(),
      merged_existing,
      "synthesized packaging metadata"
    );

    Ok(SynthOutput {
      paths,
      architecture,
      icon,
      policy_groups: policy.policy_groups,
      merged_existing,
    })
  }
}

/// Load `path` if it exists.
fn load_manifest(path: &Path) -> Result<Option<Manifest>, SynthError> {
  let content = match fs::read(path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no existing manifest, starting fresh");
      return Ok(None);
    }
    Err(e) => {
      return Err(SynthError::Read {
        path: path.to_path_buf(),
        source: e,
      });
    }
  };

  let manifest = Manifest::from_json_slice(&content).map_err(|e| SynthError::Merge {
    path: path.to_path_buf(),
    source: e,
  })?;
  debug!(path = %path.display(), keys = manifest.entries().len(), "loaded existing manifest");
  Ok(Some(manifest))
}
