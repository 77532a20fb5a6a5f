//! Project layout resolution.
//!
//! A platform directory lives somewhere under a project root:
//!
//! ```text
//! {root}/
//! ├── .cordova/
//! ├── www/                    # base asset layer
//! ├── merges/ubuntu/          # override layer
//! └── platforms/ubuntu/       # platform directory
//!     ├── config.xml
//!     ├── manifest.json
//!     ├── cordova.desktop
//!     ├── apparmor.json
//!     ├── platform_www/       # platform-stock layer
//!     └── www/                # assembled output
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::{PLATFORM_NAME, PROJECT_MARKER_DIR};
use crate::overlay::LayerSources;
use crate::synth::ArtifactPaths;

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("no project root (a directory containing {marker}) above {}", path.display())]
  NotAProject { path: PathBuf, marker: &'static str },

  #[error("failed to resolve {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  root: PathBuf,
  platform_dir: PathBuf,
  platform: String,
}

impl ProjectLayout {
  pub fn new(root: impl Into<PathBuf>, platform_dir: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      platform_dir: platform_dir.into(),
      platform: PLATFORM_NAME.to_string(),
    }
  }

  /// Use a platform name other than `ubuntu` for the merges directory.
  pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
    self.platform = platform.into();
    self
  }

  /// Find the project root by walking up from `platform_dir`.
  ///
  /// The nearest ancestor (including `platform_dir` itself) that contains a
  /// `.cordova` directory is the root.
  pub fn discover(platform_dir: &Path) -> Result<Self, ProjectError> {
    let platform_dir = dunce::canonicalize(platform_dir).map_err(|e| ProjectError::Canonicalize {
      path: platform_dir.to_path_buf(),
      source: e,
    })?;

    let root = platform_dir
      .ancestors()
      .find(|dir| dir.join(PROJECT_MARKER_DIR).is_dir())
      .ok_or_else(|| ProjectError::NotAProject {
        path: platform_dir.clone(),
        marker: PROJECT_MARKER_DIR,
      })?
      .to_path_buf();

    debug!(root = %root.display(), platform_dir = %platform_dir.display(), "resolved project");
    Ok(Self::new(root, platform_dir))
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn platform_dir(&self) -> &Path {
    &self.platform_dir
  }

  pub fn platform(&self) -> &str {
    &self.platform
  }

  pub fn artifacts(&self) -> ArtifactPaths {
    ArtifactPaths::new(&self.platform_dir)
  }

  pub fn config_xml(&self) -> PathBuf {
    self.platform_dir.join("config.xml")
  }

  /// Assembled asset tree.
  pub fn www_dir(&self) -> PathBuf {
    self.platform_dir.join("www")
  }

  pub fn platform_www(&self) -> PathBuf {
    self.platform_dir.join("platform_www")
  }

  pub fn project_www(&self) -> PathBuf {
    self.root.join("www")
  }

  pub fn merges_dir(&self) -> PathBuf {
    self.root.join("merges").join(&self.platform)
  }

  /// `cordova.js` shipped in a platform library checkout.
  pub fn cordovajs_path(lib_dir: &Path) -> PathBuf {
    lib_dir.join("www").join("cordova.js")
  }

  /// The three asset layers for this project. The override layer is only
  /// included when its directory exists.
  pub fn layer_sources(&self) -> LayerSources {
    let merges = self.merges_dir();
    LayerSources {
      base: self.project_www(),
      platform_stock: self.platform_www(),
      overrides: merges.is_dir().then_some(merges),
    }
  }
}
