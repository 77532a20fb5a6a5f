//! Layered web-asset assembly.
//!
//! The deployable `www/` tree is rebuilt from scratch out of three ordered
//! layers. A later layer's file replaces an earlier layer's file at the same
//! relative path:
//!
//! ```text
//! base (project www/)  <  platform stock (platform_www/)  <  override (merges/<platform>/)
//! ```
//!
//! The override layer is optional. Version-control directories are stripped
//! from the result.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::VCS_DIRS;

/// One source of files for the assembled tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetLayer {
  Base,
  PlatformStock,
  Override,
}

/// Layers from lowest to highest precedence.
pub const LAYER_ORDER: [AssetLayer; 3] = [AssetLayer::Base, AssetLayer::PlatformStock, AssetLayer::Override];

impl AssetLayer {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Base => "base",
      Self::PlatformStock => "platform-stock",
      Self::Override => "override",
    }
  }

  /// Only the override layer may be absent.
  pub fn is_optional(&self) -> bool {
    matches!(self, Self::Override)
  }
}

impl fmt::Display for AssetLayer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum OverlayError {
  #[error("{layer} layer directory not found: {}", path.display())]
  MissingLayer { layer: AssetLayer, path: PathBuf },

  #[error("target {} overlaps the {layer} layer at {}", target.display(), layer_path.display())]
  Overlap {
    target: PathBuf,
    layer: AssetLayer,
    layer_path: PathBuf,
  },

  #[error("failed to clear {}: {source}", path.display())]
  Clear { path: PathBuf, source: io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  #[error("failed to remove {}: {source}", path.display())]
  Remove { path: PathBuf, source: io::Error },

  #[error("failed to traverse {}: {source}", path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

/// Per-layer copy counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStats {
  pub layer: AssetLayer,
  pub source: PathBuf,
  pub files: usize,
  /// Files that replaced one from a lower layer.
  pub overwritten: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssembleReport {
  /// Layers actually applied, in precedence order.
  pub layers: Vec<LayerStats>,
  pub vcs_dirs_removed: usize,
}

impl AssembleReport {
  pub fn files_from(&self, layer: AssetLayer) -> usize {
    self.layers.iter().filter(|s| s.layer == layer).map(|s| s.files).sum()
  }

  pub fn applied(&self, layer: AssetLayer) -> bool {
    self.layers.iter().any(|s| s.layer == layer)
  }
}

/// Directories feeding one assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSources {
  pub base: PathBuf,
  pub platform_stock: PathBuf,
  pub overrides: Option<PathBuf>,
}

impl LayerSources {
  pub fn path(&self, layer: AssetLayer) -> Option<&Path> {
    match layer {
      AssetLayer::Base => Some(&self.base),
      AssetLayer::PlatformStock => Some(&self.platform_stock),
      AssetLayer::Override => self.overrides.as_deref(),
    }
  }
}

/// Rebuild `target` from the base, platform-stock and optional override layers.
///
/// Missing base or platform-stock directories fail before `target` is touched.
/// A missing override directory is an empty layer.
pub fn assemble(
  www_source: &Path,
  platform_stock: &Path,
  overrides: Option<&Path>,
  target: &Path,
) -> Result<AssembleReport, OverlayError> {
  let sources = LayerSources {
    base: www_source.to_path_buf(),
    platform_stock: platform_stock.to_path_buf(),
    overrides: overrides.map(Path::to_path_buf),
  };
  assemble_layers(&sources, target)
}

pub fn assemble_layers(sources: &LayerSources, target: &Path) -> Result<AssembleReport, OverlayError> {
  let mut layers = Vec::with_capacity(LAYER_ORDER.len());
  for layer in LAYER_ORDER {
    match sources.path(layer) {
      Some(path) if path.is_dir() => {
        check_overlap(target, layer, path)?;
        layers.push((layer, path));
      }
      Some(path) if !layer.is_optional() => {
        return Err(OverlayError::MissingLayer {
          layer,
          path: path.to_path_buf(),
        });
      }
      _ => debug!(layer = %layer, "layer absent, skipping"),
    }
  }

  reset_dir(target)?;

  let mut report = AssembleReport::default();
  for (layer, path) in layers {
    let stats = copy_layer(layer, path, target)?;
    debug!(
      layer = %layer,
      files = stats.files,
      overwritten = stats.overwritten,
      "applied layer"
    );
    report.layers.push(stats);
  }

  report.vcs_dirs_removed = strip_vcs_dirs(target)?;

  info!(
    target = %target.display(),
    layers = report.layers.len(),
    vcs_dirs_removed = report.vcs_dirs_removed,
    "assembled asset tree"
  );
  Ok(report)
}

/// Clearing `target` must not delete a layer, and copying a layer must not
/// feed on its own output.
fn check_overlap(target: &Path, layer: AssetLayer, layer_path: &Path) -> Result<(), OverlayError> {
  let target_abs = absolute(target);
  let layer_abs = absolute(layer_path);
  if layer_abs.starts_with(&target_abs) || target_abs.starts_with(&layer_abs) {
    return Err(OverlayError::Overlap {
      target: target.to_path_buf(),
      layer,
      layer_path: layer_path.to_path_buf(),
    });
  }
  Ok(())
}

/// Canonicalize the deepest existing ancestor and re-append the rest.
fn absolute(path: &Path) -> PathBuf {
  if let Ok(canonical) = dunce::canonicalize(path) {
    return canonical;
  }
  match (path.parent(), path.file_name()) {
    (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => absolute(parent).join(name),
    _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
  }
}

/// Remove `dir` (whatever is there) and recreate it empty.
fn reset_dir(dir: &Path) -> Result<(), OverlayError> {
  match fs::symlink_metadata(dir) {
    Ok(meta) => {
      let removed = if meta.is_dir() {
        fs::remove_dir_all(dir)
      } else {
        fs::remove_file(dir)
      };
      removed.map_err(|e| OverlayError::Clear {
        path: dir.to_path_buf(),
        source: e,
      })?;
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => {
      return Err(OverlayError::Clear {
        path: dir.to_path_buf(),
        source: e,
      });
    }
  }

  fs::create_dir_all(dir).map_err(|e| OverlayError::CreateDir {
    path: dir.to_path_buf(),
    source: e,
  })
}

/// Copy every entry under `source` into `target`, replacing what is there.
fn copy_layer(layer: AssetLayer, source: &Path, target: &Path) -> Result<LayerStats, OverlayError> {
  let mut stats = LayerStats {
    layer,
    source: source.to_path_buf(),
    files: 0,
    overwritten: 0,
  };

  let walker = WalkDir::new(source).min_depth(1).follow_links(true).sort_by_file_name();
  for entry in walker {
    let entry = entry.map_err(|e| OverlayError::Walk {
      path: source.to_path_buf(),
      source: e,
    })?;
    // Entries always live under the walk root.
    let Ok(relative) = entry.path().strip_prefix(source) else {
      continue;
    };
    let dest = target.join(relative);
    let existing = fs::symlink_metadata(&dest).ok();

    if entry.file_type().is_dir() {
      if let Some(meta) = existing.filter(|m| !m.is_dir()) {
        debug!(path = %dest.display(), file = meta.is_file(), "directory replaces file");
        remove_entry(&dest, false)?;
      }
      fs::create_dir_all(&dest).map_err(|e| OverlayError::CreateDir {
        path: dest.clone(),
        source: e,
      })?;
      continue;
    }

    if let Some(meta) = existing {
      if meta.is_dir() {
        remove_entry(&dest, true)?;
      } else {
        // fs::copy would write through a symlink at the destination.
        if meta.file_type().is_symlink() {
          remove_entry(&dest, false)?;
        }
        stats.overwritten += 1;
      }
    }

    fs::copy(entry.path(), &dest).map_err(|e| OverlayError::Copy {
      from: entry.path().to_path_buf(),
      to: dest.clone(),
      source: e,
    })?;
    stats.files += 1;
  }

  Ok(stats)
}

fn remove_entry(path: &Path, is_dir: bool) -> Result<(), OverlayError> {
  let result = if is_dir {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  };
  result.map_err(|e| OverlayError::Remove {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Delete every version-control directory under `root`, at any depth.
///
/// Returns how many were removed.
pub fn strip_vcs_dirs(root: &Path) -> Result<usize, OverlayError> {
  let mut found = Vec::new();
  let mut walker = WalkDir::new(root).min_depth(1).into_iter();

  while let Some(entry) = walker.next() {
    let entry = entry.map_err(|e| OverlayError::Walk {
      path: root.to_path_buf(),
      source: e,
    })?;
    let is_vcs = entry.file_type().is_dir() && VCS_DIRS.iter().any(|name| entry.file_name() == *name);
    if is_vcs {
      found.push(entry.into_path());
      walker.skip_current_dir();
    }
  }

  for dir in &found {
    debug!(path = %dir.display(), "removing version-control directory");
    remove_entry(dir, true)?;
  }
  Ok(found.len())
}
