//! Staged multi-file writes.
//!
//! Every file is first written to `<path>.tmp`. Nothing is renamed into place
//! until all files are staged, which keeps a failed serialization or full disk
//! from leaving a half-updated artifact set. The renames themselves are atomic
//! per file but not across files; [`clear_stale`] removes leftovers from an
//! interrupted run.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::STAGING_SUFFIX;

#[derive(Debug, Error)]
pub enum StagingError {
  #[error("failed to stage {}: {source}", path.display())]
  Stage { path: PathBuf, source: io::Error },

  #[error("failed to move {} into place: {source}", path.display())]
  Commit { path: PathBuf, source: io::Error },

  #[error("failed to remove stale staging file {}: {source}", path.display())]
  Cleanup { path: PathBuf, source: io::Error },
}

/// Sibling path used while `path` is staged.
pub fn staging_path(path: &Path) -> PathBuf {
  let mut name: OsString = path.as_os_str().to_owned();
  name.push(STAGING_SUFFIX);
  PathBuf::from(name)
}

/// Remove staging files left behind for any of `targets`.
///
/// Returns how many were removed.
pub fn clear_stale<'a, I>(targets: I) -> Result<usize, StagingError>
where
  I: IntoIterator<Item = &'a Path>,
{
  let mut removed = 0;
  for target in targets {
    let tmp = staging_path(target);
    match fs::remove_file(&tmp) {
      Ok(()) => {
        warn!(path = %tmp.display(), "removed staging file left by an interrupted run");
        removed += 1;
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(StagingError::Cleanup { path: tmp, source: e }),
    }
  }
  Ok(removed)
}

/// A set of files written together.
///
/// Dropping without [`commit`](Self::commit) discards the staged files.
#[derive(Debug, Default)]
pub struct StagedFiles {
  staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedFiles {
  pub fn new() -> Self {
    Self::default()
  }

  /// Write `contents` to the staging path for `target`.
  pub fn stage(&mut self, target: &Path, contents: impl AsRef<[u8]>) -> Result<(), StagingError> {
    let tmp = staging_path(target);
    fs::write(&tmp, contents).map_err(|e| StagingError::Stage {
      path: tmp.clone(),
      source: e,
    })?;
    debug!(path = %target.display(), "staged");
    self.staged.push((tmp, target.to_path_buf()));
    Ok(())
  }

  /// Rename every staged file into place, in staging order.
  ///
  /// Returns the final paths. Stops at the first failed rename; files renamed
  /// before it stay in place.
  pub fn commit(mut self) -> Result<Vec<PathBuf>, StagingError> {
    let staged = std::mem::take(&mut self.staged);
    let mut committed = Vec::with_capacity(staged.len());
    let mut pending = staged.into_iter();

    while let Some((tmp, target)) = pending.next() {
      if let Err(e) = fs::rename(&tmp, &target) {
        // Put the unrenamed files back so Drop discards them.
        self.staged.push((tmp, target.clone()));
        self.staged.extend(pending);
        return Err(StagingError::Commit { path: target, source: e });
      }
      committed.push(target);
    }

    Ok(committed)
  }
}

impl Drop for StagedFiles {
  fn drop(&mut self) {
    for (tmp, _) in self.staged.drain(..) {
      match fs::remove_file(&tmp) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %tmp.display(), error = %e, "failed to discard staging file"),
      }
    }
  }
}
