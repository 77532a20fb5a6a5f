//! `cordova.desktop` generation.
//!
//! The desktop entry is rebuilt from scratch on every run; nothing from a
//! previous file is carried over.

use std::path::Path;

use tracing::warn;

use crate::consts::{DEFAULT_ICON, DESKTOP_EXEC};

/// How the `Icon=` line was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
  /// The declared icon exists under the project directory.
  Declared(String),
  /// No icon was declared.
  NotDeclared,
  /// An icon was declared but nothing exists at that path.
  Missing(String),
}

impl IconSource {
  /// Check the declared icon (if any) against the project directory.
  ///
  /// Logs a warning for either fallback case.
  pub fn resolve(project_dir: &Path, declared: Option<&str>) -> Self {
    match declared.filter(|s| !s.is_empty()) {
      None => {
        warn!("icon not defined in descriptor, using {}", DEFAULT_ICON);
        Self::NotDeclared
      }
      Some(icon) => {
        let path = project_dir.join(icon);
        if path.exists() {
          Self::Declared(icon.to_string())
        } else {
          warn!(path = %path.display(), "cannot find icon, using {}", DEFAULT_ICON);
          Self::Missing(icon.to_string())
        }
      }
    }
  }

  /// Value for the `Icon=` line.
  pub fn icon(&self) -> &str {
    match self {
      Self::Declared(icon) => icon,
      Self::NotDeclared | Self::Missing(_) => DEFAULT_ICON,
    }
  }

  pub fn is_fallback(&self) -> bool {
    !matches!(self, Self::Declared(_))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
  pub name: String,
  pub icon: String,
}

impl DesktopEntry {
  pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      icon: icon.into(),
    }
  }

  pub fn lines(&self) -> Vec<String> {
    vec![
      "[Desktop Entry]".to_string(),
      format!("Name={}", self.name),
      format!("Exec={}", DESKTOP_EXEC),
      "Terminal=false".to_string(),
      "Type=Application".to_string(),
      "X-Ubuntu-Touch=true".to_string(),
      format!("Icon={}", self.icon),
    ]
  }

  /// File content: lines joined with `\n`, no trailing newline.
  pub fn render(&self) -> String {
    self.lines().join("\n")
  }
}
