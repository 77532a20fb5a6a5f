use std::fmt;

/// Debian architecture names a click package can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebArch {
  Armhf,
  I386,
  Amd64,
}

impl DebArch {
  /// Map a CPU family name (`arm`, `ia32`, `x64`) onto its Debian architecture.
  ///
  /// Returns `None` for anything outside that table; there is no fallback.
  pub fn from_cpu_family(family: &str) -> Option<Self> {
    match family {
      "arm" => Some(Self::Armhf),
      "ia32" => Some(Self::I386),
      "x64" => Some(Self::Amd64),
      _ => None,
    }
  }

  /// Returns the Debian identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Armhf => "armhf",
      Self::I386 => "i386",
      Self::Amd64 => "amd64",
    }
  }
}

impl fmt::Display for DebArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Source of the host CPU family.
///
/// Synthesis never queries the environment directly so callers can pin the
/// architecture.
pub trait ArchDetect {
  fn cpu_family(&self) -> String;
}

/// Detects the CPU family of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostArch;

impl HostArch {
  /// Translate a Rust target arch into a CPU family name.
  ///
  /// Unknown arches pass through unchanged so they surface in error messages.
  pub fn family_of(rust_arch: &str) -> &str {
    match rust_arch {
      "arm" => "arm",
      "x86" => "ia32",
      "x86_64" => "x64",
      other => other,
    }
  }
}

impl ArchDetect for HostArch {
  fn cpu_family(&self) -> String {
    Self::family_of(std::env::consts::ARCH).to_string()
  }
}

/// Always reports the same CPU family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArch(pub String);

impl FixedArch {
  pub fn new(family: impl Into<String>) -> Self {
    Self(family.into())
  }
}

impl ArchDetect for FixedArch {
  fn cpu_family(&self) -> String {
    self.0.clone()
  }
}
