pub mod arch;

pub use arch::{ArchDetect, DebArch, FixedArch, HostArch};

/// Resolve the Debian architecture reported by `detect`.
///
/// Returns the raw CPU family as the error so callers can report it.
pub fn resolve_arch(detect: &dyn ArchDetect) -> Result<DebArch, String> {
  let family = detect.cpu_family();
  DebArch::from_cpu_family(&family).ok_or(family)
}
