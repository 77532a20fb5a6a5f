mod assemble;
mod synth;
mod update;

pub use assemble::cmd_assemble;
pub use synth::cmd_synth;
pub use update::cmd_update;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use touchpack_lib::AppDescriptor;
use touchpack_lib::MetadataSynthesizer;
use touchpack_lib::desktop::IconSource;
use touchpack_lib::platform::FixedArch;

use crate::output::print_warning;

pub(crate) fn load_descriptor(path: &Path) -> Result<AppDescriptor> {
  debug!(path = %path.display(), "loading descriptor");
  AppDescriptor::from_json_file(path).context("Failed to load descriptor")
}

/// Host detection unless `--arch` pins a CPU family.
pub(crate) fn synthesizer(arch: Option<String>) -> MetadataSynthesizer {
  match arch {
    Some(family) => MetadataSynthesizer::new(FixedArch::new(family)),
    None => MetadataSynthesizer::default(),
  }
}

/// Tell the user when the desktop entry fell back to the default icon.
pub(crate) fn warn_icon_fallback(icon: &IconSource) {
  match icon {
    IconSource::Declared(_) => {}
    IconSource::NotDeclared => print_warning("No icon declared, using the default icon"),
    IconSource::Missing(icon) => print_warning(&format!("Icon {} not found, using the default icon", icon)),
  }
}
