//! Implementation of the `touchpack update` command.

use std::path::Path;

use anyhow::{Context, Result};

use touchpack_lib::{ProjectLayout, update_project};

use super::assemble::print_layers;
use super::{load_descriptor, synthesizer, warn_icon_fallback};
use crate::output::{OutputFormat, format_list, print_json, print_stat, print_success};

/// Regenerate packaging metadata, then rebuild `www/`.
///
/// # Errors
///
/// Returns an error if the project cannot be located, the descriptor is
/// invalid, or either stage fails. Assembly is skipped when synthesis fails.
pub fn cmd_update(platform_dir: &Path, descriptor: &Path, arch: Option<String>, output: OutputFormat) -> Result<()> {
  let layout = ProjectLayout::discover(platform_dir).context("Failed to locate project")?;
  let descriptor = load_descriptor(descriptor)?;

  let report = update_project(&synthesizer(arch), &descriptor, &layout).context("Failed to update project")?;

  if output.is_json() {
    return print_json(&report.summary());
  }

  warn_icon_fallback(&report.synth.icon);
  print_success(&format!("Updated {}", layout.platform_dir().display()));
  print_stat("architecture", report.synth.architecture.as_str());
  print_stat("icon", report.synth.icon.icon());
  print_stat("policy groups", &format_list(&report.synth.policy_groups));
  print_layers(&report.assets);
  Ok(())
}
