//! Implementation of the `touchpack synth` command.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{load_descriptor, synthesizer, warn_icon_fallback};
use crate::output::{OutputFormat, format_list, print_json, print_stat, print_success};

#[derive(Serialize)]
struct SynthJson<'a> {
  architecture: &'a str,
  icon: &'a str,
  policy_groups: &'a [String],
  merged_existing: bool,
}

/// Regenerate `manifest.json`, `cordova.desktop` and `apparmor.json` in `platform_dir`.
pub fn cmd_synth(platform_dir: &Path, descriptor: &Path, arch: Option<String>, output: OutputFormat) -> Result<()> {
  let descriptor = load_descriptor(descriptor)?;
  let out = synthesizer(arch)
    .synthesize(&descriptor, platform_dir)
    .context("Failed to synthesize packaging metadata")?;

  if output.is_json() {
    return print_json(&SynthJson {
      architecture: out.architecture.as_str(),
      icon: out.icon.icon(),
      policy_groups: &out.policy_groups,
      merged_existing: out.merged_existing,
    });
  }

  warn_icon_fallback(&out.icon);

  print_success("Packaging metadata written");
  print_stat("manifest", &out.paths.manifest.display().to_string());
  print_stat("architecture", out.architecture.as_str());
  print_stat("policy groups", &format_list(&out.policy_groups));
  Ok(())
}
