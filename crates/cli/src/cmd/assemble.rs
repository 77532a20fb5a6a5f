//! Implementation of the `touchpack assemble` command.

use std::path::Path;

use anyhow::{Context, Result};

use touchpack_lib::ProjectLayout;
use touchpack_lib::overlay::{AssembleReport, assemble_layers};

use crate::output::{OutputFormat, print_json, print_stat, print_success};

/// Rebuild `www/` in `platform_dir` from the project's asset layers.
pub fn cmd_assemble(platform_dir: &Path, output: OutputFormat) -> Result<()> {
  let layout = ProjectLayout::discover(platform_dir).context("Failed to locate project")?;
  let report = assemble_layers(&layout.layer_sources(), &layout.www_dir()).context("Failed to assemble www")?;

  if output.is_json() {
    return print_json(&report);
  }

  print_success(&format!("Assembled {}", layout.www_dir().display()));
  print_layers(&report);
  Ok(())
}

pub(crate) fn print_layers(report: &AssembleReport) {
  for stats in &report.layers {
    print_stat(
      stats.layer.as_str(),
      &format!("{} files ({} replaced)", stats.files, stats.overwritten),
    );
  }
  if report.vcs_dirs_removed > 0 {
    print_stat("vcs dirs removed", &report.vcs_dirs_removed.to_string());
  }
}
