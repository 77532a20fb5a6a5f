//! Full project refresh: metadata first, then the asset tree.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::descriptor::Descriptor;
use crate::overlay::{AssembleReport, OverlayError, assemble_layers};
use crate::project::ProjectLayout;
use crate::synth::{MetadataSynthesizer, SynthError, SynthOutput};

#[derive(Debug, Error)]
pub enum UpdateError {
  #[error(transparent)]
  Synth(#[from] SynthError),

  #[error(transparent)]
  Overlay(#[from] OverlayError),
}

#[derive(Debug)]
pub struct UpdateReport {
  pub synth: SynthOutput,
  pub assets: AssembleReport,
}

/// Summary of an update suitable for JSON output.
#[derive(Debug, Serialize)]
pub struct UpdateSummary<'a> {
  pub architecture: &'a str,
  pub icon: &'a str,
  pub policy_groups: &'a [String],
  pub assets: &'a AssembleReport,
}

impl UpdateReport {
  pub fn summary(&self) -> UpdateSummary<'_> {
    UpdateSummary {
      architecture: self.synth.architecture.as_str(),
      icon: self.synth.icon.icon(),
      policy_groups: &self.synth.policy_groups,
      assets: &self.assets,
    }
  }
}

/// Regenerate packaging metadata, then rebuild `www/` from its layers.
///
/// Assembly does not run if synthesis fails.
pub fn update_project(
  synthesizer: &MetadataSynthesizer,
  descriptor: &dyn Descriptor,
  layout: &ProjectLayout,
) -> Result<UpdateReport, UpdateError> {
  let synth = synthesizer.synthesize(descriptor, layout.platform_dir())?;
  let assets = assemble_layers(&layout.layer_sources(), &layout.www_dir())?;

  info!(project = %layout.root().display(), "project updated");
  Ok(UpdateReport { synth, assets })
}
