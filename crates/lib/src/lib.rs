//! touchpack-lib: click packaging metadata and asset assembly
//!
//! This crate provides the two halves of a platform project refresh:
//! - `synth`: merges `manifest.json` and regenerates `cordova.desktop` and
//!   `apparmor.json` from an application descriptor
//! - `overlay`: rebuilds the `www/` tree from base, platform-stock and
//!   override layers
//!
//! `update` runs both against a discovered `project` layout.

pub mod apparmor;
pub mod consts;
pub mod descriptor;
pub mod desktop;
pub mod manifest;
pub mod overlay;
pub mod platform;
pub mod project;
pub mod synth;
pub mod update;
pub mod util;

pub use descriptor::{AppDescriptor, Descriptor};
pub use overlay::{AssetLayer, LAYER_ORDER, assemble};
pub use project::ProjectLayout;
pub use synth::{MetadataSynthesizer, SynthError};
pub use update::update_project;
