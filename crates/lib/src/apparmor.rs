//! `apparmor.json` generation.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_POLICY_GROUPS, POLICY_VERSION};
use crate::descriptor::FeatureParam;
use crate::util::json::to_pretty_json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityPolicy {
  pub policy_groups: Vec<String>,
  pub policy_version: f64,
}

impl SecurityPolicy {
  pub fn from_features(features: &[FeatureParam]) -> Self {
    Self {
      policy_groups: aggregate_policy_groups(features),
      policy_version: POLICY_VERSION,
    }
  }

  pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
    to_pretty_json(self)
  }
}

/// Default groups first, then each new group in feature order.
///
/// Empty group names and repeats are skipped.
pub fn aggregate_policy_groups(features: &[FeatureParam]) -> Vec<String> {
  let mut groups: Vec<String> = DEFAULT_POLICY_GROUPS.iter().map(|g| g.to_string()).collect();

  for group in features.iter().filter_map(|f| f.policy_group.as_deref()) {
    if !group.is_empty() && !groups.iter().any(|g| g == group) {
      groups.push(group.to_string());
    }
  }

  groups
}
