//! The persisted click manifest and its owned-keys merge.

mod types;

pub use types::*;
