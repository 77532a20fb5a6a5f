//! Shared utilities.
//!
//! JSON formatting, staged file writes, text sanitizing and test helpers.

pub mod json;
pub mod staging;
pub mod text;

#[cfg(test)]
pub mod testutil;
