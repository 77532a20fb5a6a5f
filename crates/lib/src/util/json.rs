//! JSON output helpers.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serialize `value` as pretty JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
  let mut buf = Vec::new();
  let formatter = PrettyFormatter::with_indent(b"    ");
  let mut ser = Serializer::with_formatter(&mut buf, formatter);
  value.serialize(&mut ser)?;
  // serde_json only ever emits valid UTF-8.
  Ok(String::from_utf8_lossy(&buf).into_owned())
}
