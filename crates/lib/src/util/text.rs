/// Flatten descriptor text for single-line fields.
///
/// Every `\n` becomes one space, then surrounding whitespace is trimmed.
pub fn sanitize(s: &str) -> String {
  s.replace('\n', " ").trim().to_string()
}
