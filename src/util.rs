//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings. Cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

/// Treat a missing or blank value as absent.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
  s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_every_occurrence() {
    assert_eq!(fill_template("{a}-{b}-{a}", &[("a", "x"), ("b", "y")]), "x-y-x");
    assert_eq!(fill_template("{missing}", &[]), "{missing}");
  }

  #[test]
  fn truncation_respects_utf8() {
    let s = "héllo";
    assert_eq!(trunc_for_log(s, 10), "héllo");
    assert!(trunc_for_log(s, 2).starts_with('h'));
  }

  #[test]
  fn blank_is_absent() {
    assert_eq!(non_blank(Some("  ")), None);
    assert_eq!(non_blank(Some(" id ")), Some("id"));
    assert_eq!(non_blank(None), None);
  }
}
