//! Brace-based re-indenter behind the editor's "format" action.
//!
//! Purely lexical: braces and semicolons inside string literals are treated
//! like any other.

const INDENT: &str = "  ";

pub fn format_code(code: &str) -> String {
  let flattened = code
    .lines()
    .map(str::trim)
    .collect::<Vec<_>>()
    .join("\n")
    .replace('{', " {\n")
    .replace('}', "\n}\n")
    .replace(';', ";\n");

  let mut depth: i32 = 0;
  let mut out = Vec::new();
  for line in flattened.lines().map(str::trim).filter(|l| !l.is_empty()) {
    let opens = line.contains('{');
    let closes = line.contains('}');
    let indent = if closes { depth - 1 } else { depth };
    out.push(format!("{}{}", INDENT.repeat(indent.max(0) as usize), line));
    // Depth is a running count and may dip below zero; only the rendered indent is clamped.
    if opens { depth += 1; }
    if closes { depth -= 1; }
  }
  out.join("\n")
}
