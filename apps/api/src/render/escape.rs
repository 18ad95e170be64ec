//! LaTeX escaping for free text and hyperlink targets.
//!
//! Usage rule: escape once, at the point of embedding. `escape` is not
//! idempotent: running it over its own output re-escapes the backslashes and
//! braces it introduced.

use serde_json::Value;

/// The ten characters with special meaning in LaTeX body text.
pub const RESERVED: &[char] = &['\\', '&', '%', '$', '#', '_', '{', '}', '~', '^'];

/// Maps arbitrary text to markup-safe text in a single left-to-right pass.
///
/// Because the pass is single, the backslashes and braces introduced by a
/// substitution are never revisited.
pub fn escape(text: &str) -> String {
    if !text.contains(RESERVED) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}

/// Textual representation of a JSON leaf. Non-text scalars are coerced; null is empty.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Structured values are not leaves; fall back to their JSON text.
        other => other.to_string(),
    }
}

/// Makes a hyperlink target safe for the first argument of `\href`.
///
/// Backslashes, braces and whitespace are percent-encoded; `%` and `#` are
/// backslash-escaped as hyperref expects.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '\\' => out.push_str(r"\%5C"),
            '{' => out.push_str(r"\%7B"),
            '}' => out.push_str(r"\%7D"),
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            c if c.is_whitespace() => out.push_str(r"\%20"),
            other => out.push(other),
        }
    }
    out
}
