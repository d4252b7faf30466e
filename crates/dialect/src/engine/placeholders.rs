//! `{name}` placeholders in replacement text.

use std::collections::BTreeMap;

/// Substitute bound `{name}` placeholders in `template`.
///
/// Names are ASCII letters, digits and `_`. Unbound placeholders and stray
/// braces are copied through unchanged.
pub fn fill_placeholders(template: &str, bindings: &BTreeMap<String, String>) -> String {
    if bindings.is_empty() || !template.contains('{') {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..name_len];
        match bindings.get(name) {
            Some(value) if !name.is_empty() && after[name_len..].starts_with('}') => {
                out.push_str(value);
                rest = &after[name_len + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
