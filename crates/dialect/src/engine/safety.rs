//! Static safety checks for `replace_regex` patterns.
//!
//! Rejected before a pattern is ever compiled:
//! - any-character (`.`) repetition without an upper bound, either directly
//!   (`.*`, `.+`, `.{2,}`) or through a group that contains a `.` (`(a.)+`)
//! - inline flags that turn on dot-matches-newline (`(?s)`, `(?is:...)`)
//! - any other enabled inline flag except `i` and `m`; verbose mode (`x`)
//!   would let `. *` mean `.*` and slip past the scan
//!
//! Unbounded wildcards let a match run across arbitrary text, including
//! protected terms.

use crate::engine::error::UnsafeReason;

/// Check `pattern` for unbounded wildcards and dot-matches-newline flags.
pub fn check_pattern(pattern: &str) -> Result<(), UnsafeReason> {
    let chars: Vec<char> = pattern.chars().collect();
    // One entry per open group: does the group contain a wildcard?
    let mut groups: Vec<bool> = Vec::new();
    // Whether the most recent atom can match any character.
    let mut last_atom_wildcard = false;

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                last_atom_wildcard = false;
                i += 2;
            }
            '[' => {
                last_atom_wildcard = false;
                i = skip_class(&chars, i);
            }
            '(' => {
                let closed = if chars.get(i + 1) == Some(&'?') {
                    let (next, closed) = check_group_flags(&chars, i + 2)?;
                    i = next;
                    closed
                } else {
                    i += 1;
                    false
                };
                if !closed {
                    groups.push(false);
                }
                last_atom_wildcard = false;
            }
            ')' => {
                let inner = groups.pop().unwrap_or(false);
                if inner && let Some(parent) = groups.last_mut() {
                    *parent = true;
                }
                last_atom_wildcard = inner;
                i += 1;
            }
            '.' => {
                if let Some(group) = groups.last_mut() {
                    *group = true;
                }
                last_atom_wildcard = true;
                i += 1;
            }
            '*' | '+' => {
                if last_atom_wildcard {
                    return Err(UnsafeReason::UnboundedWildcard);
                }
                i += 1;
            }
            '{' => {
                let (unbounded, next) = parse_repetition(&chars, i);
                if unbounded && last_atom_wildcard {
                    return Err(UnsafeReason::UnboundedWildcard);
                }
                i = next;
            }
            '?' => i += 1,
            _ => {
                last_atom_wildcard = false;
                i += 1;
            }
        }
    }
    Ok(())
}

/// Returns the index just past the character class starting at `start`.
fn skip_class(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    if chars.get(i) == Some(&'^') {
        i += 1;
    }
    // A leading `]` is a literal.
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    let mut depth = 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

/// Inspect the group prefix after `(?`. Only `i` and `m` may be enabled;
/// disabling flags is always allowed.
///
/// Returns the index of the first character after the prefix, and whether the
/// prefix already closed the group (a bare flag setting such as `(?i)`).
fn check_group_flags(chars: &[char], start: usize) -> Result<(usize, bool), UnsafeReason> {
    let mut i = start;
    // `(?P<name>...)` is a named group, not a flag set.
    if chars.get(i) == Some(&'P') && chars.get(i + 1) == Some(&'<') {
        return Ok((i, false));
    }
    let mut enabling = true;
    while let Some(&c) = chars.get(i) {
        match c {
            ':' => return Ok((i + 1, false)),
            ')' => return Ok((i + 1, true)),
            '-' => enabling = false,
            's' if enabling => return Err(UnsafeReason::DotMatchesNewline),
            'i' | 'm' => {}
            c if c.is_ascii_alphabetic() && enabling => {
                return Err(UnsafeReason::ForbiddenFlag(c));
            }
            c if c.is_ascii_alphabetic() => {}
            // Named groups, look-arounds and the like carry no flags.
            _ => return Ok((i, false)),
        }
        i += 1;
    }
    Ok((i, false))
}

/// Parse a `{n}`, `{n,m}` or `{n,}` repetition at `start`.
///
/// Returns whether it is unbounded and the index just past it. A `{` that does
/// not start a valid repetition is treated as a literal.
fn parse_repetition(chars: &[char], start: usize) -> (bool, usize) {
    let Some(close) = chars[start..].iter().position(|&c| c == '}') else {
        return (false, start + 1);
    };
    let body: String = chars[start + 1..start + close].iter().collect();
    let valid = !body.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == ',');
    if !valid {
        return (false, start + 1);
    }
    (body.ends_with(','), start + close + 1)
}
