//! Error types for the dialect engine.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Errors produced while resolving a pack's inheritance chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The requested pack id is not in the repository.
    #[error("unknown pack '{id}'{}", format_suggestions(suggestions))]
    UnknownPack { id: String, suggestions: Vec<String> },

    /// A pack inherits from an id that is not in the repository.
    #[error("pack '{child}' inherits unknown pack '{parent}'")]
    UnknownParent { child: String, parent: String },

    /// Following `inherits` edges revisited a pack already on the current path.
    #[error("inheritance cycle detected: {}", chain.join(" -> "))]
    CycleDetected { chain: Vec<String> },
}

/// Errors produced while compiling an effective ruleset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A `replace_regex` pattern failed the safety checks.
    #[error("rule {rule_index}: unsafe pattern: {reason}")]
    UnsafePattern {
        rule_index: usize,
        reason: UnsafeReason,
    },

    /// A particle probability is outside `[0, 1]` or not a number.
    #[error("rule {rule_index}: probability {probability} is outside 0..=1")]
    InvalidProbability { rule_index: usize, probability: f64 },

    /// An `append_particle` rule has a blank particle.
    #[error("rule {rule_index}: particle is empty")]
    EmptyParticle { rule_index: usize },

    /// A `replace_word` rule has a blank `from` word.
    #[error("rule {rule_index}: replace_word 'from' is empty")]
    EmptyWord { rule_index: usize },
}

/// Why a regex pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeReason {
    /// `.` repeated without an upper bound (`.*`, `.+`, `.{n,}`).
    UnboundedWildcard,
    /// An inline flag group turns on dot-matches-newline (`(?s)`).
    DotMatchesNewline,
    /// An inline flag group enables a flag other than `i` or `m`.
    ForbiddenFlag(char),
    /// The pattern is not a valid regular expression.
    Syntax(String),
}

impl Display for UnsafeReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UnsafeReason::UnboundedWildcard => write!(f, "unbounded wildcard repetition"),
            UnsafeReason::DotMatchesNewline => write!(f, "dot-matches-newline flag"),
            UnsafeReason::ForbiddenFlag(flag) => write!(f, "inline flag '{flag}' is not allowed"),
            UnsafeReason::Syntax(message) => write!(f, "invalid syntax: {message}"),
        }
    }
}

/// Any error from the resolve-then-compile pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("pack '{pack_id}': {source}")]
    Compile {
        pack_id: String,
        #[source]
        source: CompileError,
    },
}

/// Returns up to three known ids within a small edit distance of `id`, closest first.
pub fn compute_suggestions<'a>(
    id: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if id.chars().count() > 3 { 2 } else { 1 };
    let mut candidates: Vec<(usize, &str)> = available
        .into_iter()
        .map(|candidate| (strsim::levenshtein(id, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}
