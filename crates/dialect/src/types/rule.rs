use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A declarative rewrite rule.
///
/// The set of rule kinds is closed: the transformer matches on this enum
/// exhaustively, so adding a kind forces every call site to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Whole-word, case-aware replacement.
    ReplaceWord {
        from: String,
        to: String,
        /// Only rewrite inside clauses ending in `?`.
        #[serde(default)]
        only_in_questions: bool,
    },

    /// Pattern-based replacement. Patterns are restricted by the compiler:
    /// no unbounded wildcard repetition and no dot-matches-newline mode.
    ReplaceRegex {
        pattern: String,
        to: String,
        #[serde(default)]
        flags: Vec<RegexFlag>,
        /// Re-case the replacement to match an all-upper or capitalized match.
        #[serde(default)]
        preserve_case: bool,
    },

    /// Stochastic particle insertion at sentence boundaries.
    AppendParticle {
        particle: String,
        probability: f64,
        #[serde(default = "default_positions")]
        positions: Vec<ParticlePosition>,
    },
}

impl Rule {
    /// A `replace_word` rule that applies everywhere.
    pub fn replace_word(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule::ReplaceWord {
            from: from.into(),
            to: to.into(),
            only_in_questions: false,
        }
    }

    /// A `replace_word` rule restricted to question clauses.
    pub fn replace_word_in_questions(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule::ReplaceWord {
            from: from.into(),
            to: to.into(),
            only_in_questions: true,
        }
    }

    /// A `replace_regex` rule without flags or case preservation.
    pub fn replace_regex(pattern: impl Into<String>, to: impl Into<String>) -> Self {
        Rule::ReplaceRegex {
            pattern: pattern.into(),
            to: to.into(),
            flags: Vec::new(),
            preserve_case: false,
        }
    }

    /// An end-of-sentence `append_particle` rule.
    pub fn append_particle(particle: impl Into<String>, probability: f64) -> Self {
        Rule::AppendParticle {
            particle: particle.into(),
            probability,
            positions: default_positions(),
        }
    }

    /// The serialized `type` name of this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::ReplaceWord { .. } => "replace_word",
            Rule::ReplaceRegex { .. } => "replace_regex",
            Rule::AppendParticle { .. } => "append_particle",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Rule::ReplaceWord {
                from,
                to,
                only_in_questions,
            } => {
                write!(f, "replace_word {from:?} -> {to:?}")?;
                if *only_in_questions {
                    write!(f, " (questions only)")?;
                }
                Ok(())
            }
            Rule::ReplaceRegex {
                pattern,
                to,
                flags,
                preserve_case,
            } => {
                write!(f, "replace_regex /{pattern}/")?;
                for flag in flags {
                    write!(f, "{}", flag.letter())?;
                }
                write!(f, " -> {to:?}")?;
                if *preserve_case {
                    write!(f, " (preserve case)")?;
                }
                Ok(())
            }
            Rule::AppendParticle {
                particle,
                probability,
                ..
            } => write!(f, "append_particle {particle:?} p={probability}"),
        }
    }
}

/// Flags accepted on `replace_regex` rules. Nothing else is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegexFlag {
    #[serde(rename = "IGNORECASE")]
    IgnoreCase,
    #[serde(rename = "MULTILINE")]
    Multiline,
}

impl RegexFlag {
    /// The inline-flag letter for this flag (`i` or `m`).
    pub fn letter(self) -> char {
        match self {
            RegexFlag::IgnoreCase => 'i',
            RegexFlag::Multiline => 'm',
        }
    }
}

/// Where a particle may be inserted. Only sentence ends are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticlePosition {
    EndOfSentence,
}

fn default_positions() -> Vec<ParticlePosition> {
    vec![ParticlePosition::EndOfSentence]
}
