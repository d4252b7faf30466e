//! Compilation of an effective ruleset into executable matchers.

use std::fmt::Write as _;

use const_fnv1a_hash::fnv1a_hash_str_64;
use regex_lite::{Regex, RegexBuilder};
use tracing::debug;

use crate::engine::error::{CompileError, UnsafeReason};
use crate::engine::safety::check_pattern;
use crate::engine::terms::TermMatcher;
use crate::types::{EffectiveRuleset, RegexFlag, Rule};

/// An effective ruleset compiled for repeated application.
///
/// Immutable once built and safe to share across threads. Compiling the same
/// ruleset twice yields values with equal [`fingerprint`](Self::fingerprint)s,
/// so compiled rulesets can be cached by pack id.
#[derive(Debug, Clone)]
pub struct CompiledRuleset {
    pack_id: String,
    chain: Vec<String>,
    protected: TermMatcher,
    rules: Vec<CompiledRule>,
}

/// One compiled rule with its provenance.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Index in the effective rule list.
    pub index: usize,
    /// Pack that declared the rule.
    pub pack_id: String,
    pub action: RuleAction,
}

/// The executable form of a [`Rule`].
#[derive(Debug, Clone)]
pub enum RuleAction {
    ReplaceWord {
        matcher: TermMatcher,
        to: String,
        only_in_questions: bool,
    },
    ReplaceRegex {
        regex: Regex,
        to: String,
        flags: Vec<RegexFlag>,
        preserve_case: bool,
    },
    AppendParticle {
        particle: String,
        probability: f64,
    },
}

impl CompiledRuleset {
    pub fn pack_id(&self) -> &str {
        &self.pack_id
    }

    /// The resolved ancestor chain, root first.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Matcher over the union of all protected terms.
    pub fn protected_terms(&self) -> &TermMatcher {
        &self.protected
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// A stable 64-bit FNV-1a hash of the compiled form.
    pub fn fingerprint(&self) -> u64 {
        fnv1a_hash_str_64(&self.canonical())
    }

    /// Deterministic text rendering of everything that affects transformation.
    fn canonical(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "pack {}", self.pack_id);
        let _ = writeln!(out, "chain {}", self.chain.join(" "));
        for term in self.protected.terms() {
            let _ = writeln!(out, "protect {term:?}");
        }
        for rule in &self.rules {
            let _ = write!(out, "{} {} ", rule.index, rule.pack_id);
            let _ = match &rule.action {
                RuleAction::ReplaceWord {
                    matcher,
                    to,
                    only_in_questions,
                } => writeln!(
                    out,
                    "word {:?} {to:?} {only_in_questions}",
                    matcher.terms().collect::<Vec<_>>()
                ),
                RuleAction::ReplaceRegex {
                    regex,
                    to,
                    flags,
                    preserve_case,
                } => writeln!(
                    out,
                    "regex {:?} {flags:?} {to:?} {preserve_case}",
                    regex.as_str()
                ),
                RuleAction::AppendParticle {
                    particle,
                    probability,
                } => writeln!(out, "particle {particle:?} {:016x}", probability.to_bits()),
            };
        }
        out
    }
}

/// Compile an effective ruleset.
///
/// # Errors
///
/// Fails on the first rule that cannot be compiled safely; nothing is
/// partially compiled.
pub fn compile(ruleset: &EffectiveRuleset) -> Result<CompiledRuleset, CompileError> {
    let rules = ruleset
        .rules
        .iter()
        .enumerate()
        .map(|(index, sourced)| {
            Ok(CompiledRule {
                index,
                pack_id: sourced.pack_id.clone(),
                action: compile_rule(index, &sourced.rule)?,
            })
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    let compiled = CompiledRuleset {
        pack_id: ruleset.pack_id.clone(),
        chain: ruleset.chain.clone(),
        protected: TermMatcher::new(&ruleset.protected_terms),
        rules,
    };
    debug!(
        pack = %compiled.pack_id,
        rules = compiled.rules.len(),
        fingerprint = %format!("{:016x}", compiled.fingerprint()),
        "compiled ruleset"
    );
    Ok(compiled)
}

fn compile_rule(index: usize, rule: &Rule) -> Result<RuleAction, CompileError> {
    match rule {
        Rule::ReplaceWord {
            from,
            to,
            only_in_questions,
        } => {
            let matcher = TermMatcher::new([from]);
            if matcher.is_empty() {
                return Err(CompileError::EmptyWord { rule_index: index });
            }
            Ok(RuleAction::ReplaceWord {
                matcher,
                to: to.clone(),
                only_in_questions: *only_in_questions,
            })
        }
        Rule::ReplaceRegex {
            pattern,
            to,
            flags,
            preserve_case,
        } => {
            let unsafe_pattern = |reason| CompileError::UnsafePattern {
                rule_index: index,
                reason,
            };
            check_pattern(pattern).map_err(unsafe_pattern)?;
            let mut flags = flags.clone();
            flags.sort();
            flags.dedup();
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(flags.contains(&RegexFlag::IgnoreCase))
                .multi_line(flags.contains(&RegexFlag::Multiline))
                .dot_matches_new_line(false)
                .build()
                .map_err(|e| unsafe_pattern(UnsafeReason::Syntax(e.to_string())))?;
            Ok(RuleAction::ReplaceRegex {
                regex,
                to: to.clone(),
                flags,
                preserve_case: *preserve_case,
            })
        }
        Rule::AppendParticle {
            particle,
            probability,
            ..
        } => {
            if !(0.0..=1.0).contains(probability) {
                return Err(CompileError::InvalidProbability {
                    rule_index: index,
                    probability: *probability,
                });
            }
            if particle.trim().is_empty() {
                return Err(CompileError::EmptyParticle { rule_index: index });
            }
            Ok(RuleAction::AppendParticle {
                particle: particle.trim().to_string(),
                probability: *probability,
            })
        }
    }
}
