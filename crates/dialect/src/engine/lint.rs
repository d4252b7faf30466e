//! Static lint rules for pack definitions.
//!
//! Lints flag data that loads and compiles but is probably not what the pack
//! author meant. They are warnings: the engine runs fine regardless.

use thiserror::Error;

use crate::repository::PackRepository;
use crate::types::{Pack, ParticlePosition, Rule};

/// Id of the pack every dialect pack is expected to build on.
pub const DEFAULT_BASE_PACK: &str = "vlaams/basis";

/// A lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackWarning {
    /// The pack protects nothing.
    #[error("pack '{pack}' has no protected terms")]
    EmptyProtectedTerms { pack: String },

    /// A protected term is empty or whitespace.
    #[error("pack '{pack}' has a blank protected term")]
    BlankTerm { pack: String },

    /// An `append_particle` rule asks for a position other than end of sentence.
    #[error("pack '{pack}' rule {rule_index}: only positions [end_of_sentence] are supported")]
    UnsupportedPosition { pack: String, rule_index: usize },

    /// A `replace_word` rule targets a term its own pack protects.
    #[error("pack '{pack}' rule {rule_index}: replace_word targets protected term '{term}' and can never apply")]
    RuleRewritesProtectedTerm {
        pack: String,
        rule_index: usize,
        term: String,
    },

    /// The expected base pack is missing from the repository.
    #[error("base pack '{id}' is missing")]
    MissingBasePack { id: String },
}

/// Runs every per-pack lint over `pack`.
pub fn lint_pack(pack: &Pack) -> Vec<PackWarning> {
    let mut warnings = Vec::new();
    lint_protected_terms(pack, &mut warnings);
    lint_particle_positions(pack, &mut warnings);
    lint_rewrites_protected(pack, &mut warnings);
    warnings
}

/// Runs per-pack lints over every pack, in id order.
pub fn lint_repository(repository: &PackRepository) -> Vec<PackWarning> {
    repository.packs().flat_map(lint_pack).collect()
}

/// Like [`lint_repository`], also requiring `base` to exist.
pub fn lint_repository_with_base(repository: &PackRepository, base: &str) -> Vec<PackWarning> {
    let mut warnings = Vec::new();
    if !repository.contains(base) {
        warnings.push(PackWarning::MissingBasePack {
            id: base.to_string(),
        });
    }
    warnings.extend(lint_repository(repository));
    warnings
}

fn lint_protected_terms(pack: &Pack, warnings: &mut Vec<PackWarning>) {
    if pack.protected_terms.is_empty() {
        warnings.push(PackWarning::EmptyProtectedTerms {
            pack: pack.id.clone(),
        });
    }
    if pack.protected_terms.iter().any(|term| term.trim().is_empty()) {
        warnings.push(PackWarning::BlankTerm {
            pack: pack.id.clone(),
        });
    }
}

fn lint_particle_positions(pack: &Pack, warnings: &mut Vec<PackWarning>) {
    for (rule_index, rule) in pack.rules.iter().enumerate() {
        let Rule::AppendParticle { positions, .. } = rule else {
            continue;
        };
        if positions.as_slice() != [ParticlePosition::EndOfSentence] {
            warnings.push(PackWarning::UnsupportedPosition {
                pack: pack.id.clone(),
                rule_index,
            });
        }
    }
}

/// A word rule whose `from` is protected in the same pack never fires, since
/// the term is masked before any rule runs.
fn lint_rewrites_protected(pack: &Pack, warnings: &mut Vec<PackWarning>) {
    for (rule_index, rule) in pack.rules.iter().enumerate() {
        let Rule::ReplaceWord { from, .. } = rule else {
            continue;
        };
        let from = from.trim().to_lowercase();
        if let Some(term) = pack
            .protected_terms
            .iter()
            .find(|term| term.trim().to_lowercase() == from)
        {
            warnings.push(PackWarning::RuleRewritesProtectedTerm {
                pack: pack.id.clone(),
                rule_index,
                term: term.clone(),
            });
        }
    }
}
