use std::collections::BTreeSet;

use serde::Serialize;

use super::Rule;

/// A rule together with the pack that declared it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcedRule {
    /// Id of the pack that declared the rule.
    pub pack_id: String,
    /// Position of the rule within that pack's own rule list.
    pub index_in_pack: usize,
    pub rule: Rule,
}

/// The inheritance-resolved view of a pack.
///
/// Rules are ordered ancestor-first, so descendant rules see the output of
/// ancestor rules. Protected terms are the union over the whole chain, stored
/// lowercased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRuleset {
    /// The pack this ruleset was resolved for.
    pub pack_id: String,
    /// Linearized ancestor chain, root first, ending with `pack_id`.
    pub chain: Vec<String>,
    pub rules: Vec<SourcedRule>,
    pub protected_terms: BTreeSet<String>,
}

impl EffectiveRuleset {
    /// Iterates over the bare rules in application order.
    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|sourced| &sourced.rule)
    }

    /// Returns true if `term` is protected (case-insensitive).
    pub fn is_protected(&self, term: &str) -> bool {
        self.protected_terms.contains(&term.to_lowercase())
    }
}
