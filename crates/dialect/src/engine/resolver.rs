//! Inheritance resolution: linearizes a pack's ancestors and merges their rules.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::engine::error::{ResolveError, compute_suggestions};
use crate::repository::PackRepository;
use crate::types::{EffectiveRuleset, SourcedRule};

/// Resolve `pack_id` into its effective ruleset.
///
/// The ancestor chain is computed by a depth-first walk over `inherits`
/// edges in declared order, emitting packs in post-order: the deepest ancestor
/// comes first and `pack_id` itself last. Rules are concatenated in chain
/// order and protected terms are unioned over the chain.
///
/// # Errors
///
/// - [`ResolveError::UnknownPack`] if `pack_id` is not in the repository
/// - [`ResolveError::UnknownParent`] if some pack in the chain inherits a missing id
/// - [`ResolveError::CycleDetected`] if the walk revisits a pack on its current path
pub fn resolve(
    repository: &PackRepository,
    pack_id: &str,
) -> Result<EffectiveRuleset, ResolveError> {
    if !repository.contains(pack_id) {
        return Err(ResolveError::UnknownPack {
            id: pack_id.to_string(),
            suggestions: compute_suggestions(pack_id, repository.ids()),
        });
    }

    let mut walk = ChainWalk::new(repository);
    walk.visit(pack_id)?;
    let chain = walk.order;

    let mut rules = Vec::new();
    let mut protected_terms = BTreeSet::new();
    for id in &chain {
        let Some(pack) = repository.get(id) else {
            continue;
        };
        rules.extend(
            pack.rules
                .iter()
                .enumerate()
                .map(|(index_in_pack, rule)| SourcedRule {
                    pack_id: pack.id.clone(),
                    index_in_pack,
                    rule: rule.clone(),
                }),
        );
        protected_terms.extend(
            pack.protected_terms
                .iter()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty()),
        );
    }

    debug!(
        pack = pack_id,
        chain = %chain.join(" -> "),
        rules = rules.len(),
        protected_terms = protected_terms.len(),
        "resolved pack"
    );

    Ok(EffectiveRuleset {
        pack_id: pack_id.to_string(),
        chain,
        rules,
        protected_terms,
    })
}

/// Depth-first walk state.
struct ChainWalk<'a> {
    repository: &'a PackRepository,
    /// Packs on the current path, outermost first.
    visiting: Vec<String>,
    /// Packs whose ancestors have been fully emitted.
    resolved: HashSet<String>,
    /// Post-order output.
    order: Vec<String>,
}

impl<'a> ChainWalk<'a> {
    fn new(repository: &'a PackRepository) -> Self {
        Self {
            repository,
            visiting: Vec::new(),
            resolved: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Visit `id`, which must exist in the repository.
    fn visit(&mut self, id: &str) -> Result<(), ResolveError> {
        if self.resolved.contains(id) {
            return Ok(());
        }
        if self.visiting.iter().any(|v| v == id) {
            let mut chain = self.visiting.clone();
            chain.push(id.to_string());
            return Err(ResolveError::CycleDetected { chain });
        }
        let Some(pack) = self.repository.get(id) else {
            return Err(ResolveError::UnknownPack {
                id: id.to_string(),
                suggestions: Vec::new(),
            });
        };

        self.visiting.push(id.to_string());
        for parent in &pack.inherits {
            if !self.repository.contains(parent) {
                return Err(ResolveError::UnknownParent {
                    child: id.to_string(),
                    parent: parent.clone(),
                });
            }
            self.visit(parent)?;
        }
        self.visiting.pop();

        self.resolved.insert(id.to_string());
        self.order.push(id.to_string());
        Ok(())
    }
}
