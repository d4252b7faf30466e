//! The user-facing engine: a pack repository plus a compiled-ruleset cache.

use std::sync::Arc;

use crate::engine::cache::RulesetCache;
use crate::engine::compiler::CompiledRuleset;
use crate::engine::error::EngineError;
use crate::engine::transformer::{TransformOptions, Transformation, transform_with};
use crate::repository::PackRepository;

/// Resolves, compiles and applies dialect packs.
///
/// The repository is read-only once handed to the engine. Compiled rulesets
/// are cached per pack id, so repeated transforms against the same pack only
/// pay for compilation once. `Engine` is `Send + Sync` and can be shared
/// across threads behind an `Arc`.
///
/// # Example
///
/// ```
/// use dialect::{Engine, Pack, PackRepository, Rule};
///
/// let repository = PackRepository::from_packs([Pack::builder()
///     .id("vlaams/basis")
///     .label("Vlaams basis")
///     .protected_terms(vec!["moet".to_string()])
///     .rules(vec![Rule::replace_word("jij", "gij")])
///     .build()])
/// .unwrap();
///
/// let engine = Engine::new(repository);
/// let result = engine.transform("vlaams/basis", "Jij komt?", Some(1)).unwrap();
/// assert_eq!(result.output, "Gij komt?");
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    repository: PackRepository,
    cache: RulesetCache,
}

impl Engine {
    pub fn new(repository: PackRepository) -> Self {
        Self {
            repository,
            cache: RulesetCache::new(),
        }
    }

    pub fn repository(&self) -> &PackRepository {
        &self.repository
    }

    pub fn cache(&self) -> &RulesetCache {
        &self.cache
    }

    /// The compiled ruleset for `pack_id`, compiled on first use.
    pub fn compiled(&self, pack_id: &str) -> Result<Arc<CompiledRuleset>, EngineError> {
        self.cache.get_or_compile(&self.repository, pack_id)
    }

    /// Transform `text` with the pack `pack_id`.
    pub fn transform(
        &self,
        pack_id: &str,
        text: &str,
        seed: Option<u64>,
    ) -> Result<Transformation, EngineError> {
        let options = TransformOptions::builder().maybe_seed(seed).build();
        self.transform_with(pack_id, text, &options)
    }

    /// Transform `text` with the pack `pack_id` under explicit options.
    pub fn transform_with(
        &self,
        pack_id: &str,
        text: &str,
        options: &TransformOptions,
    ) -> Result<Transformation, EngineError> {
        let compiled = self.compiled(pack_id)?;
        Ok(transform_with(text, &compiled, options))
    }
}
