//! Shared cache of compiled rulesets keyed by pack id.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::engine::compiler::{CompiledRuleset, compile};
use crate::engine::error::EngineError;
use crate::engine::resolver::resolve;
use crate::repository::PackRepository;

/// A thread-safe `pack id -> CompiledRuleset` map with compute-once semantics.
///
/// Lookups take a read lock. A miss takes the write lock for the whole
/// resolve-and-compile step, so concurrent callers asking for the same pack
/// compile it once. Cached values are immutable and shared through `Arc`.
#[derive(Debug, Default)]
pub struct RulesetCache {
    entries: RwLock<HashMap<String, Arc<CompiledRuleset>>>,
}

impl RulesetCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached ruleset without compiling.
    pub fn get(&self, pack_id: &str) -> Option<Arc<CompiledRuleset>> {
        self.read().get(pack_id).cloned()
    }

    /// Get the compiled ruleset for `pack_id`, resolving and compiling it
    /// against `repository` on first use. Failures are not cached.
    pub fn get_or_compile(
        &self,
        repository: &PackRepository,
        pack_id: &str,
    ) -> Result<Arc<CompiledRuleset>, EngineError> {
        if let Some(compiled) = self.get(pack_id) {
            return Ok(compiled);
        }

        let mut entries = self.write();
        if let Some(compiled) = entries.get(pack_id) {
            return Ok(Arc::clone(compiled));
        }

        let ruleset = resolve(repository, pack_id)?;
        let compiled = compile(&ruleset).map_err(|source| EngineError::Compile {
            pack_id: pack_id.to_string(),
            source,
        })?;
        let compiled = Arc::new(compiled);
        entries.insert(pack_id.to_string(), Arc::clone(&compiled));
        debug!(pack = pack_id, cached = entries.len(), "cached compiled ruleset");
        Ok(compiled)
    }

    /// Drop the entry for `pack_id`. Returns true if one was present.
    ///
    /// Descendants of the pack are not dropped; use [`clear`](Self::clear)
    /// after changing a pack other packs inherit from.
    pub fn invalidate(&self, pack_id: &str) -> bool {
        self.write().remove(pack_id).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are immutable once inserted, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CompiledRuleset>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CompiledRuleset>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
