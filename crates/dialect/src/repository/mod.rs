//! In-memory pack storage and the on-disk loader that fills it.

mod error;
mod loader;

use std::collections::BTreeMap;

use tracing::debug;

pub use error::LoadError;
pub use loader::{INDEX_FILE, PACKS_DIR, read_index};

use crate::engine::{ResolveError, resolve};
use crate::types::{EffectiveRuleset, Pack};

/// A collection of packs keyed by id.
///
/// The repository is filled once (from packs built in code, or from disk via
/// [`PackRepository::load_dir`]) and read-only afterwards. Packs are kept in id
/// order so enumeration and eager validation are deterministic.
#[derive(Debug, Default, Clone)]
pub struct PackRepository {
    packs: BTreeMap<String, Pack>,
}

impl PackRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from packs, rejecting duplicate ids.
    pub fn from_packs(packs: impl IntoIterator<Item = Pack>) -> Result<Self, LoadError> {
        let mut repository = Self::new();
        for pack in packs {
            repository.insert(pack)?;
        }
        Ok(repository)
    }

    /// Insert a pack. Returns an error if a pack with the same id exists.
    pub fn insert(&mut self, pack: Pack) -> Result<(), LoadError> {
        if self.packs.contains_key(&pack.id) {
            return Err(LoadError::DuplicatePack { id: pack.id });
        }
        debug!(pack = %pack.id, rules = pack.rules.len(), "registered pack");
        self.packs.insert(pack.id.clone(), pack);
        Ok(())
    }

    /// Get a pack by id.
    pub fn get(&self, id: &str) -> Option<&Pack> {
        self.packs.get(id)
    }

    /// Returns true if a pack with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.packs.contains_key(id)
    }

    /// All packs, ordered by id.
    pub fn packs(&self) -> impl Iterator<Item = &Pack> {
        self.packs.values()
    }

    /// All pack ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.packs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Resolve a pack's effective ruleset. See [`resolve`].
    pub fn resolve(&self, id: &str) -> Result<EffectiveRuleset, ResolveError> {
        resolve(self, id)
    }

    /// Eagerly check that every pack resolves: all parents exist and the
    /// inheritance graph is acyclic. Returns the first error in id order.
    pub fn validate(&self) -> Result<(), ResolveError> {
        for id in self.ids() {
            self.resolve(id)?;
        }
        Ok(())
    }
}
