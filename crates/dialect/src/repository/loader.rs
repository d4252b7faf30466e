//! Loading packs from a directory laid out as `index.json` + `packs/*.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use super::{LoadError, PackRepository};
use crate::types::{Pack, PackIndexEntry};

/// Name of the index file at the root of a pack directory.
pub const INDEX_FILE: &str = "index.json";

/// Directory, relative to the root, holding one JSON file per pack.
pub const PACKS_DIR: &str = "packs";

impl PackRepository {
    /// Load every pack listed in `dir/index.json`.
    ///
    /// Each entry's `file` is read from `dir/packs/`. The pack's own `id` must
    /// match the index entry. Inheritance is not checked here; call
    /// [`PackRepository::validate`] for that.
    ///
    /// ```ignore
    /// let repository = PackRepository::load_dir("dialects")?;
    /// repository.validate()?;
    /// ```
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let index = read_index(&dir.join(INDEX_FILE))?;
        let packs_dir = dir.join(PACKS_DIR);

        let mut repository = PackRepository::new();
        for entry in index {
            let path = packs_dir.join(&entry.file);
            let pack: Pack = read_json(&path)?;
            if pack.id != entry.id {
                return Err(LoadError::IdMismatch {
                    path,
                    expected: entry.id,
                    found: pack.id,
                });
            }
            repository.insert(pack)?;
        }

        info!(dir = %dir.display(), packs = repository.len(), "loaded dialect packs");
        Ok(repository)
    }

    /// Parse a single pack from its JSON text and insert it.
    ///
    /// Returns the id of the inserted pack.
    pub fn load_str(&mut self, content: &str) -> Result<String, LoadError> {
        let pack: Pack = serde_json::from_str(content).map_err(|source| LoadError::Json {
            path: PathBuf::from("<string>"),
            source,
        })?;
        let id = pack.id.clone();
        self.insert(pack)?;
        Ok(id)
    }
}

/// Read and parse an index file.
pub fn read_index(path: &Path) -> Result<Vec<PackIndexEntry>, LoadError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
