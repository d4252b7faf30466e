//! CLI command implementations.

mod check;
mod list;
mod resolve;
mod transform;

use std::path::PathBuf;

use dialect::PackRepository;
use tracing::debug;

use crate::output::load_report;

pub use check::{run_check, CheckArgs};
pub use list::{run_list, ListArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use transform::{run_transform, TransformArgs};

/// Location of the pack directory, shared by every command.
#[derive(Debug, clap::Args)]
pub struct PacksArgs {
    /// Pack directory (containing index.json and packs/)
    #[arg(long, env = "DIALECT_PACKS", default_value = "dialects")]
    pub packs: PathBuf,
}

impl PacksArgs {
    /// Load the repository, turning load failures into diagnostics.
    pub fn load(&self) -> miette::Result<PackRepository> {
        debug!(dir = %self.packs.display(), "loading pack directory");
        PackRepository::load_dir(&self.packs).map_err(|e| load_report(&e))
    }
}
