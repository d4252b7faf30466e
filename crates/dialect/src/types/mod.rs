mod pack;
mod pack_id;
mod rule;
mod ruleset;

pub use pack::{Pack, PackIndexEntry};
pub use pack_id::{pack_file_name, pack_id_from_file_name};
pub use rule::{ParticlePosition, RegexFlag, Rule};
pub use ruleset::{EffectiveRuleset, SourcedRule};
