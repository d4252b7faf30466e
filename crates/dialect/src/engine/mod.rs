//! The dialect rule engine.
//!
//! Resolution turns a pack id into an [`EffectiveRuleset`](crate::EffectiveRuleset),
//! compilation turns that into a [`CompiledRuleset`], and transformation
//! applies it to text. [`Engine`] wires the three together with a cache.

mod cache;
mod casing;
mod compiler;
mod error;
mod lint;
mod pipeline;
mod placeholders;
mod resolver;
mod safety;
mod sentence;
mod terms;
mod transformer;

pub use cache::RulesetCache;
pub use casing::CaseShape;
pub use compiler::{CompiledRule, CompiledRuleset, RuleAction, compile};
pub use error::{CompileError, EngineError, ResolveError, UnsafeReason, compute_suggestions};
pub use lint::{
    DEFAULT_BASE_PACK, PackWarning, lint_pack, lint_repository, lint_repository_with_base,
};
pub use pipeline::Engine;
pub use placeholders::fill_placeholders;
pub use resolver::resolve;
pub use safety::check_pattern;
pub use sentence::{Boundary, question_clauses, sentence_boundaries};
pub use terms::TermMatcher;
pub use transformer::{
    AppliedRule, DEFAULT_SEED, TransformOptions, Transformation, transform, transform_with,
};
