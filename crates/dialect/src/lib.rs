//! Dialect packs: layered, protected-term-aware text rewriting.
//!
//! A [`Pack`] declares rewrite [`Rule`]s and protected terms and may inherit
//! from other packs. The engine resolves a pack's inheritance chain, compiles
//! the merged rules into safe matchers and applies them to text
//! deterministically.
//!
//! ```
//! use dialect::{Pack, PackRepository, Rule, compile, transform};
//!
//! let repository = PackRepository::from_packs([
//!     Pack::builder()
//!         .id("nl/standard")
//!         .label("Standaard Nederlands")
//!         .protected_terms(vec!["moet".to_string()])
//!         .build(),
//!     Pack::builder()
//!         .id("vlaams/basis")
//!         .label("Vlaams basis")
//!         .inherits(vec!["nl/standard".to_string()])
//!         .rules(vec![
//!             Rule::replace_word_in_questions("wat", "wa"),
//!             Rule::append_particle("zeg", 1.0),
//!         ])
//!         .build(),
//! ])
//! .unwrap();
//!
//! let ruleset = repository.resolve("vlaams/basis").unwrap();
//! let compiled = compile(&ruleset).unwrap();
//! let result = transform("Wat moet dat? Dat is goed.", &compiled, Some(42));
//! assert_eq!(result.output, "Wa moet dat zeg? Dat is goed zeg.");
//! ```

pub mod engine;
pub mod repository;
pub mod types;

pub use engine::{
    AppliedRule, CompileError, CompiledRuleset, Engine, EngineError, PackWarning, ResolveError,
    RulesetCache, TransformOptions, Transformation, UnsafeReason, compile, resolve, transform,
    transform_with,
};
pub use repository::{LoadError, PackRepository};
pub use types::{
    EffectiveRuleset, Pack, PackIndexEntry, ParticlePosition, RegexFlag, Rule, SourcedRule,
    pack_file_name, pack_id_from_file_name,
};
