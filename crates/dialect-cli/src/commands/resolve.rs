//! Implementation of the `dialect resolve` command.

use dialect::{compile, EffectiveRuleset, EngineError};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::PacksArgs;
use crate::output::engine_report;
use crate::output::table::format_rule_table;

/// Arguments for the resolve command.
#[derive(Debug, clap::Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub packs: PacksArgs,

    /// Pack id to resolve (e.g. vlaams/west-vlaams)
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a resolved pack.
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    #[serde(flatten)]
    ruleset: &'a EffectiveRuleset,
    fingerprint: String,
}

/// Run the resolve command.
pub fn run_resolve(args: ResolveArgs) -> miette::Result<i32> {
    let repository = args.packs.load()?;
    let ruleset = repository
        .resolve(&args.id)
        .map_err(|e| engine_report(&EngineError::from(e)))?;
    let compiled = compile(&ruleset).map_err(|source| {
        engine_report(&EngineError::Compile {
            pack_id: args.id.clone(),
            source,
        })
    })?;
    let fingerprint = format!("{:016x}", compiled.fingerprint());

    if args.json {
        let output = ResolveOutput {
            ruleset: &ruleset,
            fingerprint,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    println!("{} {}", "chain:".bold(), ruleset.chain.join(" -> "));
    println!("{} {}", "fingerprint:".bold(), fingerprint);
    if ruleset.rules.is_empty() {
        println!("no rules");
    } else {
        println!("{}", format_rule_table(&ruleset.rules));
    }
    if !ruleset.protected_terms.is_empty() {
        println!("\nProtected terms:");
        for term in &ruleset.protected_terms {
            println!("  - {}", term);
        }
    }

    Ok(exitcode::OK)
}
