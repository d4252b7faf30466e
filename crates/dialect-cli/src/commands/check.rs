//! Implementation of the `dialect check` command.

use dialect::engine::{lint_repository_with_base, DEFAULT_BASE_PACK};
use dialect::Engine;
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::PacksArgs;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub packs: PacksArgs,

    /// Pack every other pack is expected to build on
    #[arg(long, default_value = DEFAULT_BASE_PACK)]
    pub base: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for check results.
#[derive(Debug, Serialize)]
struct CheckReport {
    packs: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Run the check command.
///
/// Every pack is resolved and compiled, so unknown parents, cycles and unsafe
/// patterns are all reported in one run. Lints never change the exit code.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let repository = args.packs.load()?;
    let warnings: Vec<String> = lint_repository_with_base(&repository, &args.base)
        .iter()
        .map(ToString::to_string)
        .collect();

    let engine = Engine::new(repository);
    let errors: Vec<String> = engine
        .repository()
        .ids()
        .filter_map(|id| engine.compiled(id).err())
        .map(|err| err.to_string())
        .collect();

    let report = CheckReport {
        packs: engine.repository().len(),
        errors,
        warnings,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        for warning in &report.warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
        for error in &report.errors {
            println!("{} {}", "error:".red().bold(), error);
        }
        if report.errors.is_empty() {
            println!("{} {} packs checked", "ok:".green().bold(), report.packs);
        }
    }

    if report.errors.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
