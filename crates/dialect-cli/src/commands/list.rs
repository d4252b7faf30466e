//! Implementation of the `dialect list` command.

use miette::IntoDiagnostic;
use serde::Serialize;

use super::PacksArgs;
use crate::output::table::format_pack_table;

/// Arguments for the list command.
#[derive(Debug, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub packs: PacksArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one listed pack.
#[derive(Debug, Serialize)]
struct PackSummary<'a> {
    id: &'a str,
    label: &'a str,
    inherits: &'a [String],
    rules: usize,
    protected_terms: usize,
}

/// Run the list command.
pub fn run_list(args: ListArgs) -> miette::Result<i32> {
    let repository = args.packs.load()?;

    if args.json {
        let summaries: Vec<PackSummary<'_>> = repository
            .packs()
            .map(|pack| PackSummary {
                id: &pack.id,
                label: &pack.label,
                inherits: &pack.inherits,
                rules: pack.rules.len(),
                protected_terms: pack.protected_terms.len(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries).into_diagnostic()?);
    } else {
        println!("{}", format_pack_table(repository.packs()));
    }

    Ok(exitcode::OK)
}
