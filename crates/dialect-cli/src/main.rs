//! Dialect pack CLI entry point.
//!
//! Provides command-line tools for working with dialect pack directories:
//! - `dialect check` - Validate, compile and lint every pack
//! - `dialect list` - List the packs in a directory
//! - `dialect resolve` - Show a pack's effective ruleset
//! - `dialect transform` - Rewrite text with a pack

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_list, run_resolve, run_transform, CheckArgs, ListArgs, ResolveArgs,
    TransformArgs,
};
use tracing_subscriber::EnvFilter;

/// Dialect pack tools.
#[derive(Debug, Parser)]
#[command(name = "dialect")]
#[command(about = "Dialect pack tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate, compile and lint every pack in a directory
    Check(CheckArgs),
    /// List the packs in a directory
    List(ListArgs),
    /// Show the effective ruleset of a pack
    Resolve(ResolveArgs),
    /// Rewrite text with a pack
    Transform(TransformArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dialect=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::List(args) => run_list(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Transform(args) => run_transform(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::DATAERR);
        }
    }
}
