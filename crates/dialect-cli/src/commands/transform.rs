//! Implementation of the `dialect transform` command.

use std::collections::BTreeMap;
use std::io::{read_to_string, stdin};

use dialect::{Engine, TransformOptions};
use miette::IntoDiagnostic;

use super::PacksArgs;
use crate::output::engine_report;

/// Arguments for the transform command.
#[derive(Debug, clap::Args)]
pub struct TransformArgs {
    #[command(flatten)]
    pub packs: PacksArgs,

    /// Pack id to apply (e.g. vlaams/west-vlaams)
    #[arg(long, required = true)]
    pub pack: String,

    /// Seed for particle draws
    #[arg(long, env = "DIALECT_SEED")]
    pub seed: Option<u64>,

    /// Skip append_particle rules
    #[arg(long)]
    pub no_particles: bool,

    /// Placeholder bindings in name=value format (repeatable)
    #[arg(short = 'b', long = "bind", value_parser = parse_key_val)]
    pub bindings: Vec<(String, String)>,

    /// Output the applied rules as JSON alongside the text
    #[arg(long)]
    pub json: bool,

    /// Text to transform. Read from stdin when absent.
    pub text: Option<String>,
}

/// Parse a key=value binding string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid binding format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the transform command.
pub fn run_transform(args: TransformArgs) -> miette::Result<i32> {
    let text = match args.text {
        Some(text) => text,
        None => read_to_string(stdin()).into_diagnostic()?,
    };

    let options = TransformOptions::builder()
        .maybe_seed(args.seed)
        .particles(!args.no_particles)
        .bindings(args.bindings.into_iter().collect::<BTreeMap<_, _>>())
        .build();

    let engine = Engine::new(args.packs.load()?);
    let result = engine
        .transform_with(&args.pack, &text, &options)
        .map_err(|e| engine_report(&e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        print!("{}", result.output);
        if !result.output.ends_with('\n') {
            println!();
        }
    }

    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::parse_key_val;

    #[test]
    fn bindings_split_on_first_equals() {
        assert_eq!(
            parse_key_val("pronoun_subject=gij"),
            Ok(("pronoun_subject".to_string(), "gij".to_string()))
        );
        assert_eq!(
            parse_key_val("x=a=b"),
            Ok(("x".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("pronoun_subject").is_err());
    }
}
