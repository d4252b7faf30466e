//! Miette diagnostics for pack loading and resolution errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use dialect::{EngineError, LoadError, ResolveError};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for malformed pack JSON.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid pack file: {message}")]
#[diagnostic(code(dialect::json))]
pub struct PackDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl PackDiagnostic {
    /// Create a diagnostic from a JSON error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // serde_json reports 1-based lines and columns.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);
        let offset = offset.min(content.len());

        PackDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
        }
    }
}

/// A diagnostic for errors without source context, with an optional hint.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(dialect::pack))]
pub struct EngineDiagnostic {
    message: String,

    #[help]
    help: Option<String>,
}

/// Convert a load error into a report, pointing into the file for JSON errors.
pub fn load_report(err: &LoadError) -> Report {
    if let LoadError::Json { path, source } = err {
        if let Ok(content) = read_to_string(path) {
            return PackDiagnostic::from_json_error(path, &content, source).into();
        }
    }
    EngineDiagnostic {
        message: err.to_string(),
        help: None,
    }
    .into()
}

/// Convert a resolve or compile error into a report.
pub fn engine_report(err: &EngineError) -> Report {
    let help = match err {
        EngineError::Resolve(ResolveError::UnknownParent { .. }) => {
            Some("add the missing pack to index.json or fix the `inherits` entry".to_string())
        }
        EngineError::Resolve(ResolveError::CycleDetected { .. }) => {
            Some("remove one `inherits` edge to break the cycle".to_string())
        }
        EngineError::Compile { .. } => Some(
            "patterns may not repeat `.` without a bound or enable inline flags besides `i`, `m`"
                .to_string(),
        ),
        EngineError::Resolve(ResolveError::UnknownPack { .. }) => None,
    };
    EngineDiagnostic {
        message: err.to_string(),
        help,
    }
    .into()
}
