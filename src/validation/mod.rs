//! Pre-composition validation of discovered inputs.
//!
//! Runs a suite of checks against the input set and reports errors and
//! warnings without composing anything. Used by `svgstack validate` and
//! `svgstack build --validate`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use std::path::{Path, PathBuf};

use crate::discovery::Manifest;
use crate::output::{display_path, Printer};
use crate::types::SpriteOptions;

/// Run all validation checks against the discovered inputs.
pub fn validate_inputs(
    files: &[PathBuf],
    root: Option<&Path>,
    manifest: &Manifest,
    options: &SpriteOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_layout(manifest));
    result.merge(checks::check_duplicate_ids(files, root));
    result.merge(checks::check_documents(files, options));
    result.merge(checks::check_orphan_pseudo(files, root, options));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let severity = printer.severity(
            &d.severity.to_string(),
            d.severity == Severity::Error,
        );
        let location = d
            .path
            .as_deref()
            .map(|p| format!("{}: ", display_path(p)))
            .unwrap_or_default();
        eprintln!("  {}[{}]: {}{}", severity, d.code, location, d.message);
        if let Some(help) = &d.help {
            eprintln!("    help: {}", help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        eprintln!(
            "Validation failed: {} error(s), {} warning(s)",
            errors, warnings
        );
    } else if warnings > 0 {
        eprintln!("Validation passed ({} warning(s))", warnings);
    } else {
        eprintln!("Validation passed.");
    }
}
