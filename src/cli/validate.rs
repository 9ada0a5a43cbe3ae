//! Validate command implementation.
//!
//! Runs the pre-composition checks and reports diagnostics without
//! writing anything.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, discover_paths};
use crate::error::{Result, SpriteError};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, validate_inputs};

/// Validate SVG inputs without composing
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input files or directories (default: discover via svgstack.yaml)
    pub inputs: Vec<PathBuf>,

    /// Project root used when no inputs are given
    #[arg(long, default_value = ".")]
    pub project: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let printer = Printer::new(1);

    let discovery = if args.inputs.is_empty() {
        discover(&args.project)?
    } else {
        discover_paths(&args.inputs)?
    };
    let options = discovery.sprite_options()?;

    printer.status(
        "Checking",
        &plural(discovery.scan.total(), "icon", "icons"),
    );

    let result = validate_inputs(
        &discovery.scan.svgs,
        Some(&discovery.root),
        &discovery.manifest,
        &options,
    );
    print_diagnostics(&result, &printer);

    if result.has_errors() {
        return Err(SpriteError::Validation {
            message: plural(result.error_count(), "error", "errors"),
            help: None,
        });
    }
    Ok(())
}
