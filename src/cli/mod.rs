pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use clap::{Parser, Subcommand};

/// svgstack - SVG sprite generator
#[derive(Parser, Debug)]
#[command(name = "svgstack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose SVG inputs into a sprite and render its stylesheet
    Build(build::BuildArgs),

    /// Initialize a svgstack project (generates svgstack.yaml)
    Init(init::InitArgs),

    /// Validate SVG inputs without composing
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
