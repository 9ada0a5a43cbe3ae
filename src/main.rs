use clap::Parser;
use miette::Result;
use svgstack::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => svgstack::cli::build::run(args)?,
        Commands::Init(args) => svgstack::cli::init::run(args)?,
        Commands::Validate(args) => svgstack::cli::validate::run(args)?,
        Commands::Completions(args) => svgstack::cli::completions::run(args)?,
    }

    Ok(())
}
