use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for svgstack operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("IO error: {0}")]
    #[diagnostic(code(svgstack::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(svgstack::io))]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(svgstack::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    #[diagnostic(code(svgstack::parse))]
    Parse { path: PathBuf, message: String },

    #[error("Failed to optimize {}: {message}", path.display())]
    #[diagnostic(code(svgstack::optimize))]
    Optimize { path: PathBuf, message: String },

    #[error("No usable dimensions in {}: {message}", path.display())]
    #[diagnostic(code(svgstack::dimension))]
    Dimension { path: PathBuf, message: String },

    #[error("Icon id \"{id}\" derived from both {} and {}", first.display(), second.display())]
    #[diagnostic(
        code(svgstack::collision),
        help("Rename one of the files so each input maps to a unique icon id")
    )]
    Collision {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(svgstack::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(svgstack::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SpriteError {
    /// Path of the offending input file, if the error is tied to one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            SpriteError::Io { path, .. }
            | SpriteError::Parse { path, .. }
            | SpriteError::Optimize { path, .. }
            | SpriteError::Dimension { path, .. } => Some(path),
            SpriteError::Collision { first, .. } => Some(first),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;
