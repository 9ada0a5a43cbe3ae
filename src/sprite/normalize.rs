//! Per-file normalization orchestration.
//!
//! One file's path from raw bytes to a sprite-ready document: read, clean
//! through the optimizer, parse, normalize dimensions, pad, namespace.
//! The steps are strictly sequential for a file; files themselves run
//! concurrently in the assembler's fan-out, each owning its own document
//! and precomputed namespace prefix.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpriteError};
use crate::svg::{Optimizer, SvgDocument};
use crate::types::SpriteOptions;

/// A fully normalized icon, ready to be folded into the sprite.
#[derive(Debug, Clone)]
pub struct NormalizedIcon {
    /// Identifier derived from the source path.
    pub id: String,
    /// Source file, kept for error reporting.
    pub path: PathBuf,
    /// Namespace prefix applied to the document's internal ids.
    pub prefix: String,
    /// Padded declared size.
    pub width: f64,
    pub height: f64,
    pub document: SvgDocument,
}

/// Derive an icon identifier from a file path.
///
/// The path relative to the scan root, separators replaced with `-` and
/// the `.svg` extension dropped: `shapes/arrow/up.svg` → `shapes-arrow-up`.
pub fn icon_id(path: &Path, root: Option<&Path>) -> String {
    let relative = root
        .and_then(|r| path.strip_prefix(r).ok())
        .unwrap_or_else(|| Path::new(path.file_name().unwrap_or(path.as_os_str())));

    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("-");

    match joined.strip_suffix(".svg") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => joined,
    }
}

/// Normalize one input file.
///
/// Each step's failure is fatal to this file and carries the file path;
/// sibling files are unaffected until the assembler's join observes the
/// error.
pub fn normalize_file(
    path: &Path,
    id: &str,
    prefix: &str,
    options: &SpriteOptions,
    optimizer: &dyn Optimizer,
) -> Result<NormalizedIcon> {
    let raw = fs::read_to_string(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let cleaned = optimizer.optimize(&raw).map_err(|e| SpriteError::Optimize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut document = SvgDocument::parse(id, &cleaned).map_err(|e| SpriteError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    document
        .normalize_dimensions(options.max_width, options.max_height)
        .map_err(|e| SpriteError::Dimension {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    document
        .apply_padding(options.padding)
        .map_err(|e| SpriteError::Dimension {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    document.namespace_ids(prefix);

    let dims = document.dimensions().ok_or_else(|| SpriteError::Dimension {
        path: path.to_path_buf(),
        message: "dimensions lost during normalization".to_string(),
    })?;

    Ok(NormalizedIcon {
        id: id.to_string(),
        path: path.to_path_buf(),
        prefix: prefix.to_string(),
        width: dims.width,
        height: dims.height,
        document,
    })
}
