//! Individual validation checks over the discovered input set.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::Manifest;
use crate::sprite::icon_id;
use crate::svg::{Optimizer, Scrubber, SvgDocument};
use crate::types::{Layout, SpriteOptions};

use super::warning::{Diagnostic, ValidationResult};

/// Two inputs mapping to the same icon id would abort composition; flag
/// every colliding pair.
pub fn check_duplicate_ids(
    files: &[PathBuf],
    root: Option<&Path>,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: BTreeMap<String, &PathBuf> = BTreeMap::new();

    for path in files {
        let id = icon_id(path, root);
        match seen.get(&id) {
            Some(first) => result.push(
                Diagnostic::error(
                    "svgstack::validate::duplicate-id",
                    format!("icon id \"{}\" also derived from {}", id, first.display()),
                )
                .with_path(path)
                .with_help("Rename one of the files so each input maps to a unique icon id"),
            ),
            None => {
                seen.insert(id, path);
            }
        }
    }
    result
}

/// Every input must be readable, non-empty, and clean/parse into a
/// document with usable dimensions.
pub fn check_documents(files: &[PathBuf], options: &SpriteOptions) -> ValidationResult {
    let mut result = ValidationResult::new();
    let scrubber = Scrubber::default();

    for path in files {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                result.push(
                    Diagnostic::error(
                        "svgstack::validate::unreadable",
                        format!("cannot read file: {}", e),
                    )
                    .with_path(path),
                );
                continue;
            }
        };
        if raw.trim().is_empty() {
            result.push(
                Diagnostic::warning("svgstack::validate::empty", "file is empty").with_path(path),
            );
            continue;
        }

        let cleaned = match scrubber.optimize(&raw) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                result.push(
                    Diagnostic::error(
                        "svgstack::validate::invalid-document",
                        format!("cleanup failed: {}", e),
                    )
                    .with_path(path),
                );
                continue;
            }
        };
        let document = match SvgDocument::parse("check", &cleaned) {
            Ok(document) => document,
            Err(e) => {
                result.push(
                    Diagnostic::error("svgstack::validate::invalid-document", e.to_string())
                        .with_path(path),
                );
                continue;
            }
        };
        if document.dimensions().is_none() {
            result.push(
                Diagnostic::error(
                    "svgstack::validate::no-dimensions",
                    "no width/height attributes and no viewBox",
                )
                .with_path(path)
                .with_help("Add width/height attributes or a viewBox to the root element"),
            );
        } else if let Some(dims) = document.dimensions() {
            if dims.width > options.max_width as f64 || dims.height > options.max_height as f64 {
                result.push(
                    Diagnostic::warning(
                        "svgstack::validate::oversized",
                        format!(
                            "declared size {}x{} exceeds the {}x{} ceiling and will be scaled down",
                            dims.width, dims.height, options.max_width, options.max_height
                        ),
                    )
                    .with_path(path),
                );
            }
        }
    }
    result
}

/// A pseudo variant without its base icon still composes, but the
/// synthesized `:regular` selector will have no icon behind it.
pub fn check_orphan_pseudo(
    files: &[PathBuf],
    root: Option<&Path>,
    options: &SpriteOptions,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let ids: Vec<(String, &PathBuf)> = files.iter().map(|p| (icon_id(p, root), p)).collect();

    for (id, path) in &ids {
        let mut parts = id.splitn(2, &options.pseudo);
        let base = parts.next().unwrap_or(id);
        if parts.next().is_none() {
            continue;
        }
        let has_base = ids.iter().any(|(other, _)| other == base);
        if !has_base {
            result.push(
                Diagnostic::warning(
                    "svgstack::validate::orphan-pseudo",
                    format!("pseudo variant \"{}\" has no base icon \"{}\"", id, base),
                )
                .with_path(*path),
            );
        }
    }
    result
}

/// An unrecognized layout name silently falls back to vertical; warn so
/// the typo is visible.
pub fn check_layout(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();
    if let Some(layout) = &manifest.sprite.layout {
        if Layout::try_parse(layout).is_none() {
            result.push(
                Diagnostic::warning(
                    "svgstack::validate::unknown-layout",
                    format!("unknown layout \"{}\", falling back to vertical", layout),
                )
                .with_help("Valid layouts are vertical, horizontal and diagonal"),
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpriteOptionsBuilder;
    use std::fs;
    use tempfile::tempdir;

    fn options() -> SpriteOptions {
        SpriteOptionsBuilder::new().build().unwrap()
    }

    #[test]
    fn test_duplicate_ids_flagged() {
        let files = vec![PathBuf::from("a/arrow.svg"), PathBuf::from("b/arrow.svg")];
        let result = check_duplicate_ids(&files, None);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_distinct_ids_pass() {
        let files = vec![PathBuf::from("arrow.svg"), PathBuf::from("logo.svg")];
        assert!(check_duplicate_ids(&files, None).is_ok());
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let files = vec![PathBuf::from("/nonexistent/arrow.svg")];
        let result = check_documents(&files, &options());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_empty_file_is_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        fs::write(&path, "  \n").unwrap();

        let result = check_documents(&[path], &options());
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_sizeless_document_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sizeless.svg");
        fs::write(&path, "<svg><path/></svg>").unwrap();

        let result = check_documents(&[path], &options());
        assert_eq!(result.error_count(), 1);
        let diagnostic = result.iter().next().unwrap();
        assert_eq!(diagnostic.code, "svgstack::validate::no-dimensions");
    }

    #[test]
    fn test_oversized_document_is_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.svg");
        fs::write(&path, "<svg width=\"5000\" height=\"10\"><path/></svg>").unwrap();

        let result = check_documents(&[path], &options());
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_valid_document_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.svg");
        fs::write(&path, "<svg width=\"10\" height=\"10\"><path/></svg>").unwrap();

        assert!(check_documents(&[path], &options()).is_ok());
    }

    #[test]
    fn test_orphan_pseudo_warned() {
        let files = vec![PathBuf::from("btn~hover.svg")];
        let result = check_orphan_pseudo(&files, None, &options());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_paired_pseudo_passes() {
        let files = vec![PathBuf::from("btn.svg"), PathBuf::from("btn~hover.svg")];
        assert!(check_orphan_pseudo(&files, None, &options()).is_ok());
    }

    #[test]
    fn test_unknown_layout_warned() {
        let manifest = Manifest::parse("sprite:\n  layout: spiral\n").unwrap();
        let result = check_layout(&manifest);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_known_layout_passes() {
        let manifest = Manifest::parse("sprite:\n  layout: diagonal\n").unwrap();
        assert!(check_layout(&manifest).is_ok());
    }
}
