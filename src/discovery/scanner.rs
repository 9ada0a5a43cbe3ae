//! File system scanner for SVG inputs.
//!
//! Recursively walks source directories for `.svg` files, honoring
//! manifest exclusion patterns and skipping the output directory so a
//! previously generated sprite never feeds back into itself. Entries are
//! visited in file-name order: discovery order feeds namespace
//! allocation, so it has to be stable across runs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Result of scanning for SVG inputs.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered SVG files, in stable walk order.
    pub svgs: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.svgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.svgs.is_empty()
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.svgs.extend(other.svgs);
    }
}

/// Scan a directory tree for SVG files.
pub fn scan_directory(root: &Path, manifest: &Manifest, output: Option<&Path>) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }
        if let Some(output) = output {
            if path.starts_with(output) {
                continue;
            }
        }
        if manifest.is_excluded(path) {
            continue;
        }
        if is_svg_file(path) {
            result.svgs.push(path.to_path_buf());
        }
    }

    result
}

/// Scan multiple source paths relative to a base directory.
pub fn scan_sources(
    sources: &[String],
    base_path: &Path,
    manifest: &Manifest,
    output: Option<&Path>,
) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest, output));
    }

    result
}

/// Check whether a path names an SVG file.
pub fn is_svg_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_svg_file() {
        assert!(is_svg_file(Path::new("arrow.svg")));
        assert!(is_svg_file(Path::new("icons/ARROW.SVG")));
        assert!(!is_svg_file(Path::new("arrow.png")));
        assert!(!is_svg_file(Path::new("svg")));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(dir.path(), &Manifest::default(), None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_finds_nested_svgs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nav")).unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("nav/arrow.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("readme.md"), "# docs").unwrap();

        let result = scan_directory(dir.path(), &Manifest::default(), None);
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_scan_order_is_stable() {
        let dir = tempdir().unwrap();
        // Created in reverse name order; the walk still yields sorted.
        fs::write(dir.path().join("zeta.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("alpha.svg"), "<svg/>").unwrap();

        let result = scan_directory(dir.path(), &Manifest::default(), None);
        let names: Vec<String> = result
            .svgs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.svg", "zeta.svg"]);
    }

    #[test]
    fn test_scan_skips_output_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist/svg")).unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("dist/svg/sprite.svg"), "<svg/>").unwrap();

        let output = dir.path().join("dist");
        let result = scan_directory(dir.path(), &Manifest::default(), Some(&output));
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_scan_honors_excludes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("drafts/wip.svg"), "<svg/>").unwrap();

        let manifest = Manifest {
            excludes: vec!["**/drafts/*".to_string()],
            ..Default::default()
        };
        let result = scan_directory(dir.path(), &manifest, None);
        assert_eq!(result.total(), 1);
        assert!(result.svgs[0].to_string_lossy().contains("logo"));
    }

    #[test]
    fn test_scan_sources_merges() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/one.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("b/two.svg"), "<svg/>").unwrap();

        let sources = vec!["a".to_string(), "b".to_string()];
        let result = scan_sources(&sources, dir.path(), &Manifest::default(), None);
        assert_eq!(result.total(), 2);
    }
}
